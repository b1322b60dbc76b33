//! Handlers that answer from the request alone

use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};

/// `GET /` - always 200 with an empty body.
pub fn root(req: &Request) -> Response {
    Response::text(&req.version, Vec::new())
}

/// `GET /echo/{value}` - the captured remainder, verbatim.
pub fn echo(req: &Request, value: &str) -> Response {
    Response::text(&req.version, value)
}

/// `GET /user-agent` - the `User-Agent` header, or an empty 404.
pub fn user_agent(req: &Request) -> Response {
    match req.header("user-agent") {
        Some(agent) => Response::text(&req.version, agent),
        None => Response::empty(&req.version, StatusCode::NotFound),
    }
}

/// Fallthrough for anything without a route.
pub fn not_found(req: &Request) -> Response {
    Response::bare(&req.version, StatusCode::NotFound)
}
