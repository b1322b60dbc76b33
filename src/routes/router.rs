//! Request routing
//!
//! Routes are checked in table order and the first match wins. A request no
//! route matches gets a bare 404.

use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::routes::files::StaticFiles;
use crate::routes::handlers;

/// How a route matches the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatcher {
    /// The whole path must equal the literal
    Exact(&'static str),
    /// The path must start with the literal; the rest is captured
    Prefix(&'static str),
}

impl PathMatcher {
    /// Returns the captured remainder on a match (empty for exact matches).
    pub fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            PathMatcher::Exact(literal) => (path == *literal).then_some(""),
            PathMatcher::Prefix(prefix) => path.strip_prefix(prefix),
        }
    }
}

/// The handler a route is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Root,
    Echo,
    UserAgent,
    ReadFile,
    WriteFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub matcher: PathMatcher,
    pub handler: Handler,
}

impl Route {
    pub fn new(method: Method, matcher: PathMatcher, handler: Handler) -> Self {
        Self {
            method,
            matcher,
            handler,
        }
    }
}

/// Maps requests to handlers and runs them
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
    files: StaticFiles,
}

impl Router {
    /// Builds the server's route table around the given file handler.
    pub fn new(files: StaticFiles) -> Self {
        let routes = vec![
            Route::new(Method::GET, PathMatcher::Exact("/"), Handler::Root),
            Route::new(Method::GET, PathMatcher::Prefix("/echo/"), Handler::Echo),
            Route::new(Method::GET, PathMatcher::Exact("/user-agent"), Handler::UserAgent),
            Route::new(Method::GET, PathMatcher::Prefix("/files/"), Handler::ReadFile),
            Route::new(Method::POST, PathMatcher::Prefix("/files/"), Handler::WriteFile),
        ];

        Self { routes, files }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn files(&self) -> &StaticFiles {
        &self.files
    }

    /// Finds the first route for `method` and `path` along with the captured
    /// path parameter.
    pub fn find<'a>(&self, method: &Method, path: &'a str) -> Option<(&Route, &'a str)> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| route.matcher.matches(path).map(|param| (route, param)))
    }

    /// Runs the matching handler. Always yields a response to write.
    pub async fn dispatch(&self, req: &Request) -> Response {
        let Some((route, param)) = self.find(&req.method, &req.path) else {
            return handlers::not_found(req);
        };

        match route.handler {
            Handler::Root => handlers::root(req),
            Handler::Echo => handlers::echo(req, param),
            Handler::UserAgent => handlers::user_agent(req),
            Handler::ReadFile => self.files.serve_read(req, param).await,
            Handler::WriteFile => self.files.serve_write(req, param).await,
        }
    }
}
