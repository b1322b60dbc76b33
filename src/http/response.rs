/// HTTP status codes produced by the server.
///
/// - `Ok` (200): Request successful
/// - `Created` (201): File written
/// - `NotFound` (404): No route, no such file, or file serving disabled
/// - `InternalServerError` (500): Storage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use relay_http::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    /// The status portion of a status line, e.g. `"404 Not Found"`.
    pub fn status_line(&self) -> String {
        format!("{} {}", self.as_u16(), self.reason_phrase())
    }
}

pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A complete HTTP response ready to be serialized.
///
/// There is deliberately no way to set `Content-Length`: the writer always
/// derives it from the body it is given. A response without a content type is
/// a bare message and is written with no headers at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Protocol version, echoed from the request
    pub version: String,
    /// The HTTP status code
    pub status: StatusCode,
    /// Value of the `Content-Type` header, if any
    pub content_type: Option<String>,
    body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use relay_http::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("text/plain")
///     .body(b"abc".to_vec())
///     .build("HTTP/1.1");
/// assert_eq!(response.body(), b"abc");
/// ```
#[derive(Debug)]
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response for a request of the given protocol version.
    ///
    /// A builder without a content type still yields a headed message; it is
    /// given `text/plain` so only [`Response::bare`] can produce a header-less
    /// response.
    pub fn build(self, version: impl Into<String>) -> Response {
        Response {
            version: version.into(),
            status: self.status,
            content_type: Some(self.content_type.unwrap_or_else(|| TEXT_PLAIN.to_string())),
            body: self.body,
        }
    }
}

impl Response {
    /// 200 OK with a `text/plain` body.
    pub fn text(version: &str, body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(TEXT_PLAIN)
            .body(body)
            .build(version)
    }

    /// Empty `text/plain` response with the given status.
    pub fn empty(version: &str, status: StatusCode) -> Self {
        ResponseBuilder::new(status)
            .content_type(TEXT_PLAIN)
            .build(version)
    }

    /// 200 OK carrying raw file bytes.
    pub fn octets(version: &str, body: Vec<u8>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(OCTET_STREAM)
            .body(body)
            .build(version)
    }

    /// Header-less response with an empty body, used for unmatched routes.
    pub fn bare(version: &str, status: StatusCode) -> Self {
        Self {
            version: version.to_string(),
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The `Content-Length` this response will be written with.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    pub fn is_bare(&self) -> bool {
        self.content_type.is_none()
    }
}
