use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

/// Errors produced while turning a byte stream into a [`Request`].
///
/// `Incomplete` and `IncompleteBody` are also returned while the buffer is
/// still filling up; the connection only treats them as fatal once the peer
/// has stopped sending (see [`finish_at_eof`]).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("invalid content-length: {0:?}")]
    InvalidContentLength(String),

    #[error("stream ended before end of headers")]
    HeaderReadFailure,

    #[error("incomplete body: expected {expected} bytes, received {received}")]
    IncompleteBody { expected: usize, received: usize },

    #[error("stream read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("request incomplete")]
    Incomplete,
}

impl ParseError {
    /// True when more input could still complete the request.
    pub fn needs_more_input(&self) -> bool {
        matches!(self, ParseError::Incomplete | ParseError::IncompleteBody { .. })
    }
}

/// Parses one request from the start of `buf`.
///
/// Returns the request and the number of bytes it occupied. Lines may end in
/// CRLF or a bare LF. The request line is checked as soon as it is terminated,
/// so a malformed one fails without waiting for the headers.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let (request_line, mut pos) = next_line(buf, 0).ok_or(ParseError::Incomplete)?;
    let (method, path, version) = parse_request_line(request_line)?;

    // Headers
    let mut headers = HashMap::new();

    loop {
        let (line, next) = next_line(buf, pos).ok_or(ParseError::Incomplete)?;
        pos = next;

        if line.trim_ascii().is_empty() {
            break;
        }

        // Lines without a colon are skipped, not fatal
        if let Some((key, value)) = parse_header_line(line) {
            headers.insert(key, value);
        }
    }

    // Body
    let content_length = match headers.get("content-length") {
        Some(v) => v
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidContentLength(v.clone()))?,
        None => 0,
    };

    let available = buf.len() - pos;
    if available < content_length {
        return Err(ParseError::IncompleteBody {
            expected: content_length,
            received: available,
        });
    }

    let body = buf[pos..pos + content_length].to_vec();

    let request = Request {
        method,
        path,
        version,
        headers,
        body,
    };

    Ok((request, pos + content_length))
}

/// Re-evaluates a buffer once the peer has stopped sending.
///
/// Returns `Ok(None)` when nothing at all was received. Any request that is
/// still incomplete becomes a terminal error.
pub fn finish_at_eof(buf: &[u8]) -> Result<Option<(Request, usize)>, ParseError> {
    if buf.is_empty() {
        return Ok(None);
    }

    match parse_http_request(buf) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(ParseError::Incomplete) => {
            // An unterminated first line is still judged as a request line
            if !buf.contains(&b'\n') {
                parse_request_line(buf)?;
            }
            Err(ParseError::HeaderReadFailure)
        }
        Err(e) => Err(e),
    }
}

fn parse_request_line(line: &[u8]) -> Result<(Method, String, String), ParseError> {
    let malformed = || ParseError::MalformedRequestLine(String::from_utf8_lossy(line).into_owned());

    let line = std::str::from_utf8(line).map_err(|_| malformed())?;
    let mut parts = line.split_whitespace();

    let method = parts.next().ok_or_else(malformed)?;
    let path = parts.next().ok_or_else(malformed)?;
    let version = parts.next().ok_or_else(malformed)?;

    Ok((Method::parse(method), path.to_string(), version.to_string()))
}

fn parse_header_line(line: &[u8]) -> Option<(String, String)> {
    let line = std::str::from_utf8(line).ok()?;
    let (key, value) = line.split_once(':')?;

    Some((key.trim().to_ascii_lowercase(), value.trim().to_string()))
}

/// Returns the line starting at `start` without its terminator, and the
/// offset just past the terminating LF.
fn next_line(buf: &[u8], start: usize) -> Option<(&[u8], usize)> {
    let len = buf[start..].iter().position(|&b| b == b'\n')?;
    let line = &buf[start..start + len];
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    Some((line, start + len + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn next_line_strips_optional_carriage_return() {
        let buf = b"one\r\ntwo\nthree";

        let (first, pos) = next_line(buf, 0).unwrap();
        assert_eq!(first, b"one");

        let (second, pos) = next_line(buf, pos).unwrap();
        assert_eq!(second, b"two");

        assert!(next_line(buf, pos).is_none());
    }

    #[test]
    fn header_line_splits_on_first_colon() {
        let (key, value) = parse_header_line(b"Host: localhost:4221").unwrap();
        assert_eq!(key, "host");
        assert_eq!(value, "localhost:4221");
    }
}
