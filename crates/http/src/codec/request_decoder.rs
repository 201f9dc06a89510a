//! HTTP request parser
//!
//! Turns one inbound read buffer into a [`Request`] in a single forward pass
//! over the logical lines produced by [`Lines`]:
//!
//! 1. the first line is the request line, which must split on `' '` into
//!    exactly three parts
//! 2. following lines up to a blank line are headers, split on the first `':'`
//! 3. every remaining line is appended to the body, without separators
//!
//! Only the three part request line and the colon in header lines are
//! enforced. Methods, targets and versions are not checked against any
//! grammar, header names keep their case and header values keep the
//! whitespace that followed the colon.
//!
//! # Example
//!
//! ```
//! use line_http::codec::parse_request;
//!
//! let request = parse_request(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.header("Host"), Some(" x"));
//! ```

use std::collections::HashMap;

use tracing::trace;

use crate::codec::Lines;
use crate::ensure;
use crate::protocol::{ParseError, Request, RequestLine};

/// Method assigned to a request line whose method part is empty.
const DEFAULT_METHOD: &str = "GET";

const REQUEST_LINE_PARTS: usize = 3;

/// Parses a raw read buffer into a [`Request`].
///
/// # Errors
///
/// - [`ParseError::NoStartLine`] if the buffer holds no line at all
/// - [`ParseError::InvalidRequestLineSize`] if the first line doesn't split into 3 parts
/// - [`ParseError::InvalidHeader`] if a header line has no colon
pub fn parse_request(data: &[u8]) -> Result<Request, ParseError> {
    let mut lines = Lines::new(data);

    let start_line = lines.next().ok_or(ParseError::NoStartLine)?;
    let mut request_line = parse_request_line(&String::from_utf8_lossy(start_line))?;

    // a request line starting with a space splits into an empty method
    if request_line.method().is_empty() {
        request_line.set_method(DEFAULT_METHOD);
    }
    trace!(method = request_line.method(), target = request_line.target(), "parsed request line");

    let mut headers = HashMap::new();
    for line in lines.by_ref() {
        let line = String::from_utf8_lossy(line);
        if line.is_empty() || line == "\n" {
            break;
        }

        let (name, value) = parse_header(&line)?;
        headers.insert(name.to_string(), value.to_string());
    }
    trace!(header_count = headers.len(), "parsed headers");

    let body = lines.map(String::from_utf8_lossy).collect::<String>();
    trace!(body_size = body.len(), "parsed body");

    Ok(Request::new(request_line, headers, body))
}

/// Splits a request line on single spaces into method, target and version.
pub fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    let parts = line.split(' ').collect::<Vec<_>>();
    ensure!(parts.len() == REQUEST_LINE_PARTS, ParseError::invalid_request_line_size(parts.len()));

    Ok(RequestLine::new(parts[0], parts[1], parts[2]))
}

/// Splits a header line on its first colon. Neither side is trimmed.
pub fn parse_header(line: &str) -> Result<(&str, &str), ParseError> {
    line.split_once(':').ok_or_else(|| ParseError::invalid_header(line))
}
