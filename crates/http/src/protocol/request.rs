//! HTTP request representation produced by the request parser.
//!
//! A [`Request`] is built once per inbound read buffer and never mutated
//! afterwards; every field is exposed through read-only accessors.

use std::collections::HashMap;

/// The first line of a request: `METHOD SP TARGET SP VERSION`.
///
/// No validation is applied to any of the three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    target: String,
    version: String,
}

impl RequestLine {
    pub fn new(method: impl Into<String>, target: impl Into<String>, version: impl Into<String>) -> Self {
        Self { method: method.into(), target: target.into(), version: version.into() }
    }

    /// Returns the request method exactly as it appeared on the wire.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the request target, not url-decoded.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the protocol version string, e.g. `HTTP/1.1`.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub(crate) fn set_method(&mut self, method: impl Into<String>) {
        self.method = method.into();
    }
}

/// A parsed HTTP request.
///
/// Header names are stored as found (no case folding) and header values
/// keep any whitespace that followed the colon. The body is the raw
/// concatenation of every line after the blank separator line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    line: RequestLine,
    headers: HashMap<String, String>,
    body: String,
}

impl Request {
    pub fn new(line: RequestLine, headers: HashMap<String, String>, body: String) -> Self {
        Self { line, headers, body }
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.line
    }

    pub fn method(&self) -> &str {
        self.line.method()
    }

    pub fn target(&self) -> &str {
        self.line.target()
    }

    pub fn version(&self) -> &str {
        self.line.version()
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Looks up a header by its literal, case-sensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the request, returning its request line, headers and body.
    pub fn into_parts(self) -> (RequestLine, HashMap<String, String>, String) {
        (self.line, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_sensitive() {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), " x".to_string());
        let request = Request::new(RequestLine::new("GET", "/", "HTTP/1.1"), headers, String::new());

        assert_eq!(request.header("Host"), Some(" x"));
        assert_eq!(request.header("host"), None);
        assert_eq!(request.method(), "GET");
        assert_eq!(request.target(), "/");
        assert_eq!(request.version(), "HTTP/1.1");
        assert_eq!(request.body(), "");
    }
}
