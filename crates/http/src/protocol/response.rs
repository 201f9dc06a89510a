//! Status line sent back for canned responses.
//!
//! Responses in this crate carry no headers and no body: the whole
//! response is `<version> <code> <reason>\r\n\r\n`.

use http::StatusCode;

/// Protocol version used by the canned responses.
pub const HTTP_11: &str = "HTTP/1.1";

/// A bodyless response made of a single status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    version: String,
    status: StatusCode,
}

impl StatusLine {
    pub fn new(version: impl Into<String>, status: StatusCode) -> Self {
        Self { version: version.into(), status }
    }

    /// `HTTP/1.1 200 OK`
    pub fn ok() -> Self {
        Self::new(HTTP_11, StatusCode::OK)
    }

    /// `HTTP/1.1 404 Not Found`
    pub fn not_found() -> Self {
        Self::new(HTTP_11, StatusCode::NOT_FOUND)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reason phrase, empty for codes without a canonical reason.
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }
}
