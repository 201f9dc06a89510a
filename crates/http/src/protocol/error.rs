use std::error::Error;
use std::io;
use thiserror::Error;

/// Boxed error returned by request handlers.
pub type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("request does not contain a start line")]
    NoStartLine,

    #[error("failed to parse request line: request line should contain 3 parts, found {parts}")]
    InvalidRequestLineSize { parts: usize },

    #[error("failed to parse header: invalid header: {line}")]
    InvalidHeader { line: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn invalid_request_line_size(parts: usize) -> Self {
        Self::InvalidRequestLineSize { parts }
    }

    pub fn invalid_header<S: ToString>(line: S) -> Self {
        Self::InvalidHeader { line: line.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("failed to parse request: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("no handler for {method} {target}")]
    NoHandler { method: String, target: String },

    #[error("handler error: {source}")]
    Handler { source: BoxError },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl DispatchError {
    pub fn no_handler<M: ToString, T: ToString>(method: M, target: T) -> Self {
        Self::NoHandler { method: method.to_string(), target: target.to_string() }
    }

    pub fn handler<E: Into<BoxError>>(e: E) -> Self {
        Self::Handler { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("bind server error: {source}")]
    Bind { source: io::Error },

    #[error("failure while reading from connection: {source}")]
    Read { source: io::Error },

    #[error("dispatch error: {source}")]
    Dispatch {
        #[from]
        source: DispatchError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_name_the_failing_phase() {
        assert_eq!(ParseError::NoStartLine.to_string(), "request does not contain a start line");
        assert_eq!(
            ParseError::invalid_request_line_size(4).to_string(),
            "failed to parse request line: request line should contain 3 parts, found 4"
        );
        assert_eq!(
            ParseError::invalid_header("NoColon").to_string(),
            "failed to parse header: invalid header: NoColon"
        );
    }

    #[test]
    fn dispatch_error_wraps_parse_error() {
        let error = DispatchError::from(ParseError::NoStartLine);
        assert!(matches!(error, DispatchError::Parse { source: ParseError::NoStartLine }));
        assert_eq!(error.to_string(), "failed to parse request: request does not contain a start line");

        assert_eq!(DispatchError::no_handler("POST", "/missing").to_string(), "no handler for POST /missing");
    }
}
