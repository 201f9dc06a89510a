//! Client connection handling
//!
//! [`Connection`] is the write half of an accepted TCP stream, as handed to
//! request handlers. It writes status lines or raw bytes and guarantees the
//! stream is shut down at most once.

mod http_connection;

pub use http_connection::Connection;
