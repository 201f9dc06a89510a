//! Codec module for reading requests and writing status lines
//!
//! # Components
//!
//! - Line scanning ([`line_decoder`]):
//!   - [`next_line`]: the pure CRLF scanning rule
//!   - [`Lines`]: forward-only iterator over a complete buffer
//!   - [`LineDecoder`]: streaming [`tokio_util::codec::Decoder`] over the same rule
//!
//! - Request parsing ([`request_decoder`]):
//!   - [`parse_request`]: request line, headers and body from one read buffer
//!
//! - Response writing ([`response_encoder`]):
//!   - [`ResponseEncoder`]: encodes a [`StatusLine`](crate::protocol::StatusLine)

mod line_decoder;
mod request_decoder;
mod response_encoder;

pub use line_decoder::LineDecoder;
pub use line_decoder::LineScan;
pub use line_decoder::Lines;
pub use line_decoder::next_line;
pub use request_decoder::parse_header;
pub use request_decoder::parse_request;
pub use request_decoder::parse_request_line;
pub use response_encoder::ResponseEncoder;
