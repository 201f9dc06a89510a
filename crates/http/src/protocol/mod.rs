//! Core protocol types shared by the codec, dispatcher and server.
//!
//! - **Request** ([`request`]): [`RequestLine`] and [`Request`], the output of the parser
//! - **Response** ([`response`]): [`StatusLine`], the only kind of response this crate writes itself
//! - **Errors** ([`error`]):
//!   - [`ParseError`]: request parsing errors
//!   - [`DispatchError`]: routing and handler errors
//!   - [`ServerError`]: per connection server errors

mod request;
pub use request::Request;
pub use request::RequestLine;

mod response;
pub use response::HTTP_11;
pub use response::StatusLine;

mod error;
pub use error::BoxError;
pub use error::DispatchError;
pub use error::ParseError;
pub use error::ServerError;
