//! A minimal line oriented HTTP/1.1 request reader and dispatcher
//!
//! This crate reads one buffer from a TCP connection, parses it into a
//! [`protocol::Request`] and routes it to a handler registered for the exact
//! `(method, target)` pair. Parsing is a pure, synchronous pass over an
//! in-memory buffer; only the server and the handlers touch the network.
//!
//! # Example
//!
//! ```no_run
//! use line_http::handler::make_handler;
//! use line_http::protocol::{BoxError, StatusLine};
//! use line_http::{Router, Server};
//! use tracing::{Level, error};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() {
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     let router = Router::new().route(
//!         "GET",
//!         "/",
//!         make_handler(|connection, _data| {
//!             Box::pin(async move {
//!                 connection.write_status(StatusLine::ok()).await?;
//!                 connection.close().await?;
//!                 Ok::<(), BoxError>(())
//!             })
//!         }),
//!     );
//!
//!     let server = Server::builder()
//!         .address("0.0.0.0:4221")
//!         .router(router)
//!         .build()
//!         .expect("invalid server config");
//!
//!     if let Err(e) = server.start().await {
//!         error!(cause = %e, "server stopped");
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: CRLF line scanning, request parsing and status line encoding
//! - [`protocol`]: request and response types, error types
//! - [`connection`]: the write half of a client connection given to handlers
//! - [`handler`]: the [`handler::Handler`] trait and closure adapter
//! - [`dispatcher`]: the [`Router`] matching requests to handlers
//! - [`server`]: bind, accept and one task per connection
//!
//! # Wire format
//!
//! Requests are expected to look like
//! `METHOD SP TARGET SP VERSION CRLF (Name: value CRLF)* CRLF body`
//! ([RFC 9112 §2.2](https://www.rfc-editor.org/rfc/rfc9112#section-2.2)), but
//! only two rules are enforced: the request line splits into exactly three
//! parts, and every header line contains a colon.
//!
//! # Limitations
//!
//! - One read per connection, no keep-alive or pipelining
//! - No chunked transfer encoding, no `Content-Length` body framing
//! - No header folding, no URL decoding
//! - No TLS support

pub mod codec;
pub mod connection;
pub mod dispatcher;
pub mod handler;
pub mod protocol;
pub mod server;

mod utils;
pub(crate) use utils::ensure;

pub use dispatcher::Router;
pub use server::Server;
