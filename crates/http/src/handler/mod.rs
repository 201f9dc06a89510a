//! Request handler traits and utilities.
//!
//! A handler receives the live [`Connection`] and the raw bytes of the
//! request it was matched for. It owns writing the response and closing the
//! connection.

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::connection::Connection;
use crate::protocol::BoxError;

#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, connection: &mut Connection, data: &[u8]) -> Result<(), BoxError>;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<F> Handler for HandlerFn<F>
where
    F: for<'a> Fn(&'a mut Connection, &'a [u8]) -> BoxFuture<'a, Result<(), BoxError>> + Send + Sync,
{
    async fn call(&self, connection: &mut Connection, data: &[u8]) -> Result<(), BoxError> {
        (self.f)(connection, data).await
    }
}

/// Wraps a closure returning a boxed future into a [`Handler`].
///
/// ```
/// use line_http::handler::make_handler;
/// use line_http::protocol::{BoxError, StatusLine};
///
/// let handler = make_handler(|connection, _data| {
///     Box::pin(async move {
///         connection.write_status(StatusLine::ok()).await?;
///         connection.close().await?;
///         Ok::<(), BoxError>(())
///     })
/// });
/// ```
pub fn make_handler<F>(f: F) -> HandlerFn<F>
where
    F: for<'a> Fn(&'a mut Connection, &'a [u8]) -> BoxFuture<'a, Result<(), BoxError>> + Send + Sync,
{
    HandlerFn { f }
}
