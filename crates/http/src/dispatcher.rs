//! Request dispatching by exact `(method, target)` match.
//!
//! The [`Router`] is built once at startup, then shared read-only by every
//! connection task. For each inbound buffer [`Router::dispatch`]:
//!
//! - parses the buffer, returning the parse failure untouched and writing nothing
//! - calls the registered handler, which owns the response and the connection
//! - otherwise answers `GET` (or an empty method) with `404 Not Found` and closes
//! - otherwise closes the connection and reports [`DispatchError::NoHandler`]

use std::collections::HashMap;
use std::fmt;

use tracing::{info, warn};

use crate::codec::parse_request;
use crate::connection::Connection;
use crate::handler::Handler;
use crate::protocol::{DispatchError, StatusLine};

/// Composite `(method, target)` routing key.
type RouteKey = (String, String);

/// Methods answered with `404 Not Found` when no handler matches.
const NOT_FOUND_METHODS: [&str; 2] = ["GET", ""];

#[derive(Default)]
pub struct Router {
    handlers: HashMap<RouteKey, Box<dyn Handler>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for an exact method and target. A later
    /// registration for the same pair replaces the earlier one.
    pub fn register(&mut self, method: impl Into<String>, target: impl Into<String>, handler: impl Handler + 'static) {
        let key = (method.into(), target.into());
        if self.handlers.insert(key.clone(), Box::new(handler)).is_some() {
            warn!(method = %key.0, target = %key.1, "handler replaced");
        }
    }

    /// Builder style variant of [`Router::register`].
    #[must_use]
    pub fn route(mut self, method: impl Into<String>, target: impl Into<String>, handler: impl Handler + 'static) -> Self {
        self.register(method, target, handler);
        self
    }

    pub fn handler(&self, method: &str, target: &str) -> Option<&dyn Handler> {
        self.handlers.get(&(method.to_owned(), target.to_owned())).map(|handler| &**handler)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Parses `data` and routes the request.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Parse`] if `data` is not a request; the connection is left untouched
    /// - [`DispatchError::Handler`] if the matched handler failed
    /// - [`DispatchError::NoHandler`] for an unmatched non `GET` request, after closing the connection
    /// - [`DispatchError::Io`] if writing the not found response or closing failed
    pub async fn dispatch(&self, connection: &mut Connection, data: &[u8]) -> Result<(), DispatchError> {
        let request = parse_request(data)?;
        let (method, target) = (request.method(), request.target());
        info!(method, target, "handling request");

        if let Some(handler) = self.handler(method, target) {
            return handler.call(connection, data).await.map_err(DispatchError::handler);
        }

        if NOT_FOUND_METHODS.contains(&method) {
            info!(method, target, "no handler matched, responding not found");
            connection.write_status(StatusLine::not_found()).await?;
            connection.close().await?;
            return Ok(());
        }

        connection.close().await?;
        warn!(method, target, "no handler matched, connection closed");
        Err(DispatchError::no_handler(method, target))
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("routes", &self.handlers.keys().collect::<Vec<_>>()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::make_handler;
    use crate::protocol::{BoxError, ParseError};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, DuplexStream, duplex};

    fn counting_handler(counter: Arc<AtomicUsize>) -> impl Handler {
        make_handler(move |connection, _data| {
            let counter = Arc::clone(&counter);
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
                connection.write_status(StatusLine::ok()).await?;
                connection.close().await?;
                Ok::<(), BoxError>(())
            })
        })
    }

    fn connection() -> (DuplexStream, Connection) {
        let (client, server) = duplex(1024);
        (client, Connection::new(server))
    }

    async fn received(mut client: DuplexStream) -> String {
        let mut received = String::new();
        client.read_to_string(&mut received).await.unwrap();
        received
    }

    #[tokio::test]
    async fn registered_handler_is_invoked_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let router = Router::new().route("GET", "/", counting_handler(Arc::clone(&counter)));
        let (client, mut connection) = connection();

        router.dispatch(&mut connection, b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(connection.is_closed());
        assert_eq!(received(client).await, "HTTP/1.1 200 OK\r\n\r\n");
    }

    #[tokio::test]
    async fn handler_receives_raw_bytes() {
        let router = Router::new().route(
            "POST",
            "/echo",
            make_handler(|connection, data| {
                Box::pin(async move {
                    connection.write_all(data).await?;
                    connection.close().await?;
                    Ok::<(), BoxError>(())
                })
            }),
        );
        let (client, mut connection) = connection();
        let data = b"POST /echo HTTP/1.1\r\n\r\nabc\r\ndef";

        router.dispatch(&mut connection, data).await.unwrap();

        assert_eq!(received(client).await.as_bytes(), data);
    }

    #[tokio::test]
    async fn last_registration_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut router = Router::new();
        router.register("GET", "/", counting_handler(Arc::clone(&first)));
        router.register("GET", "/", counting_handler(Arc::clone(&second)));
        assert_eq!(router.len(), 1);

        let (_client, mut connection) = connection();
        router.dispatch(&mut connection, b"GET / HTTP/1.1\r\n\r\n").await.unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn routes_match_exactly() {
        let counter = Arc::new(AtomicUsize::new(0));
        let router = Router::new().route("GET", "/", counting_handler(Arc::clone(&counter)));

        assert!(router.handler("GET", "/").is_some());
        assert!(router.handler("get", "/").is_none());
        assert!(router.handler("GET", "/index.html").is_none());
        assert!(router.handler("POST", "/").is_none());
    }

    #[tokio::test]
    async fn unmatched_get_is_not_found() {
        let counter = Arc::new(AtomicUsize::new(0));
        let router = Router::new().route("GET", "/", counting_handler(Arc::clone(&counter)));
        let (client, mut connection) = connection();

        router.dispatch(&mut connection, b"GET /missing HTTP/1.1\r\n\r\n").await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(connection.is_closed());
        assert_eq!(received(client).await, "HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[tokio::test]
    async fn unmatched_empty_method_is_not_found() {
        let router = Router::new();
        let (client, mut connection) = connection();

        // the empty method is rewritten to GET by the parser
        router.dispatch(&mut connection, b" /missing HTTP/1.1\r\n\r\n").await.unwrap();

        assert_eq!(received(client).await, "HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[tokio::test]
    async fn unmatched_post_closes_without_response() {
        let router = Router::new();
        let (client, mut connection) = connection();

        let error = router.dispatch(&mut connection, b"POST /missing HTTP/1.1\r\n\r\n").await.unwrap_err();

        match error {
            DispatchError::NoHandler { method, target } => {
                assert_eq!(method, "POST");
                assert_eq!(target, "/missing");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(connection.is_closed());
        assert_eq!(received(client).await, "");
    }

    #[tokio::test]
    async fn parse_failure_leaves_connection_open() {
        let router = Router::new();
        let (_client, mut connection) = connection();

        let error = router.dispatch(&mut connection, b"GET / HTTP/1.1\r\nNoColon\r\n\r\n").await.unwrap_err();

        assert!(matches!(error, DispatchError::Parse { source: ParseError::InvalidHeader { .. } }));
        assert!(!connection.is_closed());

        let error = router.dispatch(&mut connection, b"").await.unwrap_err();
        assert!(matches!(error, DispatchError::Parse { source: ParseError::NoStartLine }));
        assert!(!connection.is_closed());
    }

    #[tokio::test]
    async fn handler_error_is_reported() {
        let router = Router::new().route(
            "GET",
            "/fail",
            make_handler(|_connection, _data| Box::pin(async { Err::<(), BoxError>("boom".into()) })),
        );
        let (_client, mut connection) = connection();

        let error = router.dispatch(&mut connection, b"GET /fail HTTP/1.1\r\n\r\n").await.unwrap_err();

        assert!(matches!(error, DispatchError::Handler { .. }));
        assert_eq!(error.to_string(), "handler error: boom");
    }
}
