//! TCP server built around a [`Router`].
//!
//! Each accepted connection is handed to its own tokio task, which performs a
//! single read of up to `read_buffer_size` bytes and dispatches it. The task
//! closes the connection if the dispatch path left it open.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};

use crate::connection::Connection;
use crate::dispatcher::Router;
use crate::protocol::ServerError;

/// Size of the single read performed on each connection.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

#[derive(Debug)]
pub struct ServerBuilder {
    router: Option<Router>,
    address: Option<io::Result<Vec<SocketAddr>>>,
    read_buffer_size: usize,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, address: None, read_buffer_size: DEFAULT_READ_BUFFER_SIZE }
    }

    #[must_use]
    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    #[must_use]
    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    #[must_use]
    pub fn read_buffer_size(mut self, read_buffer_size: usize) -> Self {
        self.read_buffer_size = read_buffer_size;
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?.map_err(|source| ServerBuildError::InvalidAddress { source })?;
        if self.read_buffer_size == 0 {
            return Err(ServerBuildError::ZeroReadBufferSize);
        }

        Ok(Server { router: Arc::new(router), address, read_buffer_size: self.read_buffer_size })
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
    #[error("invalid address: {source}")]
    InvalidAddress { source: io::Error },
    #[error("read buffer size must be greater than zero")]
    ZeroReadBufferSize,
}

#[derive(Debug)]
pub struct Server {
    router: Arc<Router>,
    address: Vec<SocketAddr>,
    read_buffer_size: usize,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Binds the configured address and serves connections until accepting
    /// on the listener is no longer possible.
    pub async fn start(self) -> Result<(), ServerError> {
        info!("start listening at {:?}", self.address);
        let tcp_listener = match TcpListener::bind(self.address.as_slice()).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return Err(ServerError::Bind { source: e });
            }
        };

        self.serve(tcp_listener).await;
        Ok(())
    }

    /// Serves connections from an already bound listener. Never returns.
    pub async fn serve(self, tcp_listener: TcpListener) {
        loop {
            let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };
            info!(%remote_addr, "accepted connection");

            let router = Arc::clone(&self.router);
            let read_buffer_size = self.read_buffer_size;

            tokio::spawn(async move {
                match process(&router, tcp_stream, read_buffer_size).await {
                    Ok(()) => {
                        info!(%remote_addr, "finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!(%remote_addr, cause = %e, "service has error, connection shutdown");
                    }
                }
            });
        }
    }
}

/// Reads one buffer from `tcp_stream` and dispatches it, closing the
/// connection afterwards if it is still open.
async fn process(router: &Router, tcp_stream: TcpStream, read_buffer_size: usize) -> Result<(), ServerError> {
    let (mut reader, writer) = tcp_stream.into_split();
    let mut connection = Connection::new(writer);

    let result = read_and_dispatch(router, &mut reader, &mut connection, read_buffer_size).await;

    if !connection.is_closed() {
        if let Err(e) = connection.close().await {
            warn!(cause = %e, "failed to close connection");
        }
    }

    result
}

async fn read_and_dispatch(
    router: &Router,
    reader: &mut OwnedReadHalf,
    connection: &mut Connection,
    read_buffer_size: usize,
) -> Result<(), ServerError> {
    let mut buf = vec![0u8; read_buffer_size];
    let amount = reader.read(&mut buf).await.map_err(|source| ServerError::Read { source })?;
    info!(amount, "read from connection");

    if amount == 0 {
        return Ok(());
    }

    router.dispatch(connection, &buf[..amount]).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_router_and_address() {
        let error = Server::builder().address("127.0.0.1:0").build().unwrap_err();
        assert!(matches!(error, ServerBuildError::MissingRouter));

        let error = Server::builder().router(Router::new()).build().unwrap_err();
        assert!(matches!(error, ServerBuildError::MissingAddress));

        let error = Server::builder().router(Router::new()).address("not an address").build().unwrap_err();
        assert!(matches!(error, ServerBuildError::InvalidAddress { .. }));
    }

    #[test]
    fn build_checks_read_buffer_size() {
        let error = Server::builder().router(Router::new()).address("127.0.0.1:0").read_buffer_size(0).build().unwrap_err();
        assert!(matches!(error, ServerBuildError::ZeroReadBufferSize));

        let server = Server::builder().router(Router::new()).address("127.0.0.1:4221").build().unwrap();
        assert_eq!(server.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
        assert_eq!(server.address, vec!["127.0.0.1:4221".parse::<SocketAddr>().unwrap()]);
    }
}
