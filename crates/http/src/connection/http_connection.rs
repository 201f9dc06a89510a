use std::fmt;
use std::io;
use std::io::ErrorKind;

use futures::SinkExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::codec::FramedWrite;
use tracing::{debug, trace};

use crate::codec::ResponseEncoder;
use crate::protocol::StatusLine;

type BoxWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// The writing side of an accepted client connection.
///
/// A `Connection` is handed to request handlers, which own writing the
/// response and closing it. Closing is idempotent, so every exit path may
/// call [`Connection::close`] and the underlying stream is shut down once.
pub struct Connection {
    framed_write: FramedWrite<BoxWriter, ResponseEncoder>,
    closed: bool,
}

impl Connection {
    pub fn new<W>(writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let writer: BoxWriter = Box::new(writer);
        Self { framed_write: FramedWrite::new(writer, ResponseEncoder::new()), closed: false }
    }

    /// Writes a bodyless status line response and flushes it.
    pub async fn write_status(&mut self, status: StatusLine) -> io::Result<()> {
        self.ensure_open()?;
        trace!(status = %status.status(), "writing status line");
        self.framed_write.send(status).await
    }

    /// Writes raw bytes and flushes them.
    pub async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.ensure_open()?;
        SinkExt::<StatusLine>::flush(&mut self.framed_write).await?;

        let writer = self.framed_write.get_mut();
        writer.write_all(bytes).await?;
        writer.flush().await
    }

    /// Flushes pending output and shuts the stream down.
    ///
    /// Calling `close` on an already closed connection does nothing.
    pub async fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        SinkExt::<StatusLine>::flush(&mut self.framed_write).await?;
        self.framed_write.get_mut().shutdown().await?;
        debug!("connection closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::new(ErrorKind::NotConnected, "connection already closed"));
        }
        Ok(())
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").field("closed", &self.closed).finish_non_exhaustive()
    }
}
