//! Encoder for bodyless status line responses.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::protocol::StatusLine;

/// Initial buffer size reserved for a status line
const INIT_STATUS_LINE_SIZE: usize = 64;

/// Encodes a [`StatusLine`] as `<version> <code> <reason>\r\n\r\n`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<StatusLine> for ResponseEncoder {
    type Error = io::Error;

    fn encode(&mut self, item: StatusLine, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(INIT_STATUS_LINE_SIZE);
        write!(dst.writer(), "{} {} {}\r\n\r\n", item.version(), item.status().as_str(), item.reason())
    }
}
