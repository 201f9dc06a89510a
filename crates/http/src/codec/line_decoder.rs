//! CRLF line scanning.
//!
//! The scanner splits a byte buffer into logical lines terminated by `\r\n`.
//! A line never contains its terminator, and a single trailing `\r` is
//! always dropped from the token, also for the last unterminated line.
//!
//! The scanning rule lives in the pure function [`next_line`]. Two drivers
//! are built on top of it:
//!
//! - [`Lines`]: a forward-only iterator over a fully materialized buffer
//! - [`LineDecoder`]: a [`Decoder`] for streaming input, where `decode` asks
//!   for more data on an unterminated line and `decode_eof` flushes it
//!
//! # Example
//!
//! ```
//! use line_http::codec::Lines;
//!
//! let lines: Vec<&[u8]> = Lines::new(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").collect();
//! assert_eq!(lines, vec![&b"GET / HTTP/1.1"[..], &b"Host: x"[..], &b""[..]]);
//! ```

use std::iter::FusedIterator;

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::protocol::ParseError;

const CRLF: &[u8] = b"\r\n";

/// Outcome of a single [`next_line`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineScan<'a> {
    /// A logical line, and the offset the next scan should start from.
    Line { line: &'a [u8], next: usize },
    /// No terminator found and more data may still arrive. Nothing was consumed.
    NeedMore,
    /// No bytes are left and no more will arrive.
    End,
}

/// Scans `buf` from `offset` for the next logical line.
///
/// - If `\r\n` is found at index `i`, the line is `buf[offset..i]` and
///   the scan continues at `i + 2`.
/// - Without a terminator, the rest of the buffer is the final line when
///   `at_end` is set, otherwise [`LineScan::NeedMore`] is returned. Calling
///   again with the same arguments yields the same result.
/// - An empty remainder with `at_end` set yields [`LineScan::End`].
pub fn next_line(buf: &[u8], offset: usize, at_end: bool) -> LineScan<'_> {
    let rest = buf.get(offset..).unwrap_or_default();

    if at_end && rest.is_empty() {
        return LineScan::End;
    }

    if let Some(index) = find_crlf(rest) {
        return LineScan::Line { line: drop_cr(&rest[..index]), next: offset + index + CRLF.len() };
    }

    if at_end {
        return LineScan::Line { line: drop_cr(rest), next: buf.len() };
    }

    LineScan::NeedMore
}

#[inline]
fn find_crlf(bytes: &[u8]) -> Option<usize> {
    bytes.windows(CRLF.len()).position(|window| window == CRLF)
}

/// Drops a single trailing `\r`.
#[inline]
fn drop_cr(bytes: &[u8]) -> &[u8] {
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

/// Forward-only iterator over the logical lines of a complete buffer.
///
/// The buffer is treated as final: an unterminated tail is yielded as the
/// last line. Once a region has been consumed it can't be visited again.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Lines<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The bytes not consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.buf.get(self.offset..).unwrap_or_default()
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        match next_line(self.buf, self.offset, true) {
            LineScan::Line { line, next } => {
                self.offset = next;
                Some(line)
            }
            // at_end is always set, so `NeedMore` can't be observed here
            LineScan::NeedMore | LineScan::End => None,
        }
    }
}

impl FusedIterator for Lines<'_> {}

/// Streaming line decoder implementing the [`Decoder`] trait.
///
/// Each decoded item is one logical line without its terminator. The
/// consumed bytes, terminator included, are split off the source buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineDecoder;

impl LineDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for LineDecoder {
    type Item = Bytes;
    type Error = ParseError;

    /// Decodes the next line, or returns `Ok(None)` if the buffer holds no
    /// complete line yet.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(split_line(src, false))
    }

    /// Decodes the next line once the input is exhausted; an unterminated
    /// tail is returned as the final line.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(split_line(src, true))
    }
}

fn split_line(src: &mut BytesMut, at_end: bool) -> Option<Bytes> {
    let (line_len, consumed) = match next_line(&src[..], 0, at_end) {
        LineScan::Line { line, next } => (line.len(), next),
        LineScan::NeedMore | LineScan::End => return None,
    };

    trace!(line_len, consumed, "decoded line");
    let mut line = src.split_to(consumed);
    line.truncate(line_len);
    Some(line.freeze())
}
