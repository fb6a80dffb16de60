//! Decoder for request bodies framed by the `Content-Length` header.
//!
//! The whole body is collected before it is handed out, so a request reaches
//! its handler complete or not at all.

use std::cmp;

use crate::protocol::ParseError;
use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

/// Upper bound for the up-front allocation, larger bodies grow as they arrive
const MAX_PREALLOCATE: u64 = 64 * 1024;

/// A decoder for handling HTTP bodies with a known content length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// The total number of bytes announced by `Content-Length`
    expected: u64,
    /// Bytes collected so far
    buffer: BytesMut,
}

impl LengthDecoder {
    /// Creates a new LengthDecoder expecting exactly `length` bytes.
    pub fn new(length: u64) -> Self {
        Self { expected: length, buffer: BytesMut::new() }
    }

    pub fn expected(&self) -> u64 {
        self.expected
    }

    pub fn received(&self) -> u64 {
        self.buffer.len() as u64
    }

    #[inline]
    fn remaining(&self) -> u64 {
        self.expected - self.received()
    }
}

impl Decoder for LengthDecoder {
    type Item = Bytes;
    type Error = ParseError;

    /// Moves up to the remaining number of bytes out of `src`.
    ///
    /// # Returns
    /// * `Ok(Some(bytes))` once all `expected` bytes have arrived
    /// * `Ok(None)` when more data is needed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let remaining = self.remaining();

        // fast path, the whole body is already buffered
        if self.buffer.is_empty() && src.len() as u64 >= remaining {
            return Ok(Some(src.split_to(remaining as usize).freeze()));
        }

        if src.is_empty() {
            return Ok(None);
        }

        if self.buffer.capacity() == 0 {
            self.buffer.reserve(cmp::min(remaining, MAX_PREALLOCATE) as usize);
        }

        let len = cmp::min(remaining, src.len() as u64) as usize;
        self.buffer.extend_from_slice(&src.split_to(len));

        if self.remaining() == 0 { Ok(Some(self.buffer.split().freeze())) } else { Ok(None) }
    }
}
