//! Units a response is cut into on its way to the encoder.

use bytes::Bytes;

use crate::protocol::{ResponseBody, ResponseHead};

/// What the response encoder consumes: one head, then body items up to [`PayloadItem::Eof`].
#[derive(Debug)]
pub enum Frame {
    Head(ResponseHead, PayloadSize),
    Body(PayloadItem),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem {
    Chunk(Bytes),
    Eof,
}

/// How a body is delimited on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// `Content-Length` framing
    Length(u64),
    /// `Transfer-Encoding: chunked` framing
    Chunked,
    /// No body, announced as `Content-Length: 0`
    Empty,
}

impl PayloadSize {
    /// The framing a body needs: streams are chunked, fixed bodies length-prefixed.
    pub fn of(body: &ResponseBody) -> Self {
        match body {
            ResponseBody::Empty => PayloadSize::Empty,
            ResponseBody::Full(bytes) => PayloadSize::Length(bytes.len() as u64),
            ResponseBody::Stream(_) => PayloadSize::Chunked,
        }
    }

    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, PayloadSize::Chunked)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadSize::Empty)
    }
}

impl From<Bytes> for Frame {
    fn from(bytes: Bytes) -> Self {
        Frame::Body(PayloadItem::Chunk(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_size_of_body() {
        assert_eq!(PayloadSize::of(&ResponseBody::Empty), PayloadSize::Empty);
        assert_eq!(PayloadSize::of(&ResponseBody::from("abc")), PayloadSize::Length(3));
        assert_eq!(PayloadSize::of(&ResponseBody::from("")), PayloadSize::Length(0));
        assert!(PayloadSize::of(&ResponseBody::stream(&b"abc"[..])).is_chunked());
        assert!(PayloadSize::of(&ResponseBody::Empty).is_empty());
        assert!(!PayloadSize::of(&ResponseBody::from("")).is_empty());
    }
}
