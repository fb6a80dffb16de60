use crate::codec::body::chunked_encoder::ChunkedEncoder;
use crate::codec::body::length_encoder::LengthEncoder;
use crate::protocol::{PayloadItem, PayloadSize, SendError};
use bytes::BytesMut;
use tokio_util::codec::Encoder;

/// Body encoder for one response, selected by the framing announced in its head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadEncoder {
    Length(LengthEncoder),
    Chunked(ChunkedEncoder),
    /// drops every item, finished from the start
    NoBody,
}

impl PayloadEncoder {
    pub fn is_finish(&self) -> bool {
        match self {
            PayloadEncoder::Length(encoder) => encoder.is_finish(),
            PayloadEncoder::Chunked(encoder) => encoder.is_finish(),
            PayloadEncoder::NoBody => true,
        }
    }
}

impl From<PayloadSize> for PayloadEncoder {
    fn from(payload_size: PayloadSize) -> Self {
        match payload_size {
            PayloadSize::Length(size) => PayloadEncoder::Length(LengthEncoder::new(size)),
            PayloadSize::Chunked => PayloadEncoder::Chunked(ChunkedEncoder::new()),
            PayloadSize::Empty => PayloadEncoder::NoBody,
        }
    }
}

impl Encoder<PayloadItem> for PayloadEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match self {
            PayloadEncoder::Length(encoder) => encoder.encode(item, dst),
            PayloadEncoder::Chunked(encoder) => encoder.encode(item, dst),
            PayloadEncoder::NoBody => Ok(()),
        }
    }
}
