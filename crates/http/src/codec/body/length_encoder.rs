use crate::protocol::{PayloadItem, SendError};
use bytes::BytesMut;
use tokio_util::codec::Encoder;
use tracing::warn;

/// Copies body bytes unchanged, the `Content-Length` header delimits them.
///
/// A body that turns out longer or shorter than announced is still written,
/// with a warning, since the head is already out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthEncoder {
    remaining: u64,
    eof: bool,
}

impl LengthEncoder {
    pub fn new(length: u64) -> Self {
        Self { remaining: length, eof: false }
    }

    pub fn is_finish(&self) -> bool {
        self.eof
    }
}

impl Encoder<PayloadItem> for LengthEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            PayloadItem::Chunk(bytes) => {
                let len = bytes.len() as u64;
                if len > self.remaining {
                    warn!(remaining = self.remaining, chunk = len, "payload exceeds the announced length");
                }
                self.remaining = self.remaining.saturating_sub(len);
                dst.extend_from_slice(&bytes);
            }
            PayloadItem::Eof => {
                if self.remaining > 0 {
                    warn!(missing = self.remaining, "payload shorter than the announced length");
                }
                self.eof = true;
            }
        }
        Ok(())
    }
}
