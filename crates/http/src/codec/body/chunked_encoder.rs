use crate::BytesWriter;
use crate::protocol::{PayloadItem, SendError};
use bytes::BytesMut;
use std::io::Write;
use tokio_util::codec::Encoder;

/// Writes each chunk as `<hex-length>\r\n<bytes>\r\n` and the end as `0\r\n\r\n`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChunkedEncoder {
    eof: bool,
}

impl ChunkedEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finish(&self) -> bool {
        self.eof
    }
}

impl Encoder<PayloadItem> for ChunkedEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if self.eof {
            return Ok(());
        }

        match item {
            // a zero sized chunk would end the body early
            PayloadItem::Chunk(bytes) if bytes.is_empty() => {}
            PayloadItem::Chunk(bytes) => {
                dst.reserve(bytes.len() + 12);
                write!(BytesWriter(dst), "{:X}\r\n", bytes.len())?;
                dst.extend_from_slice(&bytes);
                dst.extend_from_slice(b"\r\n");
            }
            PayloadItem::Eof => {
                self.eof = true;
                dst.extend_from_slice(b"0\r\n\r\n");
            }
        }
        Ok(())
    }
}
