use crate::codec::body::PayloadEncoder;
use crate::codec::header::HeaderEncoder;
use crate::protocol::{Frame, SendError};
use bytes::BytesMut;
use std::io;
use std::io::ErrorKind;
use tokio_util::codec::Encoder;
use tracing::error;

/// Encodes a response given as a [`Frame::Head`] followed by [`Frame::Body`] items.
///
/// The [`PayloadSize`](crate::protocol::PayloadSize) carried by the head selects
/// the body framing until the closing [`PayloadItem::Eof`](crate::protocol::PayloadItem::Eof).
/// Frames out of that order are rejected.
#[derive(Debug, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
    payload_encoder: Option<PayloadEncoder>,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Encoder<Frame> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match frame {
            Frame::Head(head, payload_size) => {
                if self.payload_encoder.is_some() {
                    error!("response head sent before the previous body ended");
                    return Err(io::Error::from(ErrorKind::InvalidInput).into());
                }

                self.header_encoder.encode((head, payload_size), dst)?;
                self.payload_encoder = Some(payload_size.into());
                Ok(())
            }

            Frame::Body(payload_item) => {
                let Some(payload_encoder) = &mut self.payload_encoder else {
                    error!("response body sent without a head");
                    return Err(io::Error::from(ErrorKind::InvalidInput).into());
                };

                payload_encoder.encode(payload_item, dst)?;
                if payload_encoder.is_finish() {
                    self.payload_encoder = None;
                }
                Ok(())
            }
        }
    }
}
