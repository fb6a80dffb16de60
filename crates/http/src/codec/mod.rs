//! Wire codecs for HTTP/1.1
//!
//! - [`RequestDecoder`] turns buffered bytes into a [`Request`](crate::protocol::Request),
//!   parsing the head first and then collecting a `Content-Length` body.
//!   It returns `Ok(None)` until a whole request is buffered.
//! - [`ResponseEncoder`] turns [`Frame`](crate::protocol::Frame)s into bytes: the
//!   head, then body items framed by length or in chunks.
//! - [`encoding`] compresses fixed bodies with gzip.
//!
//! Both codecs are meant to sit under `FramedRead` / `FramedWrite`:
//!
//! ```
//! use bytes::{Bytes, BytesMut};
//! use http::HeaderMap;
//! use slim_http::codec::{RequestDecoder, ResponseEncoder};
//! use slim_http::protocol::{Frame, PayloadItem, PayloadSize, ResponseHead, Status};
//! use tokio_util::codec::{Decoder, Encoder};
//!
//! let mut input = BytesMut::from(&b"GET /echo/hi HTTP/1.1\r\nHost: x\r\n\r\n"[..]);
//! let request = RequestDecoder::new().decode(&mut input).unwrap().unwrap();
//! assert_eq!(request.target(), "/echo/hi");
//!
//! let mut encoder = ResponseEncoder::new();
//! let mut output = BytesMut::new();
//! let head = ResponseHead::new(Status::Ok, HeaderMap::new());
//! encoder.encode(Frame::Head(head, PayloadSize::Length(2)), &mut output).unwrap();
//! encoder.encode(Frame::from(Bytes::from_static(b"hi")), &mut output).unwrap();
//! encoder.encode(Frame::Body(PayloadItem::Eof), &mut output).unwrap();
//! assert!(output.ends_with(b"\r\n\r\nhi"));
//! ```

mod body;
pub mod encoding;
mod header;
mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
