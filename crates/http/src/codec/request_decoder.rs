//! HTTP request decoder module
//!
//! Decodes complete [`Request`]s from a byte stream. Works in two phases:
//!
//! 1. Head parsing with [`HeaderDecoder`]
//! 2. Body collection with [`LengthDecoder`] when the head announced a `Content-Length`
//!
//! # Example
//!
//! ```no_run
//! use slim_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n"[..]);
//! let request = decoder.decode(&mut buffer);
//! ```

use crate::codec::body::LengthDecoder;
use crate::codec::header::HeaderDecoder;
use crate::protocol::{ParseError, PayloadSize, Request};
use bytes::BytesMut;
use std::io;
use tokio_util::codec::Decoder;

/// A decoder for HTTP requests that handles both head and body
///
/// # State Machine
///
/// The decoder keeps its state in the `pending` field:
/// - `None`: currently parsing a head
/// - `Some((request, decoder))`: head parsed, collecting its body
#[derive(Debug, Default)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    pending: Option<(Request, LengthDecoder)>,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Attempts to decode one complete request from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: a request, with its body if it announced one
    /// - `Ok(None)`: need more data to proceed
    /// - `Err(_)`: the request is malformed, the connection can't be reused
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.pending.is_none() {
            match self.header_decoder.decode(src)? {
                Some((request, PayloadSize::Length(length))) => {
                    self.pending = Some((request, LengthDecoder::new(length)));
                }
                Some((request, _)) => return Ok(Some(request)),
                None => return Ok(None),
            }
        }

        let Some((_, length_decoder)) = &mut self.pending else {
            return Ok(None);
        };

        match length_decoder.decode(src)? {
            Some(body) => {
                let request = self.pending.take().map(|(mut request, _)| {
                    request.set_body(body);
                    request
                });
                Ok(request)
            }
            None => Ok(None),
        }
    }

    /// Called once the underlying stream reached EOF
    ///
    /// A clean close between two requests is not an error; a close in the middle
    /// of a head or a body is.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(request) = self.decode(src)? {
            return Ok(Some(request));
        }

        if let Some((_, length_decoder)) = &self.pending {
            return Err(ParseError::incomplete_body(length_decoder.expected(), length_decoder.received()));
        }

        if src.is_empty() {
            Ok(None)
        } else {
            Err(ParseError::io(io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed in the middle of a request head")))
        }
    }
}
