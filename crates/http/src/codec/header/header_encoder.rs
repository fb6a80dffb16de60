//! HTTP header encoder implementation for serializing HTTP response heads
//!
//! This module encodes the status line and header block of a response into raw
//! bytes. The body framing headers follow the [`PayloadSize`] handed in:
//!
//! - `Length(n)`: `Content-Length: n` unless the handler already set one
//! - `Chunked`: `Transfer-Encoding: chunked`, any `Content-Length` is removed
//! - `Empty`: `Content-Length: 0` unless already set
//!
//! Header emission order follows the `HeaderMap` and is not significant.

use crate::BytesWriter;
use crate::protocol::{PayloadSize, ResponseHead, SendError};

use bytes::{BufMut, BytesMut};

use http::{HeaderValue, header};
use std::io::Write;
use tokio_util::codec::Encoder;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

const CHUNKED_VALUE: HeaderValue = HeaderValue::from_static("chunked");
const ZERO_VALUE: HeaderValue = HeaderValue::from_static("0");

/// Encoder for HTTP response heads implementing the [`Encoder`] trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderEncoder;

impl Encoder<(ResponseHead, PayloadSize)> for HeaderEncoder {
    type Error = SendError;

    /// Encodes the status line and headers into the provided bytes buffer.
    ///
    /// # Errors
    ///
    /// Returns error if writing to the buffer fails
    fn encode(&mut self, item: (ResponseHead, PayloadSize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (mut head, payload_size) = item;

        dst.reserve(INIT_HEADER_SIZE);
        write!(BytesWriter(dst), "HTTP/1.1 {} {}\r\n", head.status().code(), head.status().reason())?;

        // Set appropriate content length or transfer encoding header
        let headers = head.headers_mut();
        match payload_size {
            PayloadSize::Length(n) => {
                headers.entry(header::CONTENT_LENGTH).or_insert_with(|| n.into());
            }
            PayloadSize::Chunked => {
                headers.remove(header::CONTENT_LENGTH);
                headers.insert(header::TRANSFER_ENCODING, CHUNKED_VALUE);
            }
            PayloadSize::Empty => {
                headers.entry(header::CONTENT_LENGTH).or_insert(ZERO_VALUE);
            }
        }

        // Write all headers
        for (header_name, header_value) in head.headers().iter() {
            dst.put_slice(header_name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
