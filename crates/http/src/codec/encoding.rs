//! Response body content encoding.
//!
//! Only gzip is offered, and only for fixed bodies: the whole body is
//! compressed at once so that `Content-Length` can describe the compressed size.

use bytes::{Bytes, BytesMut};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io;
use std::io::Write;
use tracing::trace;

/// Value of the `Content-Encoding` header for gzip bodies
pub const GZIP: &str = "gzip";

/// Compresses `data` into a complete gzip member.
pub fn gzip(data: &[u8]) -> io::Result<Bytes> {
    let mut encoder = GzEncoder::new(Writer::with_capacity(data.len() / 2 + 32), Compression::best());
    encoder.write_all(data)?;
    let writer = encoder.finish()?;
    trace!(original = data.len(), compressed = writer.buf.len(), "gzip body");
    Ok(writer.take())
}

// inspired by from actix-http
struct Writer {
    buf: BytesMut,
}

impl Writer {
    fn with_capacity(capacity: usize) -> Self {
        Self { buf: BytesMut::with_capacity(capacity) }
    }

    fn take(mut self) -> Bytes {
        self.buf.split().freeze()
    }
}

impl io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
