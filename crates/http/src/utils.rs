//! Utility macros used internally by the codec.

/// Returns early with an error if a condition is not met.
///
/// Like `assert!`, but returns `Err($error)` instead of panicking.
///
/// ```ignore
/// ensure!(head_end <= MAX_HEADER_BYTES, ParseError::too_large_header(head_end, MAX_HEADER_BYTES));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

/// `io::Write` over a `BytesMut`, for `write!` formatting straight into an output buffer.
pub(crate) struct BytesWriter<'a>(pub(crate) &'a mut bytes::BytesMut);

impl std::io::Write for BytesWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
