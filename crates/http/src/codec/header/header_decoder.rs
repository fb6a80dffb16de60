//! HTTP request head decoder.
//!
//! Parses the request line and the header block of an HTTP/1.1 request out of a
//! byte buffer. Lines end with `\n`; a trailing `\r` is stripped. The decoder is
//! resumable: when the head is not yet complete it consumes nothing and asks for
//! more bytes.
//!
//! # Rules
//!
//! - The request line must be non-empty, made of exactly three whitespace
//!   separated tokens, and carry the version `HTTP/1.1`
//! - A header line splits on its first `:`; name and value are trimmed
//! - Header lines without `:` or with illegal characters are skipped, not fatal
//! - Duplicate header names keep the last value
//! - `Content-Length` is only honoured for methods that may carry a body
//!
//! # Limits
//!
//! - Maximum size of request line plus header block: 8KB

use bytes::BytesMut;
use http::{HeaderMap, HeaderName, HeaderValue};
use tokio_util::codec::Decoder;
use tracing::{trace, warn};

use crate::ensure;
use crate::protocol::{HTTP_11, Method, ParseError, PayloadSize, Request};

/// Maximum size in bytes allowed for the request line and header block together
const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Decoder for the head of an HTTP request implementing the [`Decoder`] trait.
///
/// Yields a bodyless [`Request`] together with the [`PayloadSize`] announced by
/// its headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderDecoder;

impl Decoder for HeaderDecoder {
    type Item = (Request, PayloadSize);
    type Error = ParseError;

    /// Attempts to decode a request head from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((request, payload_size)))` if a complete head was parsed
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if the request line is invalid, the head is too large
    ///   or `Content-Length` is not a non-negative integer
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(request_line_end) = find_line_end(src, 0) else {
            ensure!(src.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
            return Ok(None);
        };

        // fail fast, there is no point in waiting for headers behind an empty request line
        ensure!(!trim_line(&src[..request_line_end]).is_empty(), ParseError::EmptyRequestLine);

        let Some(head_end) = find_head_end(src, request_line_end + 1) else {
            ensure!(src.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
            return Ok(None);
        };
        ensure!(head_end <= MAX_HEADER_BYTES, ParseError::too_large_header(head_end, MAX_HEADER_BYTES));
        trace!(head_size = head_end, "parsed head size");

        let head = src.split_to(head_end).freeze();
        let mut lines = head.split(|b| *b == b'\n').map(trim_line);

        let (method, target, version) = parse_request_line(lines.next().unwrap_or_default())?;

        let mut headers = HeaderMap::new();
        for line in lines.take_while(|line| !line.is_empty()) {
            parse_header_line(line, &mut headers);
        }

        let request = Request::from_parts(method, target, version, headers);
        let payload_size = parse_payload(&request)?;

        Ok(Some((request, payload_size)))
    }
}

/// Returns the index of the `\n` ending the line that starts at `from`.
#[inline]
fn find_line_end(bytes: &[u8], from: usize) -> Option<usize> {
    bytes[from..].iter().position(|b| *b == b'\n').map(|offset| from + offset)
}

/// Walks header lines from `from` and returns the offset just past the blank line
/// that terminates the header block.
fn find_head_end(bytes: &[u8], mut from: usize) -> Option<usize> {
    loop {
        let line_end = find_line_end(bytes, from)?;
        if trim_line(&bytes[from..line_end]).is_empty() {
            return Some(line_end + 1);
        }
        from = line_end + 1;
    }
}

#[inline]
fn trim_line(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn parse_request_line(line: &[u8]) -> Result<(Method, String, String), ParseError> {
    let line = std::str::from_utf8(line).map_err(|e| {
        warn!(cause = %e, "request line is not utf-8");
        ParseError::malformed_request_line(String::from_utf8_lossy(line))
    })?;

    let tokens = line.split_ascii_whitespace().collect::<Vec<_>>();
    let &[method, target, version] = tokens.as_slice() else {
        return Err(ParseError::malformed_request_line(line));
    };

    ensure!(version == HTTP_11, ParseError::unsupported_version(version));
    let method = Method::try_from(method)?;

    Ok((method, target.to_string(), version.to_string()))
}

/// Parses one header line into `headers`, skipping it with a warning when malformed.
fn parse_header_line(line: &[u8], headers: &mut HeaderMap) {
    let Some(colon) = line.iter().position(|b| *b == b':') else {
        warn!(line = %String::from_utf8_lossy(line), "skipping malformed header line");
        return;
    };

    let name = line[..colon].trim_ascii();
    let value = line[colon + 1..].trim_ascii();

    match (HeaderName::from_bytes(name), HeaderValue::from_bytes(value)) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => {
            warn!(line = %String::from_utf8_lossy(line), "skipping header line with illegal characters");
        }
    }
}

/// Determines how the request body is framed.
///
/// Only `Content-Length` bodies are supported, and only for methods that may
/// carry one. Everything else has an empty payload.
fn parse_payload(request: &Request) -> Result<PayloadSize, ParseError> {
    if !request.method().may_have_body() {
        return Ok(PayloadSize::Empty);
    }

    let Some(cl_value) = request.headers().get(http::header::CONTENT_LENGTH) else {
        return Ok(PayloadSize::Empty);
    };

    let cl_str = cl_value.to_str().map_err(|e| ParseError::invalid_content_length(format!("value is not visible ascii: {e}")))?;
    let length = cl_str.trim().parse::<u64>().map_err(|e| ParseError::invalid_content_length(format!("value {cl_str} is not u64: {e}")))?;

    Ok(PayloadSize::Length(length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_bytes_mut_lens() {
        let str = indoc! {r##"
        POST /files/a.txt HTTP/1.1
        Host: 127.0.0.1:4221
        Content-Length: 3

        123"##};

        let mut bytes = BytesMut::from(str);

        let (request, payload_size) = HeaderDecoder.decode(&mut bytes).unwrap().unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(payload_size, PayloadSize::Length(3));
        assert_eq!(&bytes[..], &b"123"[..]);
    }

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##};

        let mut buf = BytesMut::from(str);

        let (request, payload_size) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert!(payload_size.is_empty());
        assert!(buf.is_empty());

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.version(), "HTTP/1.1");
        assert_eq!(request.target(), "/index.html");
        assert_eq!(request.headers().len(), 3);
        assert_eq!(request.header_str(http::header::HOST), Some("127.0.0.1:8080"));
        assert_eq!(request.header_str(http::header::USER_AGENT), Some("curl/7.79.1"));
        assert_eq!(request.header_str(http::header::ACCEPT), Some("*/*"));
    }

    #[test]
    fn crlf_line_endings() {
        let mut buf = BytesMut::from(&b"GET /echo/abc HTTP/1.1\r\nHost: x\r\nAccept-Encoding:  gzip  \r\n\r\n"[..]);

        let (request, _) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert_eq!(request.target(), "/echo/abc");
        assert_eq!(request.header_str("host"), Some("x"));
        assert_eq!(request.header_str(http::header::ACCEPT_ENCODING), Some("gzip"));
        assert!(buf.is_empty());
    }

    #[test]
    fn partial_head_needs_more() {
        let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: x\r\n"[..]);
        assert!(HeaderDecoder.decode(&mut buf).unwrap().is_none());
        // nothing consumed until the head is complete
        assert_eq!(buf.len(), 25);

        buf.extend_from_slice(b"\r\n");
        assert!(HeaderDecoder.decode(&mut buf).unwrap().is_some());
    }

    #[test]
    fn empty_request_line() {
        let mut buf = BytesMut::from(&b"\r\nHost: x\r\n\r\n"[..]);
        assert!(matches!(HeaderDecoder.decode(&mut buf), Err(ParseError::EmptyRequestLine)));
    }

    #[test]
    fn malformed_request_line() {
        let mut buf = BytesMut::from(&b"GET / HTTP/1.1 extra\r\nHost: x\r\n\r\n"[..]);
        assert!(matches!(HeaderDecoder.decode(&mut buf), Err(ParseError::MalformedRequestLine { .. })));

        let mut buf = BytesMut::from(&b"GET /\r\n\r\n"[..]);
        assert!(matches!(HeaderDecoder.decode(&mut buf), Err(ParseError::MalformedRequestLine { .. })));
    }

    #[test]
    fn unsupported_version() {
        let mut buf = BytesMut::from(&b"GET / HTTP/1.0\r\n\r\n"[..]);
        let result = HeaderDecoder.decode(&mut buf);
        assert!(matches!(result, Err(ParseError::UnsupportedVersion { version }) if version == "HTTP/1.0"));
    }

    #[test]
    fn unknown_method() {
        let mut buf = BytesMut::from(&b"HEAD / HTTP/1.1\r\n\r\n"[..]);
        assert!(matches!(HeaderDecoder.decode(&mut buf), Err(ParseError::InvalidMethod { .. })));
    }

    #[test]
    fn malformed_header_line_is_skipped() {
        let str = indoc! {r##"
        GET / HTTP/1.1
        Host: x
        this line has no colon
        Bad Name: y
        X-Trace: a:b:c

        "##};
        let mut buf = BytesMut::from(str);

        let (request, _) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.header_str("x-trace"), Some("a:b:c"));
    }

    #[test]
    fn duplicate_header_last_wins() {
        let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\nX-Id: 1\r\nx-id: 2\r\n\r\n"[..]);

        let (request, _) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert_eq!(request.headers().get_all("x-id").iter().count(), 1);
        assert_eq!(request.header_str("X-Id"), Some("2"));
    }

    #[test]
    fn content_length_ignored_for_get() {
        let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\nContent-Length: abc\r\n\r\n"[..]);
        let (_, payload_size) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();
        assert!(payload_size.is_empty());
    }

    #[test]
    fn content_length_error_carries_the_cause() {
        let mut buf = BytesMut::from(&b"POST / HTTP/1.1\r\nContent-Length: 12ab\r\n\r\n"[..]);
        let error = HeaderDecoder.decode(&mut buf).unwrap_err();
        assert_eq!(error.to_string(), "invalid content-length: value 12ab is not u64: invalid digit found in string");
    }

    #[test]
    fn non_utf8_request_line() {
        let mut buf = BytesMut::from(&b"GET /\xff HTTP/1.1\r\n\r\n"[..]);
        assert!(matches!(HeaderDecoder.decode(&mut buf), Err(ParseError::MalformedRequestLine { .. })));
    }

    #[test]
    fn invalid_content_length() {
        let mut buf = BytesMut::from(&b"POST / HTTP/1.1\r\nContent-Length: -1\r\n\r\n"[..]);
        assert!(matches!(HeaderDecoder.decode(&mut buf), Err(ParseError::InvalidContentLength { .. })));

        let mut buf = BytesMut::from(&b"POST / HTTP/1.1\r\nContent-Length: ten\r\n\r\n"[..]);
        assert!(matches!(HeaderDecoder.decode(&mut buf), Err(ParseError::InvalidContentLength { .. })));
    }

    #[test]
    fn too_large_header() {
        let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\n"[..]);
        for i in 0..1024 {
            buf.extend_from_slice(format!("X-Filler-{i}: value\r\n").as_bytes());
        }
        assert!(matches!(HeaderDecoder.decode(&mut buf), Err(ParseError::TooLargeHeader { .. })));
    }
}
