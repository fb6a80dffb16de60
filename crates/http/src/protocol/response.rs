//! HTTP response representation.
//!
//! A [`Response`] is created right before a handler runs, filled in by the
//! handler and finally consumed by the response writer, which may still add
//! framing and encoding headers to its [`ResponseHead`].

use std::fmt;

use bytes::Bytes;
use http::header::AsHeaderName;
use http::{HeaderMap, HeaderValue};
use tokio::io::AsyncRead;

use crate::protocol::Status;

/// A lazily produced body, sent with chunked framing.
pub type BodyStream = Box<dyn AsyncRead + Send + Unpin>;

/// Status line and headers of a response, everything except the body.
#[derive(Debug, Clone, Default)]
pub struct ResponseHead {
    status: Status,
    headers: HeaderMap,
}

impl ResponseHead {
    pub fn new(status: Status, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

/// The body of a response.
///
/// A fixed body and a stream are mutually exclusive; choosing [`ResponseBody::Stream`]
/// forces `Transfer-Encoding: chunked` on the wire.
#[derive(Default)]
pub enum ResponseBody {
    #[default]
    Empty,
    Full(Bytes),
    Stream(BodyStream),
}

impl ResponseBody {
    pub fn stream<R: AsyncRead + Send + Unpin + 'static>(reader: R) -> Self {
        Self::Stream(Box::new(reader))
    }

    #[inline]
    pub fn is_stream(&self) -> bool {
        matches!(self, ResponseBody::Stream(_))
    }

    /// The fixed body bytes, `None` for an empty or streamed body.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ResponseBody::Full(bytes) => Some(bytes),
            ResponseBody::Empty | ResponseBody::Stream(_) => None,
        }
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Empty => f.write_str("Empty"),
            ResponseBody::Full(bytes) => f.debug_tuple("Full").field(bytes).finish(),
            ResponseBody::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<Bytes> for ResponseBody {
    fn from(bytes: Bytes) -> Self {
        ResponseBody::Full(bytes)
    }
}

impl From<Vec<u8>> for ResponseBody {
    fn from(bytes: Vec<u8>) -> Self {
        ResponseBody::Full(bytes.into())
    }
}

impl From<String> for ResponseBody {
    fn from(str: String) -> Self {
        ResponseBody::Full(str.into())
    }
}

impl From<&'static str> for ResponseBody {
    fn from(str: &'static str) -> Self {
        ResponseBody::Full(Bytes::from_static(str.as_bytes()))
    }
}

/// An HTTP response under construction.
#[derive(Debug, Default)]
pub struct Response {
    head: ResponseHead,
    body: ResponseBody,
}

impl Response {
    pub fn new(status: Status) -> Self {
        Self { head: ResponseHead::new(status, HeaderMap::new()), body: ResponseBody::Empty }
    }

    pub fn status(&self) -> Status {
        self.head.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.head.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.head.headers
    }

    /// Sets a header, replacing any previous value under the same name.
    pub fn insert_header<K: http::header::IntoHeaderName>(&mut self, name: K, value: HeaderValue) {
        self.head.headers.insert(name, value);
    }

    pub fn header_str<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.head.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<ResponseBody>) {
        self.body = body.into();
    }

    pub fn set_stream<R: AsyncRead + Send + Unpin + 'static>(&mut self, reader: R) {
        self.body = ResponseBody::stream(reader);
    }

    pub fn into_parts(self) -> (ResponseHead, ResponseBody) {
        (self.head, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_is_exclusive() {
        let mut response = Response::new(Status::Ok);
        response.set_body("hello");
        assert_eq!(response.body().as_bytes().map(|b| &b[..]), Some(&b"hello"[..]));

        response.set_stream(&b"streamed"[..]);
        assert!(response.body().is_stream());
        assert!(response.body().as_bytes().is_none());
    }

    #[test]
    fn test_default_is_ok_and_empty() {
        let response = Response::default();
        assert_eq!(response.status(), Status::Ok);
        assert!(matches!(response.body(), ResponseBody::Empty));
    }
}
