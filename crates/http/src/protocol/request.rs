//! HTTP request representation.
//!
//! A [`Request`] is produced once per parsed message by the request decoder and
//! then owned by the task serving the connection. The router fills in
//! [`PathParams`] before a handler sees it.

use std::collections::HashMap;

use bytes::Bytes;
use http::HeaderMap;
use http::header::AsHeaderName;

use crate::protocol::Method;

/// The only version accepted on the request line
pub const HTTP_11: &str = "HTTP/1.1";

/// A parsed HTTP/1.1 request.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    version: String,
    target: String,
    headers: HeaderMap,
    body: Option<Bytes>,
    params: PathParams,
}

impl Request {
    /// Creates a bodyless HTTP/1.1 request with no headers.
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self::from_parts(method, target.into(), HTTP_11.to_string(), HeaderMap::new())
    }

    pub(crate) fn from_parts(method: Method, target: String, version: String, headers: HeaderMap) -> Self {
        Self { method, version, target, headers, body: None, params: PathParams::empty() }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The raw request target as it appeared on the request line.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The target without its query string.
    pub fn path(&self) -> &str {
        match self.target.split_once('?') {
            Some((path, _query)) => path,
            None => &self.target,
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns a header value as `&str`, or `None` if it is absent or not visible ASCII.
    pub fn header_str<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// The body, present only when one was read off the wire.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    pub fn set_params(&mut self, params: PathParams) {
        self.params = params;
    }

    /// Whether the client asked for the connection to be closed after this exchange.
    pub fn wants_close(&self) -> bool {
        self.header_str(http::header::CONNECTION) == Some("close")
    }

    /// Whether the client listed gzip in `Accept-Encoding`.
    pub fn accepts_gzip(&self) -> bool {
        self.header_str(http::header::ACCEPT_ENCODING).is_some_and(|value| value.contains("gzip"))
    }
}

/// Named segments captured by the router, e.g. `id` in `/users/:id`.
///
/// Always present on a [`Request`]; empty when the matched route has no parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    inner: HashMap<String, String>,
}

impl PathParams {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Gets the value of a path parameter by its name
    #[inline]
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        self.inner.get(key.as_ref()).map(String::as_str)
    }

    /// Binds `key` to `value`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.inner.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<String> {
        self.inner.remove(key.as_ref())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self { inner: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_new_request_defaults() {
        let request = Request::new(Method::Get, "/index.html");
        assert_eq!(request.version(), HTTP_11);
        assert_eq!(request.target(), "/index.html");
        assert!(request.body().is_none());
        assert!(request.params().is_empty());
        assert!(!request.wants_close());
        assert!(!request.accepts_gzip());
    }

    #[test]
    fn test_connection_and_encoding_checks() {
        let mut request = Request::new(Method::Get, "/");
        request.headers_mut().insert(http::header::CONNECTION, HeaderValue::from_static("close"));
        request.headers_mut().insert(http::header::ACCEPT_ENCODING, HeaderValue::from_static("deflate, gzip"));

        assert!(request.wants_close());
        assert!(request.accepts_gzip());
    }

    #[test]
    fn test_path_drops_query() {
        assert_eq!(Request::new(Method::Get, "/echo/hi?lang=en").path(), "/echo/hi");
        assert_eq!(Request::new(Method::Get, "/echo/hi").path(), "/echo/hi");
    }

    #[test]
    fn test_path_params() {
        let mut params = PathParams::empty();
        assert_eq!(params.insert("id", "1"), None);
        assert_eq!(params.insert("id", "2"), Some("1".to_string()));
        assert_eq!(params.get("id"), Some("2"));
        assert_eq!(params.len(), 1);
        assert_eq!(params.remove("id"), Some("2".to_string()));
        assert!(params.is_empty());
    }
}
