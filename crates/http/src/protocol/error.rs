use std::io;
use thiserror::Error;

/// Why a connection stopped being served.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// A request that could not be read off the wire.
///
/// Every variant is fatal for the connection: the stream position is unknown
/// afterwards, so no further request can be framed from it.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("empty request line")]
    EmptyRequestLine,

    /// the request line is not `method target version`
    #[error("malformed request line: {line:?}")]
    MalformedRequestLine { line: String },

    #[error("unsupported http version: {version:?}")]
    UnsupportedVersion { version: String },

    #[error("unknown method: {method:?}")]
    InvalidMethod { method: String },

    #[error("request head is {current_size} bytes, the limit is {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("invalid content-length: {reason}")]
    InvalidContentLength { reason: String },

    /// the peer closed the stream before the announced body was complete
    #[error("incomplete body, expected {expected} bytes but received {received}")]
    IncompleteBody { expected: u64, received: u64 },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_request_line(line: impl Into<String>) -> Self {
        Self::MalformedRequestLine { line: line.into() }
    }

    pub fn unsupported_version(version: impl Into<String>) -> Self {
        Self::UnsupportedVersion { version: version.into() }
    }

    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidMethod { method: method.into() }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn invalid_content_length(reason: impl Into<String>) -> Self {
        Self::InvalidContentLength { reason: reason.into() }
    }

    pub fn incomplete_body(expected: u64, received: u64) -> Self {
        Self::IncompleteBody { expected, received }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

/// A response that could not be written completely.
#[derive(Error, Debug)]
pub enum SendError {
    /// The body stream failed part way through; the chunked terminator was not written.
    #[error("body stream truncated after {written} bytes: {source}")]
    TruncatedBody { written: u64, source: io::Error },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn truncated_body(written: u64, source: io::Error) -> Self {
        Self::TruncatedBody { written, source }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
