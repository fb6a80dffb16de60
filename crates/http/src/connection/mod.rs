//! HTTP connection handling module
//!
//! # Components
//!
//! - [`HttpConnection`]: drives one connection, reading requests, calling the
//!   handler and writing responses until the connection is closed
//! - [`ResponseWriter`]: serializes a response, deciding the connection
//!   lifetime, the body framing and the content encoding

mod http_connection;
mod response_writer;

pub use http_connection::HttpConnection;
pub use response_writer::{ConnectionState, ResponseWriter, STREAM_BLOCK_SIZE};
