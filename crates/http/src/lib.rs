//! A small asynchronous HTTP/1.1 server core
//!
//! Requests are decoded off any `AsyncRead`, handed to a [`Handler`](handler::Handler)
//! and the responses written back to an `AsyncWrite`, one connection per
//! [`HttpConnection`](connection::HttpConnection). Routing, accepting sockets and
//! default headers live in the `slim-web` crate on top of this one.
//!
//! What the writer decides for every response:
//!
//! - `Connection`: `close` when the client asked for it or the status is an error, `keep-alive` otherwise
//! - framing: `Content-Length` for fixed bodies, `Transfer-Encoding: chunked` for streams
//! - compression: gzip for fixed bodies when the request's `Accept-Encoding` lists it
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use slim_http::connection::HttpConnection;
//! use slim_http::handler::make_handler;
//! use slim_http::protocol::{Request, Response, Status};
//! use tokio::net::TcpListener;
//! use tracing::warn;
//!
//! fn echo_target(request: &mut Request) -> Response {
//!     let mut response = Response::new(Status::Ok);
//!     response.set_body(request.target().to_string());
//!     response
//! }
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let handler = Arc::new(make_handler(echo_target));
//!
//!     loop {
//!         let (stream, _) = listener.accept().await?;
//!         let handler = Arc::clone(&handler);
//!         tokio::spawn(async move {
//!             let (reader, writer) = stream.into_split();
//!             if let Err(e) = HttpConnection::new(reader, writer).process(handler).await {
//!                 warn!(cause = %e, "connection ended with an error");
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! # Limitations
//!
//! - HTTP/1.1 only
//! - Request bodies must carry `Content-Length`, chunked requests are not decoded
//! - The request head may not exceed 8 KiB

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::{BytesWriter, ensure};
