//! HTTP head processing module
//!
//! - [`HeaderDecoder`]: parses the request line and header block of a request
//! - [`HeaderEncoder`]: writes the status line and header block of a response,
//!   including the `Content-Length` / `Transfer-Encoding` framing headers

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
