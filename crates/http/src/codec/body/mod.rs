//! HTTP body handling module
//!
//! Request bodies are only ever framed by `Content-Length`; response bodies are
//! either length-prefixed or chunked.
//!
//! - [`LengthDecoder`]: collects a request body of known length
//! - [`PayloadEncoder`]: writes response payload items, delegating to a length
//!   or chunked encoder depending on the framing chosen for the response

mod chunked_encoder;
mod length_decoder;
mod length_encoder;
mod payload_encoder;

pub use length_decoder::LengthDecoder;
pub use payload_encoder::PayloadEncoder;
