//! Core HTTP message model.
//!
//! These are the shapes every other part of the pipeline reads and writes:
//!
//! - [`Request`] and [`PathParams`]: produced by the request decoder, completed by the router
//! - [`Response`], [`ResponseHead`] and [`ResponseBody`]: filled by handlers, consumed by the writer
//! - [`Method`] and [`Status`]: the closed sets of methods and status codes the server speaks
//! - [`Frame`], [`PayloadItem`] and [`PayloadSize`]: framing units handed to the encoder
//! - [`HttpError`], [`ParseError`] and [`SendError`]: failures of the pipeline

mod frame;
pub use frame::Frame;
pub use frame::PayloadItem;
pub use frame::PayloadSize;

mod method;
pub use method::Method;

mod status;
pub use status::Status;

mod request;
pub use request::HTTP_11;
pub use request::PathParams;
pub use request::Request;

mod response;
pub use response::BodyStream;
pub use response::Response;
pub use response::ResponseBody;
pub use response::ResponseHead;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
