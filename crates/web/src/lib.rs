//! Routing and serving on top of `slim-http`
//!
//! - [`Router`]: a segment trie mapping a method and a path to a [`RequestHandler`]
//! - [`Server`]: accepts TCP connections and dispatches their requests through a router
//!
//! A handler receives the request with its path parameters bound and a
//! response prepared as `200 OK` with the `Server` and `Date` headers set.
//! Requests no route matches get `404 Not Found`.

mod date;
mod handler;
mod response;
mod server;

pub mod router;

pub use handler::FnHandler;
pub use handler::RequestHandler;
pub use handler::handler_fn;
pub use response::SERVER_NAME;
pub use response::set_content_type;
pub use router::Router;
pub use server::Server;
pub use server::ServerBuilder;
pub use server::ServerError;
