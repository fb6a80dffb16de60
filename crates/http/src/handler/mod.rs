//! Connection level request handlers.
//!
//! A [`Handler`] turns one parsed [`Request`] into a [`Response`]. The request is
//! lent mutably so that a router can attach path parameters in place; the
//! connection keeps ownership because the response writer still needs it.

use async_trait::async_trait;

use crate::protocol::{Request, Response};

#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, request: &mut Request) -> Response;
}

/// A [`Handler`] built from a plain function, see [`make_handler`].
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut Request) -> Response + Send + Sync,
{
    async fn call(&self, request: &mut Request) -> Response {
        (self.f)(request)
    }
}

pub fn make_handler<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut Request) -> Response + Send + Sync,
{
    HandlerFn { f }
}
