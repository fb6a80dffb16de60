use std::fmt;

use async_trait::async_trait;
use slim_http::protocol::{Request, Response};

/// A route handler.
///
/// It receives the request with its path parameters already bound and fills in
/// a response that was prepared with status `200 OK` and the default headers.
/// Failures are expressed by setting an error status on the response.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, request: &Request, response: &mut Response);
}

/// a plain `Fn` holder which acts as a [`RequestHandler`]
pub struct FnHandler<F> {
    f: F,
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&Request, &mut Response) + Send + Sync,
{
    FnHandler { f }
}

#[async_trait]
impl<F> RequestHandler for FnHandler<F>
where
    F: Fn(&Request, &mut Response) + Send + Sync,
{
    async fn invoke(&self, request: &Request, response: &mut Response) {
        (self.f)(request, response)
    }
}
