//! Request routing
//!
//! A [`Router`] maps a method and a path to a [`RequestHandler`]. Patterns are
//! `/` separated segments, each either literal text or a `:name` parameter
//! capture. A literal segment always takes precedence over a parameter at the
//! same position, and a parameter never captures an empty segment.
//!
//! Routes are registered once before serving; the router is then only read,
//! so it can be shared between connections without locking.
//!
//! # Example
//!
//! ```
//! use slim_web::handler_fn;
//! use slim_web::router::{get, Router};
//! use slim_http::protocol::Method;
//!
//! let router = Router::builder()
//!     .route("/echo/:msg", get(handler_fn(|request, response| {
//!         let msg = request.params().get("msg").unwrap_or_default().to_string();
//!         response.set_body(msg);
//!     })))
//!     .build();
//!
//! let (_handler, params) = router.resolve(Method::Get, "/echo/hello").unwrap();
//! assert_eq!(params.get("msg"), Some("hello"));
//! ```

mod segment_tree;

use std::fmt;

use slim_http::protocol::{Method, PathParams};
use tracing::warn;

use crate::handler::RequestHandler;
use segment_tree::SegmentTree;

/// Main router structure that handles HTTP request routing
pub struct Router {
    tree: SegmentTree<Box<dyn RequestHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { tree: SegmentTree::new() }
    }

    /// Creates a new router builder
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Registers `handler` for `method` at `pattern`.
    ///
    /// Registering the same method and pattern again replaces the earlier handler.
    pub fn register<H: RequestHandler + 'static>(&mut self, method: Method, pattern: &str, handler: H) -> &mut Self {
        self.insert(method, pattern, Box::new(handler));
        self
    }

    fn insert(&mut self, method: Method, pattern: &str, handler: Box<dyn RequestHandler>) {
        if self.tree.insert(method, pattern, handler).is_some() {
            warn!(%method, pattern, "route registered twice, the earlier handler is replaced");
        }
    }

    /// Looks up the handler for `method` at `path` and the parameters it captured.
    ///
    /// Returns `None` when nothing matches, including when the path is only
    /// registered under other methods.
    pub fn resolve(&self, method: Method, path: &str) -> Option<(&dyn RequestHandler, PathParams)> {
        self.tree.search(method, path).map(|(handler, params)| (handler.as_ref(), params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct RouterBuilder {
    routes: Vec<(String, RouterItemBuilder)>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn route(mut self, route: impl Into<String>, item_builder: RouterItemBuilder) -> Self {
        self.routes.push((route.into(), item_builder));
        self
    }

    /// Builds the router, registering routes in the order they were added
    pub fn build(self) -> Router {
        let mut router = Router::new();
        for (pattern, item) in self.routes {
            router.insert(item.method, &pattern, item.handler);
        }
        router
    }
}

/// A handler bound to a method, waiting for its path in [`RouterBuilder::route`]
pub struct RouterItemBuilder {
    method: Method,
    handler: Box<dyn RequestHandler>,
}

impl fmt::Debug for RouterItemBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterItemBuilder").field("method", &self.method).finish_non_exhaustive()
    }
}

macro_rules! method_router_item {
    ($fn_name:ident, $method:expr) => {
        pub fn $fn_name<H: RequestHandler + 'static>(handler: H) -> RouterItemBuilder {
            RouterItemBuilder { method: $method, handler: Box::new(handler) }
        }
    };
}

method_router_item!(get, Method::Get);
method_router_item!(post, Method::Post);
method_router_item!(put, Method::Put);
method_router_item!(patch, Method::Patch);
method_router_item!(delete, Method::Delete);
