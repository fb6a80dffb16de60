use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use async_trait::async_trait;
use slim_http::connection::HttpConnection;
use slim_http::handler::Handler;
use slim_http::protocol::{Request, Response, Status};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::response::{not_found, prepare_response};
use crate::router::Router;

#[derive(Debug)]
pub struct ServerBuilder {
    router: Option<Router>,
    address: Option<io::Result<Vec<SocketAddr>>>,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, address: None }
    }

    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(|addrs| addrs.collect()));
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    pub fn build(self) -> Result<Server, ServerError> {
        let router = self.router.ok_or(ServerError::MissingRouter)?;
        let address = self.address.ok_or(ServerError::MissingAddress)?.map_err(|source| ServerError::InvalidAddress { source })?;
        Ok(Server { router, address })
    }
}

/// Serves a [`Router`] over TCP, one task per connection.
#[derive(Debug)]
pub struct Server {
    router: Router,
    address: Vec<SocketAddr>,
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
    #[error("invalid address: {source}")]
    InvalidAddress { source: io::Error },
    #[error("bind server error: {source}")]
    Bind { source: io::Error },
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Binds the configured address and serves until the process ends.
    pub async fn start(self) -> Result<(), ServerError> {
        let tcp_listener = TcpListener::bind(self.address.as_slice()).await.map_err(|source| ServerError::Bind { source })?;
        self.serve(tcp_listener).await;
        Ok(())
    }

    /// Accepts connections from `tcp_listener` forever.
    ///
    /// Accept failures are logged and skipped.
    pub async fn serve(self, tcp_listener: TcpListener) {
        match tcp_listener.local_addr() {
            Ok(local_addr) => info!(%local_addr, "start listening"),
            Err(e) => warn!(cause = %e, "can't read listening address"),
        }

        let handler = Arc::new(self);
        loop {
            let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let handler = Arc::clone(&handler);

            tokio::spawn(async move {
                debug!(%remote_addr, "accept connection");
                let (reader, writer) = tcp_stream.into_split();
                let connection = HttpConnection::new(reader, writer);
                match connection.process(handler).await {
                    Ok(_) => {
                        info!(%remote_addr, "finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!(%remote_addr, "service has error, cause {}, connection shutdown", e);
                    }
                }
            });
        }
    }
}

#[async_trait]
impl Handler for Server {
    async fn call(&self, request: &mut Request) -> Response {
        let Some((handler, params)) = self.router.resolve(request.method(), request.path()) else {
            info!(method = %request.method(), path = request.path(), "no route matched");
            return not_found();
        };

        request.set_params(params);
        let mut response = prepare_response(Status::Ok);
        handler.invoke(request, &mut response).await;
        response
    }
}
