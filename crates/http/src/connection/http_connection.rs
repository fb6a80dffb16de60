use std::sync::Arc;

use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::FramedRead;
use tracing::{debug, error, info};

use crate::codec::RequestDecoder;
use crate::connection::response_writer::{ConnectionState, ResponseWriter};
use crate::handler::Handler;
use crate::protocol::{HttpError, Status};

/// Initial capacity of the read buffer
const READ_BUFFER_SIZE: usize = 8 * 1024;

/// An HTTP connection that serves requests one after another
///
/// `HttpConnection` handles the full lifecycle of a connection:
/// - Reading and decoding requests
/// - Passing each request to the handler
/// - Writing the response and deciding whether to keep the connection alive
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    response_writer: ResponseWriter<W>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(), READ_BUFFER_SIZE),
            response_writer: ResponseWriter::new(writer),
        }
    }

    /// Serves requests until the peer goes away or a response closes the connection.
    ///
    /// A request that can't be parsed is answered with `400 Bad Request` before the
    /// parse error is returned.
    pub async fn process<H: Handler + ?Sized>(mut self, handler: Arc<H>) -> Result<(), HttpError> {
        loop {
            let mut request = match self.framed_read.next().await {
                Some(Ok(request)) => request,

                Some(Err(e)) => {
                    error!(cause = %e, "can't receive next request");
                    self.response_writer.write_rejection(Status::BadRequest).await?;
                    self.response_writer.shutdown().await?;
                    return Err(e.into());
                }

                None => {
                    info!("cant read more request, break this connection down");
                    return Ok(());
                }
            };

            debug!(method = %request.method(), target = request.target(), "receive request");
            let response = handler.call(&mut request).await;

            match self.response_writer.write(&request, response).await? {
                ConnectionState::KeepAlive => continue,
                ConnectionState::Close => {
                    self.response_writer.shutdown().await?;
                    return Ok(());
                }
            }
        }
    }
}
