use bytes::Bytes;
use futures::SinkExt;
use http::HeaderValue;
use http::header::{CONNECTION, CONTENT_ENCODING, CONTENT_LENGTH};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::FramedWrite;
use tracing::{error, warn};

use crate::codec::ResponseEncoder;
use crate::codec::encoding::{self, GZIP};
use crate::protocol::{Frame, PayloadItem, PayloadSize, Request, Response, ResponseBody, ResponseHead, SendError, Status};

/// Size of the blocks read from a body stream, each one becomes a chunk
pub const STREAM_BLOCK_SIZE: usize = 8 * 1024;

/// Whether a connection may serve another request after a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    KeepAlive,
    Close,
}

impl ConnectionState {
    fn decide(wants_close: bool, status: Status) -> Self {
        if wants_close || status.is_error() { ConnectionState::Close } else { ConnectionState::KeepAlive }
    }

    fn header_value(self) -> HeaderValue {
        match self {
            ConnectionState::KeepAlive => HeaderValue::from_static("keep-alive"),
            ConnectionState::Close => HeaderValue::from_static("close"),
        }
    }
}

/// Serializes responses onto a byte sink.
///
/// Before anything is written the writer decides the connection lifetime,
/// picks the body framing and compresses fixed bodies when the client accepts gzip.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    framed_write: FramedWrite<W, ResponseEncoder>,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        Self { framed_write: FramedWrite::new(writer, ResponseEncoder::new()) }
    }

    pub fn into_inner(self) -> W {
        self.framed_write.into_inner()
    }

    /// Writes `response` as the answer to `request` and flushes the sink.
    ///
    /// A streamed body that fails midway is cut off without the terminating
    /// chunk, the caller must close the connection in that case.
    pub async fn write(&mut self, request: &Request, response: Response) -> Result<ConnectionState, SendError> {
        let state = ConnectionState::decide(request.wants_close(), response.status());
        self.write_with(state, request.accepts_gzip(), response).await
    }

    /// Writes a bodyless response that always closes the connection.
    ///
    /// Used when no request could be parsed to answer to.
    pub async fn write_rejection(&mut self, status: Status) -> Result<ConnectionState, SendError> {
        self.write_with(ConnectionState::Close, false, Response::new(status)).await
    }

    async fn write_with(&mut self, state: ConnectionState, accepts_gzip: bool, response: Response) -> Result<ConnectionState, SendError> {
        let (mut head, body) = response.into_parts();
        head.headers_mut().insert(CONNECTION, state.header_value());

        let body = match body {
            ResponseBody::Full(bytes) if accepts_gzip => ResponseBody::Full(compress(&mut head, bytes)),
            body => body,
        };

        self.framed_write.feed(Frame::Head(head, PayloadSize::of(&body))).await?;
        match body {
            ResponseBody::Empty => {}
            ResponseBody::Full(bytes) => self.framed_write.feed(Frame::from(bytes)).await?,
            ResponseBody::Stream(reader) => self.write_stream(reader).await?,
        }

        self.framed_write.send(Frame::Body(PayloadItem::Eof)).await?;
        Ok(state)
    }

    async fn write_stream<R: AsyncRead + Unpin>(&mut self, mut reader: R) -> Result<(), SendError> {
        let mut block = vec![0u8; STREAM_BLOCK_SIZE];
        let mut written = 0u64;

        loop {
            match reader.read(&mut block).await {
                Ok(0) => return Ok(()),
                Ok(n) => {
                    self.framed_write.send(Frame::from(Bytes::copy_from_slice(&block[..n]))).await?;
                    written += n as u64;
                }
                Err(e) => {
                    warn!(cause = %e, written, "body stream failed, response is truncated");
                    SinkExt::<Frame>::flush(&mut self.framed_write).await?;
                    return Err(SendError::truncated_body(written, e));
                }
            }
        }
    }

    /// Shuts down the write half of the underlying sink.
    pub async fn shutdown(&mut self) -> Result<(), SendError> {
        self.framed_write.get_mut().shutdown().await.map_err(SendError::io)
    }
}

/// Replaces `body` with its gzip form unless the handler already chose an encoding.
///
/// Any `Content-Length` set by the handler is rewritten to the compressed size.
/// Compression failures fall back to the original body.
fn compress(head: &mut ResponseHead, body: Bytes) -> Bytes {
    if head.headers().contains_key(CONTENT_ENCODING) {
        return body;
    }

    match encoding::gzip(&body) {
        Ok(compressed) => {
            let headers = head.headers_mut();
            headers.insert(CONTENT_ENCODING, HeaderValue::from_static(GZIP));
            headers.insert(CONTENT_LENGTH, HeaderValue::from(compressed.len()));
            compressed
        }
        Err(e) => {
            error!(cause = %e, "gzip failed, sending body uncompressed");
            body
        }
    }
}
