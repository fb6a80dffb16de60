//! Application routes.
//!
//! - `GET /`: empty `200 OK`
//! - `GET /echo/:msg`: `msg` as plain text
//! - `GET /user-agent`: the `User-Agent` request header as plain text
//! - `GET /files/:name`: the file from the served directory
//! - `POST /files/:name`: stores the request body in the served directory
//! - `GET /stream/:name`: the file, sent as a chunked stream

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use http::header::USER_AGENT;
use slim_http::protocol::{Request, Response, Status};
use slim_web::router::{Router, get, post};
use slim_web::{RequestHandler, handler_fn, set_content_type};
use tokio::fs;
use tracing::{error, info, warn};

pub fn router(directory: PathBuf) -> Router {
    let directory = Arc::new(directory);

    Router::builder()
        .route("/", get(handler_fn(|_request: &Request, _response: &mut Response| {})))
        .route("/echo/:msg", get(handler_fn(echo)))
        .route("/user-agent", get(handler_fn(user_agent)))
        .route("/files/:name", get(ReadFile { directory: Arc::clone(&directory) }))
        .route("/files/:name", post(WriteFile { directory: Arc::clone(&directory) }))
        .route("/stream/:name", get(StreamFile { directory }))
        .build()
}

fn echo(request: &Request, response: &mut Response) {
    let msg = request.params().get("msg").unwrap_or_default();
    set_content_type(response, &mime::TEXT_PLAIN);
    response.set_body(msg.to_string());
}

fn user_agent(request: &Request, response: &mut Response) {
    let user_agent = request.header_str(USER_AGENT).unwrap_or_default();
    set_content_type(response, &mime::TEXT_PLAIN);
    response.set_body(user_agent.to_string());
}

/// Sets an error status with its reason as a plain text body.
fn fail(response: &mut Response, status: Status) {
    response.set_status(status);
    set_content_type(response, &mime::TEXT_PLAIN);
    response.set_body(format!("{} {}", status.code(), status.reason()));
}

/// Resolves the `name` parameter inside `directory`.
///
/// `None` for names that could leave the directory.
fn file_path(directory: &Path, request: &Request) -> Option<PathBuf> {
    let name = request.params().get("name")?;
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        warn!(name, "rejected file name");
        return None;
    }
    Some(directory.join(name))
}

fn fail_io(response: &mut Response, path: &Path, e: &io::Error) {
    if e.kind() == io::ErrorKind::NotFound {
        info!(path = %path.display(), "file not found");
        fail(response, Status::NotFound);
    } else {
        error!(path = %path.display(), cause = %e, "file access failed");
        fail(response, Status::InternalServerError);
    }
}

#[derive(Debug)]
struct ReadFile {
    directory: Arc<PathBuf>,
}

#[async_trait]
impl RequestHandler for ReadFile {
    async fn invoke(&self, request: &Request, response: &mut Response) {
        let Some(path) = file_path(&self.directory, request) else {
            return fail(response, Status::BadRequest);
        };

        match fs::read(&path).await {
            Ok(content) => {
                set_content_type(response, &mime::APPLICATION_OCTET_STREAM);
                response.set_body(content);
            }
            Err(e) => fail_io(response, &path, &e),
        }
    }
}

#[derive(Debug)]
struct WriteFile {
    directory: Arc<PathBuf>,
}

#[async_trait]
impl RequestHandler for WriteFile {
    async fn invoke(&self, request: &Request, response: &mut Response) {
        let Some(path) = file_path(&self.directory, request) else {
            return fail(response, Status::BadRequest);
        };
        let Some(body) = request.body() else {
            return fail(response, Status::BadRequest);
        };

        match fs::write(&path, body).await {
            Ok(()) => {
                info!(path = %path.display(), size = body.len(), "file written");
                response.set_status(Status::Created);
            }
            Err(e) => {
                error!(path = %path.display(), cause = %e, "file write failed");
                fail(response, Status::InternalServerError);
            }
        }
    }
}

#[derive(Debug)]
struct StreamFile {
    directory: Arc<PathBuf>,
}

#[async_trait]
impl RequestHandler for StreamFile {
    async fn invoke(&self, request: &Request, response: &mut Response) {
        let Some(path) = file_path(&self.directory, request) else {
            return fail(response, Status::BadRequest);
        };

        match fs::File::open(&path).await {
            Ok(file) => {
                set_content_type(response, &mime::APPLICATION_OCTET_STREAM);
                response.set_stream(file);
            }
            Err(e) => fail_io(response, &path, &e),
        }
    }
}
