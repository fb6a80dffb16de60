//! Helpers for building responses.

use http::HeaderValue;
use http::header::{CONTENT_TYPE, SERVER};
use mime::Mime;
use slim_http::protocol::{Response, Status};
use tracing::warn;

use crate::date::http_date;

/// Value of the `Server` header
pub const SERVER_NAME: &str = concat!("slim-http/", env!("CARGO_PKG_VERSION"));

/// Sets the `Content-Type` header from `mime`.
pub fn set_content_type(response: &mut Response, mime: &Mime) {
    match HeaderValue::from_str(mime.as_ref()) {
        Ok(value) => response.insert_header(CONTENT_TYPE, value),
        Err(e) => warn!(cause = %e, %mime, "can't use mime as content type"),
    }
}

/// A response with `status` and the headers every response carries.
pub(crate) fn prepare_response(status: Status) -> Response {
    let mut response = Response::new(status);
    response.insert_header(SERVER, HeaderValue::from_static(SERVER_NAME));
    if let Some(date) = http_date() {
        response.insert_header(http::header::DATE, date);
    }
    response
}

/// The answer to a request no route matched.
pub(crate) fn not_found() -> Response {
    let mut response = prepare_response(Status::NotFound);
    set_content_type(&mut response, &mime::TEXT_PLAIN);
    response.set_body("404 Not Found");
    response
}
