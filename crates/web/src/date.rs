//! `Date` header values, formatted as IMF-fixdate.

use http::HeaderValue;
use tracing::warn;

/// The current time as a `Date` header value.
pub(crate) fn http_date() -> Option<HeaderValue> {
    let mut buf = faf_http_date::get_date_buff_no_key();
    faf_http_date::get_date_no_key(&mut buf);
    HeaderValue::from_bytes(&buf).map_err(|e| warn!(cause = %e, "invalid date header value")).ok()
}
