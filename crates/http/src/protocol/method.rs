use std::fmt;

use crate::protocol::ParseError;

/// The request methods this server understands.
///
/// Only exact upper-case tokens are accepted, anything else is rejected while
/// parsing the request line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Whether a request with this method is allowed to carry a `Content-Length` body
    #[inline]
    pub fn may_have_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl TryFrom<&str> for Method {
    type Error = ParseError;

    fn try_from(str: &str) -> Result<Self, Self::Error> {
        match str {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ParseError::invalid_method(str)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
