/// Response status codes emitted by the server.
///
/// The set is closed on purpose: a new code needs a variant here together with
/// its reason phrase.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Ok,
    Created,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Created => "Created",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::InternalServerError => "Internal Server Error",
        }
    }

    /// Error statuses force the connection closed after the response is sent
    #[inline]
    pub fn is_error(&self) -> bool {
        self.code() >= 400
    }
}
