/// HTTP status codes produced by the server.
///
/// - `Ok` (200): Request successful
/// - `Created` (201): File written
/// - `BadRequest` (400): Request line could not be decoded
/// - `NotFound` (404): Unknown route, missing file or no served directory
/// - `InternalServerError` (500): I/O failure while serving a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use tinyhttp::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the canonical English reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use tinyhttp::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Describes the outgoing header block.
///
/// An empty `content_type` means the response has no header block at all,
/// and therefore no body. `content_length` must match the bytes actually
/// sent, after any content encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeader {
    pub content_type: String,
    pub content_encoding: String,
    pub content_length: usize,
    pub close_connection: bool,
}

impl ResponseHeader {
    /// Encodes the header block, each line CRLF-terminated.
    ///
    /// Order is fixed: `Content-Encoding` (if set), `Content-Type`,
    /// `Content-Length`, then `Connection: close` (if requested). Returns
    /// `None` when there is no content type.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        if self.content_type.is_empty() {
            return None;
        }

        let mut buf = Vec::with_capacity(96);
        if !self.content_encoding.is_empty() {
            let line = format!("Content-Encoding: {}\r\n", self.content_encoding);
            buf.extend_from_slice(line.as_bytes());
        }
        buf.extend_from_slice(format!("Content-Type: {}\r\n", self.content_type).as_bytes());
        buf.extend_from_slice(format!("Content-Length: {}\r\n", self.content_length).as_bytes());
        if self.close_connection {
            buf.extend_from_slice(b"Connection: close\r\n");
        }

        Some(buf)
    }
}

/// A response ready to be composed into bytes and written once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Header block description
    pub header: ResponseHeader,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// A response with no header block and no body.
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            header: ResponseHeader::default(),
            body: Vec::new(),
        }
    }

    /// A response carrying `body` with the given content type.
    ///
    /// `Content-Length` is derived from the body.
    pub fn with_body(status: StatusCode, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self {
            status,
            header: ResponseHeader {
                content_type: content_type.to_string(),
                content_encoding: String::new(),
                content_length: body.len(),
                close_connection: false,
            },
            body,
        }
    }

    /// Creates a 200 OK `text/plain` response.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::with_body(StatusCode::Ok, TEXT_PLAIN, body)
    }

    /// Creates an empty 404 Not Found response.
    pub fn not_found() -> Self {
        Self::empty(StatusCode::NotFound)
    }

    /// Creates an empty 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::empty(StatusCode::BadRequest)
    }

    /// Sets the connection close directive.
    pub fn close(mut self, close: bool) -> Self {
        self.header.close_connection = close;
        self
    }

    /// Whether a header block will be emitted.
    pub fn has_header_block(&self) -> bool {
        !self.header.content_type.is_empty()
    }
}
