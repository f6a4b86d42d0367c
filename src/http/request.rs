use std::collections::HashMap;

/// HTTP request methods.
///
/// The router only distinguishes `POST` from everything else, but the
/// common verbs are kept as variants so logs and tests stay readable. Any
/// other token on the request line is carried as [`Method::Extension`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other method token, kept verbatim
    Extension(String),
}

/// A decoded HTTP request.
///
/// Built from a single buffered read by [`crate::http::parser::parse_http_request`]
/// and dropped once the router has produced a response.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request path, always starting with `/`
    pub path: String,
    /// HTTP version token (not interpreted)
    pub version: String,
    /// Request headers, names stored as received
    pub headers: HashMap<String, String>,
    /// Raw request body, NUL padding already trimmed
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Method {
    /// Parses a method token.
    ///
    /// Known verbs are matched case-sensitively; anything else non-empty
    /// becomes [`Method::Extension`]. An empty token yields `None`.
    ///
    /// # Example
    ///
    /// ```
    /// # use tinyhttp::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), Some(Method::Extension("get".into())));
    /// assert_eq!(Method::from_str(""), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let method = match s {
            "" => return None,
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Extension(other.to_string()),
        };
        Some(method)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Extension(token) => token,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let path = self.path.ok_or("path missing")?;
        if !path.starts_with('/') {
            return Err("path must start with '/'");
        }

        Ok(Request {
            method: self.method.unwrap_or(Method::GET),
            path,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn header(&self, key: &str) -> Option<&str> {
        if let Some(value) = self.headers.get(key) {
            return Some(value.as_str());
        }

        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// The `User-Agent` header, or an empty string when absent.
    pub fn user_agent(&self) -> &str {
        self.header("User-Agent").unwrap_or("")
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// HTTP/1.1 connections are persistent unless the client sends
    /// `Connection: close` (compared ignoring case).
    pub fn keep_alive(&self) -> bool {
        !self
            .header("Connection")
            .map(|v| v.trim().eq_ignore_ascii_case("close"))
            .unwrap_or(false)
    }

    /// Splits the path on `/`, keeping the leading empty segment.
    ///
    /// `/` yields `["", ""]` and `/echo/abc` yields `["", "echo", "abc"]`.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').collect()
    }
}
