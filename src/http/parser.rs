use crate::http::request::{Method, Request};
use std::collections::HashMap;

const CRLF: &[u8] = b"\r\n";
const HEADERS_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace or NUL padding was read
    Empty,
    /// The request line is not terminated by CRLF
    Incomplete,
    /// The request line is not valid UTF-8
    InvalidEncoding,
    /// Fewer than two space-separated tokens on the request line
    InvalidRequestLine,
    /// The path token does not start with `/`
    InvalidPath,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            ParseError::Empty => "empty request",
            ParseError::Incomplete => "request line not terminated",
            ParseError::InvalidEncoding => "request line is not valid UTF-8",
            ParseError::InvalidRequestLine => "malformed request line",
            ParseError::InvalidPath => "request path must start with '/'",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ParseError {}

/// Head of a request split into lines, plus whatever follows the blank line.
#[derive(Debug)]
pub struct RawRequest<'a> {
    pub request_line: &'a [u8],
    pub header_lines: Vec<&'a [u8]>,
    pub body: &'a [u8],
}

/// Decodes one request from a single buffered read.
///
/// Header lines without a colon are skipped. Trailing NUL bytes left over
/// from a fixed-size read buffer are trimmed from the body.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let raw = split_lines(buf)?;

    let request_line =
        std::str::from_utf8(raw.request_line).map_err(|_| ParseError::InvalidEncoding)?;
    let (method, path, version) = parse_request_line(request_line)?;

    let mut headers = HashMap::new();
    for line in raw.header_lines {
        if let Some((key, value)) = split_header(line) {
            headers.insert(key.to_string(), value.to_string());
        }
    }

    Ok(Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body: trim_nul_padding(raw.body).to_vec(),
    })
}

/// First stage: separates the request line, the header lines and the body.
///
/// Everything after the first blank line is body. A buffer that holds no
/// blank line is treated as head only, with an empty body.
pub fn split_lines(buf: &[u8]) -> Result<RawRequest<'_>, ParseError> {
    let buf = trim_nul_padding(buf);
    if buf.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(ParseError::Empty);
    }

    let (head, body) = match find(buf, HEADERS_END) {
        Some(end) => (&buf[..end], &buf[end + HEADERS_END.len()..]),
        None => (buf, &buf[buf.len()..]),
    };

    // A head that ends at the separator has no CRLF of its own after the
    // request line, so only a head cut short by the read is incomplete.
    let found_separator = head.len() < buf.len();
    let (request_line, rest) = match find(head, CRLF) {
        Some(pos) => (&head[..pos], &head[pos + CRLF.len()..]),
        None if found_separator => (head, &head[head.len()..]),
        None => return Err(ParseError::Incomplete),
    };

    let header_lines = if rest.is_empty() {
        Vec::new()
    } else {
        split_on(rest, CRLF)
            .into_iter()
            .take_while(|line| !line.is_empty())
            .collect()
    };

    Ok(RawRequest {
        request_line,
        header_lines,
        body,
    })
}

/// Second stage: splits a header line on its first colon.
///
/// Leading spaces are trimmed from both name and value. Returns `None` for
/// lines without a colon, an empty name, or non UTF-8 bytes.
pub fn split_header(line: &[u8]) -> Option<(&str, &str)> {
    let line = std::str::from_utf8(line).ok()?;
    let (key, value) = line.split_once(':')?;

    let key = key.trim_start_matches(' ');
    if key.is_empty() {
        return None;
    }

    Some((key, value.trim_start_matches(' ')))
}

fn parse_request_line(line: &str) -> Result<(Method, &str, &str), ParseError> {
    let mut parts = line.split(' ').filter(|p| !p.is_empty());

    let method_str = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    let path = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    let version = parts.next().unwrap_or("");

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidRequestLine)?;
    if !path.starts_with('/') {
        return Err(ParseError::InvalidPath);
    }

    Ok((method, path, version))
}

fn trim_nul_padding(buf: &[u8]) -> &[u8] {
    let end = buf.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
    &buf[..end]
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
}

fn split_on<'a>(mut buf: &'a [u8], sep: &[u8]) -> Vec<&'a [u8]> {
    let mut out = Vec::new();
    while let Some(pos) = find(buf, sep) {
        out.push(&buf[..pos]);
        buf = &buf[pos + sep.len()..];
    }
    out.push(buf);
    out
}
