//! Content negotiation and gzip compression of response bodies.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::http::response::Response;

/// Content encodings the server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
        }
    }

    /// Compresses `body` with this encoding.
    pub fn encode(&self, body: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            Encoding::Gzip => gzip(body),
        }
    }
}

/// Picks an encoding from an `Accept-Encoding` value.
///
/// The value is parsed as a list of tokens separated by commas or
/// whitespace. A token may carry parameters after `;`; a `q=0` weight
/// refuses it. Tokens are matched case-sensitively.
///
/// ```
/// # use tinyhttp::http::encoding::{negotiate, Encoding};
/// assert_eq!(negotiate("deflate, gzip"), Some(Encoding::Gzip));
/// assert_eq!(negotiate("deflate gzip"), Some(Encoding::Gzip));
/// assert_eq!(negotiate("gzip;q=0"), None);
/// assert_eq!(negotiate("invalid-encoding"), None);
/// ```
pub fn negotiate(accept_encoding: &str) -> Option<Encoding> {
    accept_encoding
        .split(',')
        .flat_map(accepted_tokens)
        .find(|token| *token == "gzip")
        .map(|_| Encoding::Gzip)
}

/// Tokens of one comma-separated item that are not refused.
///
/// Parameters after `;` belong to the last whitespace-separated token
/// before them, so `deflate gzip;q=0` refuses only `gzip`.
fn accepted_tokens(item: &str) -> Vec<&str> {
    let mut parts = item.split(';');
    let mut tokens: Vec<&str> = parts
        .next()
        .map(|names| names.split_whitespace().collect())
        .unwrap_or_default();

    if parts.any(|param| is_zero_weight(param.trim())) {
        tokens.pop();
    }
    tokens
}

fn is_zero_weight(param: &str) -> bool {
    let Some((name, value)) = param.split_once('=') else {
        return false;
    };
    name.trim().eq_ignore_ascii_case("q")
        && value.trim().parse::<f32>().map(|q| q <= 0.0).unwrap_or(false)
}

/// Compresses `body` with gzip framing.
pub fn gzip(body: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body)?;
    encoder.finish()
}

impl Response {
    /// Applies the negotiated content encoding to the body.
    ///
    /// `Content-Length` is updated to the compressed size. When compression
    /// fails the body is sent as is and no `Content-Encoding` is advertised.
    pub fn encoded(mut self, accept_encoding: Option<&str>) -> Self {
        if !self.has_header_block() {
            return self;
        }
        let Some(encoding) = accept_encoding.and_then(negotiate) else {
            return self;
        };

        match encoding.encode(&self.body) {
            Ok(compressed) => {
                self.header.content_encoding = encoding.as_str().to_string();
                self.header.content_length = compressed.len();
                self.body = compressed;
            }
            Err(e) => {
                tracing::warn!(
                    encoding = encoding.as_str(),
                    error = %e,
                    "Compression failed, sending body uncompressed"
                );
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_parameters() {
        assert_eq!(negotiate("gzip;q=0.5"), Some(Encoding::Gzip));
        assert_eq!(negotiate("br;q=1, gzip ; q=0.0"), None);
        assert!(is_zero_weight("q=0"));
        assert!(!is_zero_weight("q=abc"));
        assert!(!is_zero_weight("level=0"));
    }

    #[test]
    fn weight_applies_to_last_token() {
        assert_eq!(accepted_tokens("deflate gzip;q=0"), vec!["deflate"]);
        assert_eq!(accepted_tokens(" gzip ; q=0.0"), Vec::<&str>::new());
        assert_eq!(accepted_tokens(";q=0"), Vec::<&str>::new());
    }

    #[test]
    fn substring_is_not_a_token() {
        assert_eq!(negotiate("x-gzipped"), None);
        assert_eq!(negotiate(""), None);
    }

    #[test]
    fn gzip_has_magic_header() {
        let out = gzip(b"abc").unwrap();
        assert_eq!(&out[..2], &[0x1f, 0x8b]);
    }
}
