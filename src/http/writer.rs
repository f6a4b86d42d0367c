use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";
const CRLF: &[u8] = b"\r\n";

/// Encodes `HTTP/1.1 <code> <reason>` without a line terminator.
pub fn status_line(status: StatusCode) -> Vec<u8> {
    format!(
        "{} {} {}",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    )
    .into_bytes()
}

/// Composes `status-line CRLF [header-block] CRLF [body]`.
///
/// A response without a header block is sent as the status line and the
/// blank line only; its body is never written.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = status_line(resp.status);
    buf.extend_from_slice(CRLF);

    match resp.header.to_bytes() {
        Some(header) => {
            buf.extend_from_slice(&header);
            buf.extend_from_slice(CRLF);
            buf.extend_from_slice(&resp.body);
        }
        None => buf.extend_from_slice(CRLF),
    }

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_has_no_terminator() {
        assert_eq!(status_line(StatusCode::Created), b"HTTP/1.1 201 Created");
    }

    #[test]
    fn headerless_response_drops_body() {
        let mut resp = Response::not_found();
        resp.body = b"ignored".to_vec();

        assert_eq!(serialize_response(&resp), b"HTTP/1.1 404 Not Found\r\n\r\n");
    }
}
