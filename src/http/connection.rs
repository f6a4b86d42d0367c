use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::TcpStream;

use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// Size of the single read that must hold a whole request.
///
/// Requests larger than this are decoded from whatever the first read
/// returned; there is no reassembly across reads.
pub const READ_BUFFER_SIZE: usize = 1024;

pub struct Connection<S = TcpStream> {
    stream: S,
    router: Arc<Router>,
    buffer: BytesMut,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream,
            router,
            buffer: BytesMut::with_capacity(READ_BUFFER_SIZE),
            state: ConnectionState::Reading,
        }
    }

    /// Serves requests until the peer hangs up or asks to close.
    ///
    /// The stream is dropped with the connection, on every exit path.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        ReadOutcome::Request(req) => ConnectionState::Processing(req),
                        ReadOutcome::Rejected(response) => {
                            ConnectionState::Writing(ResponseWriter::new(&response), false)
                        }
                        ReadOutcome::Eof => {
                            tracing::debug!("Connection closed by client");
                            ConnectionState::Closed
                        }
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.router.handle(req).await;
                    let keep_alive = req.keep_alive();
                    if !keep_alive {
                        tracing::debug!("Closing connection as requested by client");
                    }

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Performs one read and decodes exactly one request from it.
    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        self.buffer.clear();
        self.buffer.reserve(READ_BUFFER_SIZE);

        let n = (&mut self.stream)
            .take(READ_BUFFER_SIZE as u64)
            .read_buf(&mut self.buffer)
            .await?;

        if n == 0 {
            return Ok(ReadOutcome::Eof);
        }

        match parse_http_request(&self.buffer) {
            Ok(req) => Ok(ReadOutcome::Request(req)),
            Err(e) => {
                tracing::warn!(error = %e, bytes = n, "Rejecting malformed request");
                Ok(ReadOutcome::Rejected(Response::bad_request()))
            }
        }
    }
}

enum ReadOutcome {
    Request(Request),
    Rejected(Response),
    Eof,
}
