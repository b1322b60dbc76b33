use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::http::parser::{finish_at_eof, parse_http_request, ParseError};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::routes::Router;

const READ_CHUNK: usize = 4096;

/// Serves exactly one request/response exchange over a stream.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    router: Arc<Router>,
}

#[derive(Debug)]
pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
            router,
        }
    }

    /// Drives the connection until it is closed.
    ///
    /// A request that cannot be parsed closes the connection without writing
    /// anything; that outcome is logged and is not an error. Only a failure
    /// to write a response is returned.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => match self.read_request().await {
                    Ok(Some(req)) => {
                        info!(
                            method = %req.method,
                            path = %req.path,
                            version = %req.version,
                            "Request received"
                        );
                        ConnectionState::Processing(req)
                    }
                    Ok(None) => {
                        debug!("Peer closed before sending a request");
                        ConnectionState::Closed
                    }
                    Err(e) => {
                        warn!(error = %e, "Closing connection without response");
                        ConnectionState::Closed
                    }
                },

                ConnectionState::Processing(req) => {
                    let response = self.router.dispatch(&req).await;
                    info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Response ready"
                    );
                    ConnectionState::Writing(ResponseWriter::new(&response))
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        // No keep-alive: one exchange per connection
        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "Shutdown after response failed");
        }

        Ok(())
    }

    /// Reads until one full request is buffered.
    ///
    /// Returns `Ok(None)` when the peer closes without sending anything.
    pub async fn read_request(&mut self) -> Result<Option<Request>, ParseError> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Some(request));
                }
                Err(e) if e.needs_more_input() => {}
                Err(e) => return Err(e),
            }

            self.buffer.reserve(READ_CHUNK);
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                return finish_at_eof(&self.buffer).map(|parsed| parsed.map(|(req, _)| req));
            }
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }
}
