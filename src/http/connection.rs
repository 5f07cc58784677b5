use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::timeout;

use crate::files::handler::StaticFileHandler;
use crate::http::parser::{ParseError, parse_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Cap on accumulated header bytes before the request is rejected.
const MAX_HEADER_BYTES: usize = 64 * 1024;

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    handler: Arc<StaticFileHandler>,
    read_timeout: Option<Duration>,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// Terminal conditions of the read phase.
enum ReadOutcome {
    /// A complete, well-formed request was framed.
    Request(Request),
    /// The bytes read so far cannot form a valid request.
    Malformed,
    /// The peer closed before sending anything.
    Eof,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(
        stream: S,
        handler: Arc<StaticFileHandler>,
        read_timeout: Option<Duration>,
    ) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            handler,
            read_timeout,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    let limit = self.read_timeout;
                    let outcome = match limit {
                        Some(limit) => timeout(limit, self.read_request())
                            .await
                            .map_err(|_| anyhow::anyhow!("timed out reading request"))??,
                        None => self.read_request().await?,
                    };

                    match outcome {
                        ReadOutcome::Request(req) => {
                            self.state = ConnectionState::Processing(req);
                        }
                        ReadOutcome::Malformed => {
                            tracing::warn!("Malformed request, responding 400");
                            let writer = ResponseWriter::new(&Response::bad_request());
                            self.state = ConnectionState::Writing(writer);
                        }
                        ReadOutcome::Eof => {
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Processing(req) => {
                    let response = self.handler.handle(req).await;

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // One request per connection; always close after the response
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Accumulates bytes from the stream until a full request is framed.
    ///
    /// Reads append into a growable buffer; after each read the buffer is
    /// handed to the parser, and `Incomplete` sends us back for more. The
    /// framed request is identical no matter how the bytes were split
    /// across reads. A transport error propagates as-is and must not be
    /// confused with end-of-stream.
    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            // Try parsing whatever we already have
            match parse_request(&self.buffer) {
                Ok((request, consumed)) => {
                    // Remove consumed bytes
                    let _ = self.buffer.split_to(consumed);
                    return Ok(ReadOutcome::Request(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    tracing::debug!("Request parse failed: {:?}", e);
                    return Ok(ReadOutcome::Malformed);
                }
            }

            // Prevent unbounded header growth
            if self.buffer.len() > MAX_HEADER_BYTES {
                tracing::debug!("Request headers exceeded {} bytes", MAX_HEADER_BYTES);
                return Ok(ReadOutcome::Malformed);
            }

            // Read more data
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                // Peer closed. A partial request that will never complete
                // is answered like any other malformed one.
                return Ok(if self.buffer.is_empty() {
                    ReadOutcome::Eof
                } else {
                    ReadOutcome::Malformed
                });
            }
        }
    }
}
