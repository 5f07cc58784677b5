use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a response into a single contiguous byte buffer.
///
/// The header text is rendered first so the total size is known up front;
/// the body occupies the tail of the buffer.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut head = String::new();

    head.push_str(HTTP_VERSION);
    head.push(' ');
    head.push_str(&resp.status.as_u16().to_string());
    head.push(' ');
    head.push_str(resp.status.reason_phrase());
    head.push_str("\r\n");

    for (k, v) in &resp.headers {
        head.push_str(k);
        head.push_str(": ");
        head.push_str(v);
        head.push_str("\r\n");
    }

    // Header/body separator
    head.push_str("\r\n");

    let mut buf = Vec::with_capacity(head.len() + resp.body.len());
    buf.extend_from_slice(head.as_bytes());
    buf.extend_from_slice(&resp.body);

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

    pub async fn write_to_stream<S>(
        &mut self,
        stream: &mut S,
    ) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        Ok(())
    }
}
