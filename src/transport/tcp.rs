use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::core::config::MAX_LINE_LEN;
use crate::transport::Transport;

/// Default timeout for a single read or write (5 minutes).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

fn io_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        std::io::ErrorKind::UnexpectedEof => anyhow::anyhow!("Connection closed by peer"),
        std::io::ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
        std::io::ErrorKind::BrokenPipe => anyhow::anyhow!("Connection closed by peer"),
        _ => anyhow::anyhow!("I/O error: {}", e),
    }
}

/// Newline-framed transport over a TCP stream.
pub struct TcpTransport {
    stream: BufReader<TcpStream>,
    timeout_duration: Duration,
    max_line_len: usize,
    closed: bool,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, DEFAULT_TIMEOUT, MAX_LINE_LEN)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self::with_config(stream, timeout_duration, MAX_LINE_LEN)
    }

    pub fn with_config(stream: TcpStream, timeout_duration: Duration, max_line_len: usize) -> Self {
        Self {
            stream: BufReader::new(stream),
            timeout_duration,
            max_line_len,
            closed: false,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.stream.get_ref().peer_addr().ok()
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        if self.closed {
            return Err(anyhow::anyhow!("Transport is shut down"));
        }
        let mut data = Vec::with_capacity(line.len() + 1);
        data.extend_from_slice(line.as_bytes());
        data.push(b'\n');

        let writer = self.stream.get_mut();
        let send_op = async {
            writer.write_all(&data).await.map_err(io_error)?;
            writer.flush().await.map_err(io_error)?;
            anyhow::Ok(())
        };
        timeout(self.timeout_duration, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.timeout_duration))?
    }

    async fn recv(&mut self) -> anyhow::Result<String> {
        if self.closed {
            return Err(anyhow::anyhow!("Transport is shut down"));
        }
        // One extra byte leaves room for the terminator of a maximum length line.
        let limit = self.max_line_len as u64 + 1;
        let max_line_len = self.max_line_len;
        let reader = &mut self.stream;
        let recv_op = async move {
            let mut buf = Vec::new();
            let n = reader
                .take(limit)
                .read_until(b'\n', &mut buf)
                .await
                .map_err(io_error)?;
            if n == 0 {
                return Err(anyhow::anyhow!("Connection closed by peer"));
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            } else if n as u64 >= limit {
                return Err(anyhow::anyhow!(
                    "Message too large: more than {} bytes",
                    max_line_len
                ));
            }
            // An unterminated line is the last one before EOF; the next read reports the close.
            anyhow::Ok(String::from_utf8_lossy(&buf).into_owned())
        };
        timeout(self.timeout_duration, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", self.timeout_duration))?
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.stream.get_mut().shutdown().await.map_err(io_error)
    }
}
