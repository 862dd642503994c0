//! Line-oriented message transports.

/// A connected, ordered stream of newline-terminated ASCII lines.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one line. The terminator is added by the transport.
    async fn send(&mut self, line: &str) -> anyhow::Result<()>;
    /// Receive one line without its terminator.
    async fn recv(&mut self) -> anyhow::Result<String>;
    /// Close the connection. Later calls to `send`/`recv` fail.
    async fn close(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub mod in_memory;
pub mod tcp;
