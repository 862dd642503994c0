use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::task::yield_now;

use crate::transport::Transport;

type Queue = Arc<Mutex<VecDeque<String>>>;

/// One end of an in-process line pipe. Dropping or closing an end makes the
/// other end's `recv` fail once its queue is drained.
pub struct InMemoryTransport {
    recv_queue: Option<Queue>,
    send_queue: Option<Queue>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1: Queue = Arc::new(Mutex::new(VecDeque::new()));
        let q2: Queue = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                recv_queue: Some(q1.clone()),
                send_queue: Some(q2.clone()),
            },
            Self {
                recv_queue: Some(q2),
                send_queue: Some(q1),
            },
        )
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        let queue = self
            .send_queue
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Transport is shut down"))?;
        if Arc::strong_count(queue) == 1 {
            return Err(anyhow::anyhow!("Connection closed by peer"));
        }
        queue
            .lock()
            .map_err(|_| anyhow::anyhow!("Channel poisoned"))?
            .push_back(line.to_string());
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<String> {
        let queue = self
            .recv_queue
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Transport is shut down"))?;
        loop {
            if let Some(line) = {
                let mut queue = queue
                    .lock()
                    .map_err(|_| anyhow::anyhow!("Channel poisoned"))?;
                queue.pop_front()
            } {
                return Ok(line);
            }
            if Arc::strong_count(queue) == 1 {
                return Err(anyhow::anyhow!("Connection closed by peer"));
            }
            yield_now().await;
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.recv_queue = None;
        self.send_queue = None;
        Ok(())
    }
}
