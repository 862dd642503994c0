use tokio::time::Duration;

use crate::core::config::{MAX_LINE_LEN, PLAYER1_PORT, PLAYER2_PORT};
use crate::core::game::PlayerId;
use crate::transport::tcp::DEFAULT_TIMEOUT;

/// Settings for the match server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host or address both listeners bind to.
    pub host: String,
    /// Listening ports for player 1 and player 2.
    pub ports: [u16; 2],
    /// Longest a single read or write may block before the player forfeits.
    pub read_timeout: Duration,
    /// Longest accepted inbound line, in bytes.
    pub max_line_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            ports: [PLAYER1_PORT, PLAYER2_PORT],
            read_timeout: DEFAULT_TIMEOUT,
            max_line_len: MAX_LINE_LEN,
        }
    }
}

impl ServerConfig {
    /// `host:port` for the given player's listener.
    pub fn bind_addr(&self, player: PlayerId) -> String {
        format!("{}:{}", self.host, self.ports[player.index()])
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ports[0] == self.ports[1] && self.ports[0] != 0 {
            return Err(anyhow::anyhow!(
                "player ports must differ, both are {}",
                self.ports[0]
            ));
        }
        if self.max_line_len == 0 {
            return Err(anyhow::anyhow!("max line length must be positive"));
        }
        Ok(())
    }
}
