use std::collections::VecDeque;

use crate::{
    core::game::{Arbiter, Outbound, Outcome},
    protocol::encode,
    transport::Transport,
};

/// Drives an [`Arbiter`] over the two player connections.
///
/// Only the connection of the player the arbiter is waiting on is read. A
/// failed read or send counts as a forfeit by that player. Both connections
/// are closed once the match ends.
pub struct MatchNode {
    arbiter: Arbiter,
    transports: [Box<dyn Transport>; 2],
}

impl MatchNode {
    pub fn new(player1: Box<dyn Transport>, player2: Box<dyn Transport>) -> Self {
        Self {
            arbiter: Arbiter::new(),
            transports: [player1, player2],
        }
    }

    pub fn arbiter(&self) -> &Arbiter {
        &self.arbiter
    }

    /// Run the match to completion.
    pub async fn run(&mut self) -> anyhow::Result<Outcome> {
        while let Some(player) = self.arbiter.awaiting() {
            let replies = match self.transports[player.index()].recv().await {
                Ok(line) => {
                    log::debug!("{} -> {:?}", player, line);
                    self.arbiter.handle(&line)
                }
                Err(e) => {
                    log::warn!("read from {} failed: {}", player, e);
                    self.arbiter.abandon(player)
                }
            };
            self.dispatch(replies).await;
        }

        for (i, transport) in self.transports.iter_mut().enumerate() {
            if let Err(e) = transport.close().await {
                log::debug!("closing connection {} failed: {}", i + 1, e);
            }
        }

        let outcome = self
            .arbiter
            .outcome()
            .ok_or_else(|| anyhow::anyhow!("match stopped without an outcome"))?;
        log::info!(
            "match over: {} wins ({:?}, {} shots)",
            outcome.winner,
            outcome.conclusion,
            outcome.shots
        );
        Ok(outcome)
    }

    async fn dispatch(&mut self, replies: Vec<Outbound>) {
        let mut queue: VecDeque<Outbound> = replies.into();
        while let Some(Outbound { to, reply }) = queue.pop_front() {
            let line = encode(&reply);
            log::debug!("{} <- {:?}", to, line);
            if let Err(e) = self.transports[to.index()].send(&line).await {
                log::warn!("send to {} failed: {}", to, e);
                queue.extend(self.arbiter.abandon(to));
            }
        }
    }
}
