use rand::rngs::SmallRng;

use crate::{
    core::game::PlayerId,
    player::{GameStatus, Player},
    protocol::{decode_reply, Dimensions, Reply, Request},
    transport::Transport,
};

/// Fleets submitted before the client gives up and forfeits.
const SETUP_ATTEMPTS: usize = 10;

/// Plays one match against an arbiter on behalf of a [`Player`].
pub struct PlayerClient {
    player: Box<dyn Player>,
    transport: Box<dyn Transport>,
    shots: usize,
}

impl PlayerClient {
    pub fn new(player: Box<dyn Player>, transport: Box<dyn Transport>) -> Self {
        Self {
            player,
            transport,
            shots: 0,
        }
    }

    /// Shots that landed on the opponent's grid.
    pub fn shots(&self) -> usize {
        self.shots
    }

    async fn request(&mut self, request: &Request) -> anyhow::Result<Reply> {
        if let Err(e) = self.transport.send(&request.to_string()).await {
            // The arbiter hangs up once the match is decided, but its halt may
            // still be waiting to be read.
            log::debug!("send failed: {}", e);
            let line = self.transport.recv().await.map_err(|_| e)?;
            return match decode_reply(&line) {
                Some(reply @ Reply::Halt { .. }) => Ok(reply),
                _ => Err(anyhow::anyhow!("Unexpected reply after send failure: {:?}", line)),
            };
        }
        let line = self.transport.recv().await?;
        decode_reply(&line).ok_or_else(|| anyhow::anyhow!("Unexpected reply: {:?}", line))
    }

    async fn await_halt(&mut self) -> anyhow::Result<GameStatus> {
        let line = self.transport.recv().await?;
        match decode_reply(&line) {
            Some(Reply::Halt { won }) => Ok(GameStatus::from_halt(won)),
            _ => Err(anyhow::anyhow!("Expected halt, got {:?}", line)),
        }
    }

    /// Play a full match from `seat`. Player 1 proposes `dimensions`; player
    /// 2 only acknowledges and must be told the size out of band.
    pub async fn run(
        &mut self,
        rng: &mut SmallRng,
        seat: PlayerId,
        dimensions: Dimensions,
    ) -> anyhow::Result<GameStatus> {
        let begin = match seat {
            PlayerId::One => Request::Begin(Some(dimensions)),
            PlayerId::Two => Request::Begin(None),
        };
        match self.request(&begin).await? {
            Reply::Ack => {}
            Reply::Halt { won } => return Ok(GameStatus::from_halt(won)),
            other => return Err(anyhow::anyhow!("Begin rejected: {}", other)),
        }

        let width = dimensions.width as usize;
        let height = dimensions.height as usize;
        let mut placed = false;
        for _ in 0..SETUP_ATTEMPTS {
            let fleet = self.player.fleet(rng, width, height);
            match self.request(&Request::Initialize(fleet)).await? {
                Reply::Ack => {
                    placed = true;
                    break;
                }
                Reply::Error(code) => log::debug!("{} fleet rejected with {}", seat, code.code()),
                Reply::Halt { won } => return Ok(GameStatus::from_halt(won)),
                other => return Err(anyhow::anyhow!("Unexpected reply to initialize: {}", other)),
            }
        }
        if !placed {
            log::warn!("{} could not place a fleet, forfeiting", seat);
            self.transport.send(&Request::Forfeit.to_string()).await?;
            return self.await_halt().await;
        }

        loop {
            let target = self.player.select_target(rng, width, height);
            let shot = Request::Shoot {
                row: target.0,
                col: target.1,
            };
            match self.request(&shot).await? {
                Reply::ShotResult {
                    ships_remaining,
                    hit,
                } => {
                    self.shots += 1;
                    self.player.handle_shot_result(target, hit);
                    if ships_remaining == 0 {
                        return self.await_halt().await;
                    }
                }
                Reply::Error(code) => self.player.handle_rejected_shot(target, code),
                Reply::Halt { won } => return Ok(GameStatus::from_halt(won)),
                other => return Err(anyhow::anyhow!("Unexpected reply to shot: {}", other)),
            }
        }
    }
}
