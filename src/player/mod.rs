//! Client-side players
//!
//! A [`Player`] decides where to put its fleet and where to shoot. The
//! [`BotPlayer`] does both at random; [`PlayerClient`] connects any player to
//! an arbiter over a transport and speaks the wire protocol for it.

use rand::rngs::SmallRng;

use crate::core::{config::NUM_SHIPS, placement::ShipSpec};
use crate::protocol::ErrorCode;

/// How a match ended from one client's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum GameStatus {
    Won,
    Lost,
}

impl GameStatus {
    pub fn from_halt(won: bool) -> Self {
        if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        }
    }
}

/// Interface implemented by different player types.
pub trait Player: Send {
    /// Choose five ships for a `width` x `height` board.
    fn fleet(&mut self, rng: &mut SmallRng, width: usize, height: usize) -> [ShipSpec; NUM_SHIPS];

    /// Choose the next `(row, col)` to fire at.
    fn select_target(&mut self, rng: &mut SmallRng, width: usize, height: usize) -> (i32, i32);

    /// Inform the player whether its last shot hit.
    fn handle_shot_result(&mut self, _target: (i32, i32), _hit: bool) {}

    /// Inform the player that its last shot was rejected.
    fn handle_rejected_shot(&mut self, _target: (i32, i32), _code: ErrorCode) {}
}

pub mod bot;
pub use bot::BotPlayer;

#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
pub use client::PlayerClient;
