#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;
pub mod player;
pub mod protocol;
#[cfg(feature = "std")]
mod config;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
mod match_node;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;
pub use player::{BotPlayer, GameStatus, Player};
pub use protocol::{decode, decode_reply, encode, DecodeError, Dimensions, ErrorCode, Reply, Request, Tag};
#[cfg(feature = "std")]
pub use config::ServerConfig;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use match_node::MatchNode;
#[cfg(feature = "std")]
pub use player::PlayerClient;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
