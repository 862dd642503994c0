//! Match arbitration core (no_std compatible)
//!
//! Board model, ship catalog, placement and shot validation and the match
//! state machine. Needs only `alloc`; all I/O lives outside this module.

pub mod board;
pub mod catalog;
pub mod common;
pub mod config;
pub mod game;
pub mod placement;
pub mod query;
pub mod shot;

// Re-export commonly used types
pub use board::{Board, Cell, ShipId};
pub use catalog::{pattern_for, walk, MovementPattern, Rotation, ShipShape, Step};
pub use common::{PlacementError, ShotError, ShotOutcome};
pub use config::*;
pub use game::{Arbiter, Conclusion, Match, Outbound, Outcome, Phase, PlayerId};
pub use placement::{place_fleet, try_place, ShipSpec};
pub use query::QueryReport;
pub use shot::resolve;
