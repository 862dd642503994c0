//! Error and outcome types shared by the placement and shot modules.

use core::fmt;

/// Reasons a ship placement is rejected, in validation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Shape number outside 1..=7.
    InvalidShape,
    /// Rotation number outside 1..=4.
    InvalidRotation,
    /// Anchor or a pattern cell lies off the grid.
    OutOfBounds,
    /// A cell is already taken.
    Overlap,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::InvalidShape => write!(f, "Ship shape must be between 1 and 7"),
            PlacementError::InvalidRotation => write!(f, "Ship rotation must be between 1 and 4"),
            PlacementError::OutOfBounds => write!(f, "Ship placement is out of bounds"),
            PlacementError::Overlap => write!(f, "Ship placement overlaps with another ship"),
        }
    }
}

/// Reasons a shot is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    OutOfBounds,
    AlreadyShot,
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::OutOfBounds => write!(f, "Shot is outside the board"),
            ShotError::AlreadyShot => write!(f, "Cell was already shot"),
        }
    }
}

/// Result of a shot that landed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Struck a ship; carries the target board's ships remaining after the shot.
    Hit { ships_remaining: u8 },
    /// Struck water; ships remaining unchanged.
    Miss { ships_remaining: u8 },
}

impl ShotOutcome {
    pub fn ships_remaining(self) -> u8 {
        match self {
            ShotOutcome::Hit { ships_remaining } | ShotOutcome::Miss { ships_remaining } => {
                ships_remaining
            }
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, ShotOutcome::Hit { .. })
    }
}
