//! Ship placement validation, for a single ship and for a five-ship batch.

use alloc::vec::Vec;

use crate::core::board::{Board, Cell, ShipId};
use crate::core::catalog::{pattern_for, walk, Rotation, ShipShape};
use crate::core::common::PlacementError;
use crate::core::config::NUM_SHIPS;

/// One ship exactly as submitted: raw wire numbers, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipSpec {
    pub shape: i32,
    pub rotation: i32,
    pub col: i32,
    pub row: i32,
}

impl ShipSpec {
    pub const fn new(shape: i32, rotation: i32, col: i32, row: i32) -> Self {
        ShipSpec {
            shape,
            rotation,
            col,
            row,
        }
    }

    fn shape(&self) -> Result<ShipShape, PlacementError> {
        ShipShape::from_wire(self.shape).ok_or(PlacementError::InvalidShape)
    }

    fn rotation(&self) -> Result<Rotation, PlacementError> {
        Rotation::from_wire(self.rotation).ok_or(PlacementError::InvalidRotation)
    }

    /// Cells visited by this ship, anchor first. Requires a valid shape and
    /// rotation.
    fn cells(&self) -> Result<impl Iterator<Item = (isize, isize)>, PlacementError> {
        let pattern = pattern_for(self.shape()?, self.rotation()?);
        Ok(walk(pattern, self.row as isize, self.col as isize))
    }

    fn check_bounds(&self, board: &Board) -> Result<(), PlacementError> {
        if self.cells()?.all(|(r, c)| board.contains(r, c)) {
            Ok(())
        } else {
            Err(PlacementError::OutOfBounds)
        }
    }
}

/// Validate a single ship and, only if every check passes, write it to the
/// board as `ship_id`.
///
/// Checks run in order: shape, rotation, bounds, overlap. A pattern that
/// steps back onto a cell it already visited collides with itself and is
/// reported as an overlap.
pub fn try_place(
    board: &mut Board,
    shape: i32,
    rotation: i32,
    col: i32,
    row: i32,
    ship_id: ShipId,
) -> Result<(), PlacementError> {
    let spec = ShipSpec::new(shape, rotation, col, row);
    spec.check_bounds(board)?;

    let mut visited: Vec<(usize, usize)> = Vec::new();
    for (r, c) in spec.cells()? {
        let cell = board.locate(r, c).ok_or(PlacementError::OutOfBounds)?;
        if visited.contains(&cell) || board.get(cell.0, cell.1) != Some(Cell::Empty) {
            return Err(PlacementError::Overlap);
        }
        visited.push(cell);
    }

    for (r, c) in visited {
        board.occupy(r, c, ship_id);
    }
    Ok(())
}

/// Place a full fleet with all-or-nothing semantics.
///
/// Every shape is checked before any rotation, every rotation before any
/// bounds walk, and every bounds walk before the first ship is written, so
/// the reported error is the first failing category across the whole batch.
/// Ships are then written in submission order with ids 1..=5; an overlap
/// resets the board to empty.
pub fn place_fleet(board: &mut Board, fleet: &[ShipSpec; NUM_SHIPS]) -> Result<(), PlacementError> {
    for spec in fleet {
        spec.shape()?;
    }
    for spec in fleet {
        spec.rotation()?;
    }
    for spec in fleet {
        spec.check_bounds(board)?;
    }

    for (i, spec) in fleet.iter().enumerate() {
        let ship_id = (i + 1) as ShipId;
        if let Err(err) = try_place(board, spec.shape, spec.rotation, spec.col, spec.row, ship_id) {
            log::debug!("ship {} rejected ({}), clearing board", ship_id, err);
            board.reset();
            return Err(err);
        }
    }
    Ok(())
}
