use crate::core::board::{Board, Cell};
use crate::core::common::{ShotError, ShotOutcome};

/// Fire at (`row`, `col`) on `board`.
///
/// A hit that leaves no other cell of the same ship occupied sinks it and
/// decrements the board's remaining ship count. Sinking is detected with a
/// full grid scan.
pub fn resolve(board: &mut Board, row: i32, col: i32) -> Result<ShotOutcome, ShotError> {
    let (r, c) = board
        .locate(row as isize, col as isize)
        .ok_or(ShotError::OutOfBounds)?;

    match board.get(r, c) {
        Some(Cell::Hit) | Some(Cell::Miss) => Err(ShotError::AlreadyShot),
        Some(Cell::Occupied(ship)) => {
            board.mark_hit(r, c, ship);
            if board.occupied_by(ship) == 0 {
                log::debug!("ship {} sunk at ({}, {})", ship, r, c);
                board.sink_one();
            }
            Ok(ShotOutcome::Hit {
                ships_remaining: board.ships_remaining(),
            })
        }
        Some(Cell::Empty) => {
            board.mark_miss(r, c);
            Ok(ShotOutcome::Miss {
                ships_remaining: board.ships_remaining(),
            })
        }
        None => Err(ShotError::OutOfBounds),
    }
}
