//! Rendering of a board's shot history for query responses.

use alloc::vec::Vec;
use core::fmt;

use crate::core::board::{Board, Cell};

/// Every resolved cell of a board plus its remaining ship count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReport {
    pub ships_remaining: u8,
    /// Hit cells as `(row, col)`, row-major.
    pub hits: Vec<(usize, usize)>,
    /// Missed cells as `(row, col)`, row-major.
    pub misses: Vec<(usize, usize)>,
}

impl QueryReport {
    /// Collect the hit and miss history of `board`. Ship positions that have
    /// not been struck are never exposed.
    pub fn of(board: &Board) -> Self {
        let mut hits = Vec::new();
        let mut misses = Vec::new();
        for (pos, cell) in board.cells() {
            match cell {
                Cell::Hit => hits.push(pos),
                Cell::Miss => misses.push(pos),
                Cell::Empty | Cell::Occupied(_) => {}
            }
        }
        QueryReport {
            ships_remaining: board.ships_remaining(),
            hits,
            misses,
        }
    }
}

/// Wire form: `G n`, then ` H r c` per hit, then ` M r c` per miss.
impl fmt::Display for QueryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G {}", self.ships_remaining)?;
        for (r, c) in &self.hits {
            write!(f, " H {} {}", r, c)?;
        }
        for (r, c) in &self.misses {
            write!(f, " M {} {}", r, c)?;
        }
        Ok(())
    }
}
