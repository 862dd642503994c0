//! Per-player grid and remaining-ship bookkeeping.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::core::config::NUM_SHIPS;

/// Identifier of a placed ship, 1..=5 in submission order.
pub type ShipId = u8;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(ShipId),
    Hit,
    Miss,
}

impl Cell {
    /// `true` once a shot has landed on this cell.
    pub fn is_resolved(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }
}

/// A `height` x `width` grid stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    ships_remaining: u8,
}

impl Board {
    /// Create an empty board with every ship still afloat.
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            ships_remaining: NUM_SHIPS as u8,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Ships that still have at least one unhit cell.
    pub fn ships_remaining(&self) -> u8 {
        self.ships_remaining
    }

    /// Convert signed coordinates into grid indices, if they lie on the grid.
    pub fn locate(&self, row: isize, col: isize) -> Option<(usize, usize)> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.height && col < self.width).then_some((row, col))
    }

    pub fn contains(&self, row: isize, col: isize) -> bool {
        self.locate(row, col).is_some()
    }

    /// Cell at (`row`, `col`), or `None` off the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Iterate over `((row, col), cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / width, i % width), *cell))
    }

    /// Number of cells still occupied by `ship`.
    pub fn occupied_by(&self, ship: ShipId) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(ship))
            .count()
    }

    /// `true` when no ship has been placed and no shot resolved.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Empty)
    }

    /// Empty -> Occupied. Returns `false` and leaves the cell untouched
    /// for any other starting state.
    pub(crate) fn occupy(&mut self, row: usize, col: usize, ship: ShipId) -> bool {
        self.transition(row, col, Cell::Empty, Cell::Occupied(ship))
    }

    /// Occupied -> Hit.
    pub(crate) fn mark_hit(&mut self, row: usize, col: usize, ship: ShipId) -> bool {
        self.transition(row, col, Cell::Occupied(ship), Cell::Hit)
    }

    /// Empty -> Miss.
    pub(crate) fn mark_miss(&mut self, row: usize, col: usize) -> bool {
        self.transition(row, col, Cell::Empty, Cell::Miss)
    }

    pub(crate) fn sink_one(&mut self) {
        self.ships_remaining = self.ships_remaining.saturating_sub(1);
    }

    /// Return to the freshly created state. Only used to roll back a
    /// rejected setup batch.
    pub(crate) fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.ships_remaining = NUM_SHIPS as u8;
    }

    fn transition(&mut self, row: usize, col: usize, from: Cell, to: Cell) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        let cell = &mut self.cells[row * self.width + col];
        if *cell != from {
            return false;
        }
        *cell = to;
        true
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{ {}x{}, ships_remaining: {} }}",
            self.height, self.width, self.ships_remaining
        )?;
        for row in 0..self.height {
            for col in 0..self.width {
                let c = match self.cells[row * self.width + col] {
                    Cell::Empty => '.',
                    Cell::Occupied(id) => char::from(b'0' + id),
                    Cell::Hit => 'X',
                    Cell::Miss => 'o',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
