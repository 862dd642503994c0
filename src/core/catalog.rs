//! Piece shapes, rotations and the fixed table of movement patterns.
//!
//! A ship occupies its anchor cell plus every cell reached by applying the
//! steps of its pattern one after another.

use core::fmt;

/// Unit move from one occupied cell to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Right,
    Left,
    Up,
    Down,
}

impl Step {
    /// Row and column delta of this step. Rows grow downwards.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Step::Right => (0, 1),
            Step::Left => (0, -1),
            Step::Up => (-1, 0),
            Step::Down => (1, 0),
        }
    }
}

/// The seven piece shapes, numbered 1..=7 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipShape {
    Square,
    Line,
    L,
    ReverseL,
    T,
    S,
    Z,
}

impl ShipShape {
    pub const ALL: [ShipShape; 7] = [
        ShipShape::Square,
        ShipShape::Line,
        ShipShape::L,
        ShipShape::ReverseL,
        ShipShape::T,
        ShipShape::S,
        ShipShape::Z,
    ];

    /// Decode the wire number of a shape. `None` outside 1..=7.
    pub fn from_wire(value: i32) -> Option<Self> {
        let idx = usize::try_from(value.checked_sub(1)?).ok()?;
        Self::ALL.get(idx).copied()
    }

    pub fn to_wire(self) -> i32 {
        self as i32 + 1
    }
}

impl fmt::Display for ShipShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShipShape::Square => "square",
            ShipShape::Line => "line",
            ShipShape::L => "L",
            ShipShape::ReverseL => "reverse L",
            ShipShape::T => "T",
            ShipShape::S => "S",
            ShipShape::Z => "Z",
        };
        f.write_str(name)
    }
}

/// The four orientations, numbered 1..=4 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    R1,
    R2,
    R3,
    R4,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R1, Rotation::R2, Rotation::R3, Rotation::R4];

    /// Decode the wire number of a rotation. `None` outside 1..=4.
    pub fn from_wire(value: i32) -> Option<Self> {
        let idx = usize::try_from(value.checked_sub(1)?).ok()?;
        Self::ALL.get(idx).copied()
    }

    pub fn to_wire(self) -> i32 {
        self as i32 + 1
    }
}

/// Ordered steps describing one (shape, rotation) layout.
pub type MovementPattern = &'static [Step];

use Step::{Down as D, Left as L, Right as R, Up as U};

static PATTERNS: [[MovementPattern; 4]; 7] = [
    // square
    [&[R, D, L], &[R, D, L], &[R, D, L], &[R, D, L]],
    // line
    [&[D, D, D], &[R, R, R], &[D, D, D], &[R, R, R]],
    // L
    [&[R, U, R], &[D, R, D], &[R, U, R], &[D, R, D]],
    // reverse L
    [&[D, D, R], &[D, U, R, R], &[R, D, D], &[R, R, U]],
    // T
    [&[R, D, R], &[D, U, R, U], &[R, D, R], &[D, U, R, U]],
    // S
    [&[R, U, U], &[D, R, R], &[R, L, D, D], &[R, R, D]],
    // Z
    [&[R, D, U, R], &[R, U, D, D], &[R, U, D, R], &[D, R, L, D]],
];

/// Movement pattern for a shape in a given rotation.
pub fn pattern_for(shape: ShipShape, rotation: Rotation) -> MovementPattern {
    PATTERNS[shape as usize][rotation as usize]
}

/// Iterator over the anchor cell and every cell produced by the pattern.
///
/// Coordinates are `(row, col)` and signed so that a walk may leave the grid.
#[derive(Debug, Clone)]
pub struct Walk {
    pattern: MovementPattern,
    next: usize,
    cursor: Option<(isize, isize)>,
}

impl Iterator for Walk {
    type Item = (isize, isize);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        self.cursor = self.pattern.get(self.next).map(|step| {
            let (dr, dc) = step.delta();
            (current.0 + dr, current.1 + dc)
        });
        self.next += 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = match self.cursor {
            Some(_) => self.pattern.len() + 1 - self.next,
            None => 0,
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for Walk {}

/// Walk `pattern` starting from the anchor at (`row`, `col`).
pub fn walk(pattern: MovementPattern, row: isize, col: isize) -> Walk {
    Walk {
        pattern,
        next: 0,
        cursor: Some((row, col)),
    }
}
