use alloc::vec;
use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::core::{
    board::Board,
    catalog::{Rotation, ShipShape},
    config::NUM_SHIPS,
    placement::{place_fleet, ShipSpec},
};

use super::Player;

/// Random fleets tried before falling back to a fixed layout.
const PLACEMENT_ATTEMPTS: usize = 200;

/// Player that places a random legal fleet and fires at random, following up
/// on hits by trying the neighbouring cells first.
#[derive(Debug, Default)]
pub struct BotPlayer {
    width: usize,
    fired: Vec<bool>,
    follow_ups: Vec<(i32, i32)>,
}

impl BotPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Five vertical lines on the even columns. Legal on every board of the
    /// minimum size.
    pub fn fallback_fleet() -> [ShipSpec; NUM_SHIPS] {
        core::array::from_fn(|i| ShipSpec::new(2, 1, 2 * i as i32, 0))
    }

    fn reset_grid(&mut self, width: usize, height: usize) {
        if self.width != width || self.fired.len() != width * height {
            self.width = width;
            self.fired = vec![false; width * height];
            self.follow_ups.clear();
        }
    }

    fn take(&mut self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 || col as usize >= self.width {
            return false;
        }
        let idx = row as usize * self.width + col as usize;
        match self.fired.get_mut(idx) {
            Some(fired) if !*fired => {
                *fired = true;
                true
            }
            _ => false,
        }
    }
}

impl Player for BotPlayer {
    fn fleet(&mut self, rng: &mut SmallRng, width: usize, height: usize) -> [ShipSpec; NUM_SHIPS] {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let fleet = core::array::from_fn(|_| {
                let shape = ShipShape::ALL[rng.random_range(0..ShipShape::ALL.len())];
                let rotation = Rotation::ALL[rng.random_range(0..Rotation::ALL.len())];
                ShipSpec::new(
                    shape.to_wire(),
                    rotation.to_wire(),
                    rng.random_range(0..width as i32),
                    rng.random_range(0..height as i32),
                )
            });
            let mut scratch = Board::new(width, height);
            if place_fleet(&mut scratch, &fleet).is_ok() {
                return fleet;
            }
        }
        log::debug!("no random fleet found, using the fallback layout");
        Self::fallback_fleet()
    }

    fn select_target(&mut self, rng: &mut SmallRng, width: usize, height: usize) -> (i32, i32) {
        self.reset_grid(width, height);
        while let Some((row, col)) = self.follow_ups.pop() {
            if self.take(row, col) {
                return (row, col);
            }
        }
        let open: Vec<usize> = (0..self.fired.len()).filter(|i| !self.fired[*i]).collect();
        if open.is_empty() {
            return (0, 0);
        }
        let idx = open[rng.random_range(0..open.len())];
        self.fired[idx] = true;
        ((idx / width) as i32, (idx % width) as i32)
    }

    fn handle_shot_result(&mut self, (row, col): (i32, i32), hit: bool) {
        if hit {
            self.follow_ups
                .extend([(row - 1, col), (row + 1, col), (row, col - 1), (row, col + 1)]);
        }
    }
}
