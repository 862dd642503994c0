use std::collections::HashSet;

use battleship_arbiter::{
    pattern_for, place_fleet, try_place, Board, BotPlayer, Cell, PlacementError, Player, Rotation,
    ShipShape, ShipSpec, NUM_SHIPS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

/// Square, horizontal line, L, reverse L and S, all disjoint on a 10x10 grid.
fn mixed_fleet() -> [ShipSpec; NUM_SHIPS] {
    [
        ShipSpec::new(1, 1, 0, 0),
        ShipSpec::new(2, 2, 3, 0),
        ShipSpec::new(3, 1, 0, 4),
        ShipSpec::new(4, 1, 5, 3),
        ShipSpec::new(6, 2, 0, 7),
    ]
}

fn ship_cells(board: &Board, id: u8) -> HashSet<(usize, usize)> {
    board
        .cells()
        .filter(|(_, cell)| *cell == Cell::Occupied(id))
        .map(|(pos, _)| pos)
        .collect()
}

fn assert_fleet_placed(board: &Board, fleet: &[ShipSpec; NUM_SHIPS]) {
    let mut all = HashSet::new();
    for (i, spec) in fleet.iter().enumerate() {
        let id = (i + 1) as u8;
        let cells = ship_cells(board, id);
        let pattern = pattern_for(
            ShipShape::from_wire(spec.shape).unwrap(),
            Rotation::from_wire(spec.rotation).unwrap(),
        );
        assert_eq!(cells.len(), pattern.len() + 1, "ship {}", id);
        assert!(cells.contains(&(spec.row as usize, spec.col as usize)));
        for cell in cells {
            assert!(all.insert(cell), "cell {:?} shared by two ships", cell);
        }
    }
    assert_eq!(board.ships_remaining(), 5);
}

#[test]
fn test_valid_fleet_is_placed() {
    let mut board = Board::new(10, 10);
    let fleet = mixed_fleet();
    place_fleet(&mut board, &fleet).unwrap();
    assert_fleet_placed(&board, &fleet);
}

#[test]
fn test_fallback_fleet_is_valid_on_minimum_board() {
    let mut board = Board::new(10, 10);
    let fleet = BotPlayer::fallback_fleet();
    place_fleet(&mut board, &fleet).unwrap();
    assert_fleet_placed(&board, &fleet);
}

#[test]
fn test_overlap_resets_board() {
    let mut board = Board::new(10, 10);
    let mut fleet = mixed_fleet();
    // Vertical line from (0, 1) crosses the square.
    fleet[4] = ShipSpec::new(2, 1, 1, 0);
    assert_eq!(place_fleet(&mut board, &fleet), Err(PlacementError::Overlap));
    assert!(board.is_empty());

    // A corrected batch goes through on the same board.
    place_fleet(&mut board, &mixed_fleet()).unwrap();
    assert_fleet_placed(&board, &mixed_fleet());
}

#[test]
fn test_batch_reports_shapes_first() {
    let mut board = Board::new(10, 10);
    let mut fleet = mixed_fleet();
    fleet[0].rotation = 5;
    fleet[2].row = -1;
    fleet[4].shape = 8;
    assert_eq!(place_fleet(&mut board, &fleet), Err(PlacementError::InvalidShape));
    assert!(board.is_empty());
}

#[test]
fn test_batch_reports_rotations_before_bounds() {
    let mut board = Board::new(10, 10);
    let mut fleet = mixed_fleet();
    fleet[0].row = 9;
    fleet[4].rotation = 0;
    assert_eq!(place_fleet(&mut board, &fleet), Err(PlacementError::InvalidRotation));
}

#[test]
fn test_batch_reports_bounds_before_overlap() {
    let mut board = Board::new(10, 10);
    let mut fleet = mixed_fleet();
    // Ship 2 collides with ship 1, ship 5 hangs off the bottom edge.
    fleet[1] = ShipSpec::new(1, 1, 1, 1);
    fleet[4] = ShipSpec::new(2, 1, 9, 8);
    assert_eq!(place_fleet(&mut board, &fleet), Err(PlacementError::OutOfBounds));
    assert!(board.is_empty());
}

#[test]
fn test_try_place_leaves_no_partial_ship() {
    let mut board = Board::new(10, 10);
    // Horizontal line starting at column 8 needs columns 8..=11.
    assert_eq!(try_place(&mut board, 2, 2, 8, 0, 1), Err(PlacementError::OutOfBounds));
    assert!(board.is_empty());

    try_place(&mut board, 1, 1, 0, 0, 1).unwrap();
    let before = board.clone();
    // Line down column 1 starts on a square cell.
    assert_eq!(try_place(&mut board, 2, 1, 1, 0, 2), Err(PlacementError::Overlap));
    assert_eq!(board, before);
}

#[test]
fn test_pattern_doubling_back_collides_with_itself() {
    let mut board = Board::new(10, 10);
    // Reverse L rotation 2 steps down then straight back up onto the anchor.
    assert_eq!(try_place(&mut board, 4, 2, 3, 3, 1), Err(PlacementError::Overlap));
    assert!(board.is_empty());
}

#[test]
fn test_try_place_checks_in_order() {
    let mut board = Board::new(10, 10);
    assert_eq!(try_place(&mut board, 0, 0, -5, -5, 1), Err(PlacementError::InvalidShape));
    assert_eq!(try_place(&mut board, 1, 9, -5, -5, 1), Err(PlacementError::InvalidRotation));
    assert_eq!(try_place(&mut board, 1, 1, -5, -5, 1), Err(PlacementError::OutOfBounds));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bot_fleets_are_always_legal(seed in any::<u64>(), width in 10..16usize, height in 10..16usize) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut bot = BotPlayer::new();
        let fleet = bot.fleet(&mut rng, width, height);
        let mut board = Board::new(width, height);
        prop_assert_eq!(place_fleet(&mut board, &fleet), Ok(()));
        let occupied = board.cells().filter(|(_, c)| matches!(c, Cell::Occupied(_))).count();
        prop_assert!(occupied >= 4 * NUM_SHIPS);
    }
}
