use std::collections::HashSet;

use battleship_arbiter::{place_fleet, resolve, Board, BotPlayer, QueryReport};
use proptest::prelude::*;

fn lines_board() -> Board {
    let mut board = Board::new(10, 10);
    place_fleet(&mut board, &BotPlayer::fallback_fleet()).unwrap();
    board
}

#[test]
fn test_fresh_board_reports_only_count() {
    let board = lines_board();
    assert_eq!(QueryReport::of(&board).to_string(), "G 5");
}

#[test]
fn test_hits_listed_before_misses() {
    let mut board = lines_board();
    resolve(&mut board, 5, 5).unwrap();
    resolve(&mut board, 1, 0).unwrap();
    resolve(&mut board, 0, 1).unwrap();
    resolve(&mut board, 0, 2).unwrap();
    assert_eq!(
        QueryReport::of(&board).to_string(),
        "G 5 H 0 2 H 1 0 M 0 1 M 5 5"
    );
}

#[test]
fn test_unhit_ships_stay_hidden() {
    let mut board = lines_board();
    resolve(&mut board, 0, 0).unwrap();
    let report = QueryReport::of(&board);
    assert_eq!(report.hits, vec![(0, 0)]);
    assert!(report.misses.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn report_lists_each_resolved_cell_once(
        shots in prop::collection::vec((-2..12i32, -2..12i32), 0..150),
    ) {
        let mut board = lines_board();
        let mut resolved = HashSet::new();
        for (row, col) in shots {
            if resolve(&mut board, row, col).is_ok() {
                resolved.insert((row as usize, col as usize));
            }
        }

        let report = QueryReport::of(&board);
        let listed: Vec<(usize, usize)> =
            report.hits.iter().chain(report.misses.iter()).copied().collect();
        let unique: HashSet<(usize, usize)> = listed.iter().copied().collect();
        prop_assert_eq!(listed.len(), unique.len());
        prop_assert_eq!(unique, resolved);
        prop_assert_eq!(report.ships_remaining, board.ships_remaining());
    }
}
