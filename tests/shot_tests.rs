use battleship_arbiter::{place_fleet, resolve, Board, BotPlayer, Cell, ShotError, ShotOutcome};
use proptest::prelude::*;

/// 10x10 board with five vertical lines on the even columns, rows 0..=3.
fn lines_board() -> Board {
    let mut board = Board::new(10, 10);
    place_fleet(&mut board, &BotPlayer::fallback_fleet()).unwrap();
    board
}

#[test]
fn test_sink_decrements_once() {
    let mut board = lines_board();
    for row in 0..3 {
        assert_eq!(
            resolve(&mut board, row, 0),
            Ok(ShotOutcome::Hit { ships_remaining: 5 })
        );
    }
    assert_eq!(
        resolve(&mut board, 3, 0),
        Ok(ShotOutcome::Hit { ships_remaining: 4 })
    );
    assert_eq!(board.occupied_by(1), 0);
    assert_eq!(board.get(3, 0), Some(Cell::Hit));
}

#[test]
fn test_miss_marks_cell() {
    let mut board = lines_board();
    assert_eq!(
        resolve(&mut board, 5, 5),
        Ok(ShotOutcome::Miss { ships_remaining: 5 })
    );
    assert_eq!(board.get(5, 5), Some(Cell::Miss));
}

#[test]
fn test_repeated_shot_is_rejected() {
    let mut board = lines_board();
    resolve(&mut board, 0, 2).unwrap();
    resolve(&mut board, 9, 9).unwrap();
    assert_eq!(resolve(&mut board, 0, 2), Err(ShotError::AlreadyShot));
    assert_eq!(resolve(&mut board, 9, 9), Err(ShotError::AlreadyShot));
    assert_eq!(board.ships_remaining(), 5);
    assert_eq!(board.get(0, 2), Some(Cell::Hit));
}

#[test]
fn test_out_of_bounds_shot() {
    let mut board = lines_board();
    let before = board.clone();
    for (row, col) in [(-1, 0), (0, -1), (10, 0), (0, 10), (i32::MAX, i32::MIN)] {
        assert_eq!(resolve(&mut board, row, col), Err(ShotError::OutOfBounds));
    }
    assert_eq!(board, before);
}

#[test]
fn test_last_ship_reaches_zero() {
    let mut board = lines_board();
    let mut last = None;
    for col in (0..10).step_by(2) {
        for row in 0..4 {
            last = Some(resolve(&mut board, row, col).unwrap());
        }
    }
    assert_eq!(last, Some(ShotOutcome::Hit { ships_remaining: 0 }));
    assert_eq!(board.ships_remaining(), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_ship_sinks_exactly_once(order in Just((0..100).collect::<Vec<i32>>()).prop_shuffle()) {
        let mut board = lines_board();
        let mut drops = 0;
        for idx in order {
            let before = board.ships_remaining();
            let outcome = resolve(&mut board, idx / 10, idx % 10).unwrap();
            prop_assert!(before - outcome.ships_remaining() <= 1);
            if outcome.ships_remaining() < before {
                prop_assert!(outcome.is_hit());
                drops += 1;
            }
        }
        prop_assert_eq!(drops, 5);
        prop_assert_eq!(board.ships_remaining(), 0);
    }
}
