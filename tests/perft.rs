use cube4::perft::perft;
use cube4::{BoardEngine, Column};

#[test]
fn perft_empty_board_small_depths() {
    let e = BoardEngine::new();
    assert_eq!(perft(&e, 0), 1);
    assert_eq!(perft(&e, 1), 16);
    assert_eq!(perft(&e, 2), 256);
    assert_eq!(perft(&e, 3), 4096);
    assert_eq!(perft(&e, 4), 65536);
}

#[test]
fn perft_respects_full_columns() {
    let moves: Vec<Column> = vec![Column { x: 0, y: 0 }; 4];
    let e = BoardEngine::from_moves(&moves).unwrap();
    assert_eq!(perft(&e, 1), 15);
    assert_eq!(perft(&e, 2), 225);
}

#[test]
fn perft_stops_at_finished_games() {
    let mut e = BoardEngine::new();
    for x in 0..3 {
        e.place(x, 0).unwrap();
        e.place(x, 3).unwrap();
    }
    // Player one to move: only (3, 0) wins outright, the other 15 replies continue.
    assert_eq!(perft(&e, 1), 16);
    assert_eq!(perft(&e, 2), 15 * 16);
}
