use cube4::board::lines::winning_lines;
use cube4::{BoardEngine, Cell, GameStatus, Player, Pos};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Reach computed from scratch: some line through `p` holds three of
/// `player`'s pieces while `p` itself is empty.
fn oracle_reach(e: &BoardEngine, p: Pos, player: Player) -> bool {
    if e.cell(p) != Cell::Empty {
        return false;
    }
    winning_lines().iter().filter(|l| l.contains(p)).any(|l| {
        l.cells.iter().filter(|c| e.cell(**c) == Cell::Filled(player)).count() == 3
    })
}

fn assert_reach_matches_oracle(e: &BoardEngine) {
    for p in Pos::all() {
        for pl in Player::ALL {
            assert_eq!(e.is_reach(p, pl), oracle_reach(e, p, pl), "cell {:?} player {:?}\n{}", p, pl, e.render(true));
        }
    }
}

#[test]
fn space_diagonal_reach_then_win() {
    let mut e = BoardEngine::new();
    e.place_as(Player::One, 0, 0).unwrap(); // (0,0,0)
    e.place_as(Player::Two, 1, 1).unwrap();
    e.place_as(Player::One, 1, 1).unwrap(); // (1,1,1)
    e.place_as(Player::Two, 2, 2).unwrap();
    e.place_as(Player::Two, 2, 2).unwrap();
    e.place_as(Player::One, 2, 2).unwrap(); // (2,2,2)
    let target = Pos::new(3, 3, 3);
    assert!(e.is_reach(target, Player::One));
    assert!(!e.is_reach(target, Player::Two));

    for _ in 0..3 {
        e.place_as(Player::Two, 3, 3).unwrap();
    }
    assert_eq!(e.status(), GameStatus::InProgress);
    assert!(e.is_reach(target, Player::Two), "vertical threat on (3,3)");
    assert!(e.is_reach(target, Player::One));
    assert_reach_matches_oracle(&e);

    let p = e.place_as(Player::One, 3, 3).unwrap();
    assert_eq!(p.pos, target);
    assert_eq!(p.status, GameStatus::Won(Player::One));
}

#[test]
fn reach_marks_go_stale_once_filled() {
    let mut e = BoardEngine::new();
    for _ in 0..3 {
        e.place_as(Player::One, 1, 2).unwrap();
    }
    let top = Pos::new(1, 2, 3);
    assert!(e.is_reach(top, Player::One));
    e.place_as(Player::Two, 1, 2).unwrap();
    // The raw grid keeps the old mark; the accessor hides it.
    assert_eq!(e.reach_grid()[1][2][3][Player::One.index()], Cell::Filled(Player::One));
    assert!(!e.is_reach(top, Player::One));
    assert!(e.reach_cells(Player::One).is_empty());
}

#[test]
fn reach_grid_matches_oracle_through_random_games() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..40 {
        let mut e = BoardEngine::new();
        while !e.status().is_over() {
            e.random_place(&mut rng).unwrap();
            assert_reach_matches_oracle(&e);
        }
    }
}

#[test]
fn reach_cells_lists_only_empty_threats() {
    let mut e = BoardEngine::new();
    for x in 0..3 {
        e.place_as(Player::Two, x, 0).unwrap();
    }
    assert_eq!(e.reach_cells(Player::Two), vec![Pos::new(3, 0, 0)]);
    assert!(e.reach_cells(Player::One).is_empty());
}
