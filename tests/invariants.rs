// Properties that must hold after every placement of seeded random games.
use cube4::board::lines::winning_lines;
use cube4::{BoardEngine, Cell, Column, GameStatus, Player, Pos, SIZE};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn assert_gravity(e: &BoardEngine) {
    for col in Column::all() {
        let h = e.height(col);
        for z in 0..SIZE {
            let filled = e.cell(Pos::new(col.x, col.y, z)) != Cell::Empty;
            assert_eq!(filled, z < h, "floating piece or hole in {:?}", col);
        }
    }
}

fn complete_line(e: &BoardEngine, player: Player) -> bool {
    winning_lines().iter().any(|l| l.cells.iter().all(|p| e.cell(*p) == Cell::Filled(player)))
}

#[test]
fn random_games_keep_invariants() {
    for seed in 0..60u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut e = BoardEngine::new();
        let mut expected_turn = Player::One;
        let mut pieces = 0usize;
        while !e.status().is_over() {
            let mover = e.current_player();
            assert_eq!(mover, expected_turn);
            let x = rng.gen_range(0..SIZE);
            let y = rng.gen_range(0..SIZE);
            let full = e.is_column_full(Column { x, y });
            match e.place(x, y) {
                Ok(p) => {
                    assert!(!full);
                    pieces += 1;
                    assert_eq!(e.cell(p.pos), Cell::Filled(mover));
                    let status = e.status();
                    if complete_line(&e, mover) {
                        assert_eq!(status, GameStatus::Won(mover));
                    } else if pieces == SIZE * SIZE * SIZE {
                        assert_eq!(status, GameStatus::Draw);
                    } else {
                        assert_eq!(status, GameStatus::InProgress);
                    }
                    assert!(!complete_line(&e, mover.other()));
                    if status.is_over() {
                        assert_eq!(e.current_player(), mover);
                    } else {
                        expected_turn = mover.other();
                        assert_eq!(e.current_player(), expected_turn);
                    }
                }
                Err(err) => {
                    assert!(full, "unexpected error {}", err);
                    assert_eq!(e.current_player(), mover);
                }
            }
            assert_gravity(&e);
            assert_eq!(e.moves().len(), pieces);
        }
    }
}

#[test]
fn replaying_moves_reproduces_the_game() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut e = BoardEngine::new();
    while !e.status().is_over() {
        e.random_place(&mut rng).unwrap();
    }
    let replay = BoardEngine::from_moves(e.moves()).unwrap();
    assert_eq!(replay.lattice(), e.lattice());
    assert_eq!(replay.status(), e.status());
    assert_eq!(replay.reach_grid(), e.reach_grid());
}
