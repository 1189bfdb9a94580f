// Random self-play: both sides use `random_place` until the game ends.
use std::path::PathBuf;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{GameStatus, Player};
use crate::engine::BoardEngine;
use crate::error::LogError;
use crate::movelog::{GameRecord, MoveLogStore, DEFAULT_LOG_PATH};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayParams {
    pub games: usize,
    pub seed: u64,
    pub log_path: PathBuf,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 100, seed: 42, log_path: PathBuf::from(DEFAULT_LOG_PATH) }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub games: usize,
    pub player_one_wins: usize,
    pub player_two_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
}

impl SelfPlayStats {
    pub fn add(&mut self, rec: &GameRecord) {
        self.games += 1;
        self.total_moves += rec.moves.len();
        match rec.outcome {
            GameStatus::Won(Player::One) => self.player_one_wins += 1,
            GameStatus::Won(Player::Two) => self.player_two_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }

    pub fn mean_moves(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }
}

/// Plays one game to the end on `engine`, which is reset first.
pub fn play_random_game(engine: &mut BoardEngine, rng: &mut SmallRng) -> GameRecord {
    engine.reset();
    while !engine.status().is_over() {
        if let Err(e) = engine.random_place(rng) {
            // Only reachable if the status check above is wrong.
            warn!("random placement failed mid-game: {}", e);
            break;
        }
    }
    engine.record().unwrap_or_else(|| GameRecord { outcome: engine.status(), moves: engine.moves().to_vec() })
}

/// Plays `params.games` games in memory. Same seed, same games.
pub fn generate_games(params: &SelfPlayParams) -> Vec<GameRecord> {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let mut engine = BoardEngine::new();
    (0..params.games).map(|_| play_random_game(&mut engine, &mut rng)).collect()
}

/// Plays `params.games` games, appending each to `store` as soon as it ends.
/// `on_game` sees every record after it has been written.
pub fn run_self_play<F: FnMut(&GameRecord)>(
    params: &SelfPlayParams,
    store: &MoveLogStore,
    mut on_game: F,
) -> Result<SelfPlayStats, LogError> {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let mut engine = BoardEngine::new();
    let mut stats = SelfPlayStats::default();
    for _ in 0..params.games {
        let rec = play_random_game(&mut engine, &mut rng);
        store.record_game(&rec)?;
        stats.add(&rec);
        on_game(&rec);
    }
    info!(
        "self-play done: {} games, p1 {} / p2 {} / draw {}, {:.1} moves per game",
        stats.games, stats.player_one_wins, stats.player_two_wins, stats.draws, stats.mean_moves()
    );
    Ok(stats)
}
