// 4x4x4 four-in-a-row with gravity: board engine, reach detection, move log
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod movelog;
pub mod perft;
pub mod selfplay;

pub use board::{Cell, Column, GameStatus, Player, Pos, PLAYERS, SIZE};
pub use engine::{BoardEngine, Placement};
pub use error::{LogError, PlaceError};
pub use movelog::{GameRecord, MoveLogStore};
