use std::fmt;

use log::debug;
use rand::Rng;

use crate::board::lines::{self, is_full};
use crate::board::{
    render, Cell, Column, GameStatus, Lattice, Player, Pos, ReachGrid, EMPTY_LATTICE, EMPTY_REACH, SIZE,
};
use crate::error::PlaceError;
use crate::movelog::GameRecord;

/// Where a piece landed and the game status right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub pos: Pos,
    pub status: GameStatus,
}

/// Board state of one game: lattice, reach marks, turn, status and the moves
/// played so far. Mutated only through placements and `reset`.
#[derive(Clone, Debug)]
pub struct BoardEngine {
    lattice: Lattice,
    reach: ReachGrid,
    turn: Player,
    status: GameStatus,
    moves: Vec<Column>,
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardEngine {
    pub fn new() -> Self {
        Self {
            lattice: EMPTY_LATTICE,
            reach: EMPTY_REACH,
            turn: Player::One,
            status: GameStatus::InProgress,
            moves: Vec::with_capacity(SIZE * SIZE * SIZE),
        }
    }

    /// Back to the empty board with player one to move.
    pub fn reset(&mut self) {
        self.lattice = EMPTY_LATTICE;
        self.reach = EMPTY_REACH;
        self.turn = Player::One;
        self.status = GameStatus::InProgress;
        self.moves.clear();
    }

    /// Replays `moves` from the empty board, stopping at the first illegal one.
    pub fn from_moves(moves: &[Column]) -> Result<Self, PlaceError> {
        let mut engine = Self::new();
        for &col in moves {
            engine.place_column(col)?;
        }
        Ok(engine)
    }

    /// Drops the current player's piece into column (x, y).
    pub fn place(&mut self, x: usize, y: usize) -> Result<Placement, PlaceError> {
        let col = Column::new(x, y)?;
        self.place_column(col)
    }

    pub fn place_column(&mut self, col: Column) -> Result<Placement, PlaceError> {
        self.drop_piece(self.turn, col)
    }

    /// Drops `player`'s piece regardless of whose turn it is; the turn then
    /// passes to the other player unless the game ended. Meant for setting up
    /// positions.
    pub fn place_as(&mut self, player: Player, x: usize, y: usize) -> Result<Placement, PlaceError> {
        let col = Column::new(x, y)?;
        self.drop_piece(player, col)
    }

    /// Tries uniformly random columns until one accepts a piece.
    pub fn random_place<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Placement, PlaceError> {
        // A non-terminal board always has a free column, so the loop ends.
        if self.status.is_over() {
            return Err(PlaceError::GameOver);
        }
        loop {
            let x = rng.gen_range(0..SIZE);
            let y = rng.gen_range(0..SIZE);
            match self.place(x, y) {
                Err(PlaceError::ColumnFull { .. }) => continue,
                other => return other,
            }
        }
    }

    fn drop_piece(&mut self, player: Player, col: Column) -> Result<Placement, PlaceError> {
        if self.status.is_over() {
            return Err(PlaceError::GameOver);
        }
        // Column fields are public, so a caller may hand in one that never
        // went through `Column::new`.
        let col = Column::new(col.x, col.y)?;
        let z = self.height(col);
        if z >= SIZE {
            return Err(PlaceError::ColumnFull { x: col.x, y: col.y });
        }
        self.lattice[col.x][col.y][z] = Cell::Filled(player);
        let scan = lines::scan(&self.lattice, player, &mut self.reach);
        self.status = if scan.won() {
            GameStatus::Won(player)
        } else if is_full(&self.lattice) {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        };
        self.moves.push(col);
        // The mover keeps the turn once the game is over.
        self.turn = if self.status.is_over() { player } else { player.other() };
        let pos = Pos::new(col.x, col.y, z);
        debug!(
            "{} -> {} at z={} ({} complete, {} reach) {}",
            player, col.label(), z, scan.complete_lines, scan.reach_marks, self.status
        );
        Ok(Placement { pos, status: self.status })
    }

    /// Number of pieces in the column, i.e. the z the next piece lands at.
    /// Columns outside the board read as full.
    pub fn height(&self, col: Column) -> usize {
        match self.lattice.get(col.x).and_then(|row| row.get(col.y)) {
            Some(stack) => stack.iter().take_while(|c| !c.is_empty()).count(),
            None => SIZE,
        }
    }

    pub fn is_column_full(&self, col: Column) -> bool {
        self.height(col) >= SIZE
    }

    /// Columns that can still take a piece; empty once the game is over.
    pub fn legal_columns(&self) -> Vec<Column> {
        if self.status.is_over() {
            return Vec::new();
        }
        Column::all().filter(|c| !self.is_column_full(*c)).collect()
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn cell(&self, p: Pos) -> Cell {
        self.lattice[p.x][p.y][p.z]
    }

    /// Raw reach grid. Slots of occupied cells may hold stale marks.
    pub fn reach_grid(&self) -> &ReachGrid {
        &self.reach
    }

    /// Whether `player` would complete a line by playing at the empty cell `p`.
    /// Always false for occupied cells.
    pub fn is_reach(&self, p: Pos, player: Player) -> bool {
        self.cell(p).is_empty() && !self.reach[p.x][p.y][p.z][player.index()].is_empty()
    }

    /// Empty cells currently marked as reach for `player`.
    pub fn reach_cells(&self, player: Player) -> Vec<Pos> {
        Pos::all().filter(|p| self.is_reach(*p, player)).collect()
    }

    pub fn current_player(&self) -> Player {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves(&self) -> &[Column] {
        &self.moves
    }

    /// The finished game as a log record; `None` while still in progress.
    pub fn record(&self) -> Option<GameRecord> {
        if !self.status.is_over() {
            return None;
        }
        Some(GameRecord { outcome: self.status, moves: self.moves.clone() })
    }

    pub fn render(&self, show_reach: bool) -> String {
        render(&self.lattice, &self.reach, show_reach)
    }
}

impl fmt::Display for BoardEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
