pub mod lines;

use std::fmt;
use std::str::FromStr;

use crate::error::PlaceError;

/// Edge length of the cube. Every winning line has exactly this many cells.
pub const SIZE: usize = 4;
/// Number of players taking turns.
pub const PLAYERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; PLAYERS] = [Player::One, Player::Two];

    /// The opponent.
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Slot in per-player arrays (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Outcome code written to the move log when this player wins.
    pub fn code(self) -> i8 {
        self.index() as i8
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }

    fn symbol(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contents of one lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Filled(p) => Some(p),
        }
    }
}

/// Outcome of the game so far. Derived by the engine after every placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(p) => Some(p),
            _ => None,
        }
    }

    /// Integer outcome code used in the move log:
    /// -1 no result yet, -2 draw, 0 player one won, 1 player two won.
    pub fn code(self) -> i8 {
        match self {
            GameStatus::InProgress => -1,
            GameStatus::Draw => -2,
            GameStatus::Won(p) => p.code(),
        }
    }

    pub fn from_code(code: i8) -> Option<GameStatus> {
        match code {
            -1 => Some(GameStatus::InProgress),
            -2 => Some(GameStatus::Draw),
            0 => Some(GameStatus::Won(Player::One)),
            1 => Some(GameStatus::Won(Player::Two)),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("in progress"),
            GameStatus::Won(p) => write!(f, "{} wins", p),
            GameStatus::Draw => f.write_str("draw"),
        }
    }
}

/// A lattice coordinate. `z = 0` is the bottom of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Pos { x, y, z }
    }

    pub fn column(self) -> Column {
        Column { x: self.x, y: self.y }
    }

    /// Iterates every cell of the cube in x, y, z order.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..SIZE).flat_map(|x| (0..SIZE).flat_map(move |y| (0..SIZE).map(move |z| Pos::new(x, y, z))))
    }
}

/// A vertical column chosen by the mover; the landing height is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Column {
    pub x: usize,
    pub y: usize,
}

impl Column {
    pub fn new(x: usize, y: usize) -> Result<Self, PlaceError> {
        if x >= SIZE || y >= SIZE {
            return Err(PlaceError::OutOfBounds { x, y });
        }
        Ok(Column { x, y })
    }

    pub fn all() -> impl Iterator<Item = Column> {
        (0..SIZE).flat_map(|x| (0..SIZE).map(move |y| Column { x, y }))
    }

    /// Human label: x as a letter starting at `A`, y as a 1-based number.
    /// Coordinates outside the letter range show as `?`.
    pub fn label(self) -> String {
        let letter = u8::try_from(self.x)
            .ok()
            .and_then(|x| b'A'.checked_add(x))
            .filter(u8::is_ascii_uppercase)
            .map_or('?', char::from);
        format!("{}{}", letter, self.y.saturating_add(1))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

impl FromStr for Column {
    type Err = PlaceError;

    /// Accepts a label such as `B3` or the log form `1, 2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let bad = || PlaceError::BadColumn(raw.to_string());
        if let Some((xs, ys)) = raw.split_once(',') {
            let x = xs.trim().parse::<usize>().map_err(|_| bad())?;
            let y = ys.trim().parse::<usize>().map_err(|_| bad())?;
            return Column::new(x, y);
        }
        let mut chars = raw.chars();
        let letter = chars.next().ok_or_else(bad)?.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(bad());
        }
        let number = chars.as_str().parse::<usize>().map_err(|_| bad())?;
        if number == 0 {
            return Err(bad());
        }
        Column::new((letter as u8 - b'A') as usize, number - 1)
    }
}

/// Cell states indexed `[x][y][z]`.
pub type Lattice = [[[Cell; SIZE]; SIZE]; SIZE];

/// Per-cell, per-player reach marks indexed `[x][y][z][player]`.
/// A slot holds `Filled(p)` when `p` completes a line by playing there.
/// Values at cells that have since been filled are stale.
pub type ReachGrid = [[[[Cell; PLAYERS]; SIZE]; SIZE]; SIZE];

pub const EMPTY_LATTICE: Lattice = [[[Cell::Empty; SIZE]; SIZE]; SIZE];
pub const EMPTY_REACH: ReachGrid = [[[[Cell::Empty; PLAYERS]; SIZE]; SIZE]; SIZE];

/// Draws the four horizontal layers side by side, bottom layer first.
/// Empty cells show `.`; with `show_reach`, empty reach cells show the
/// lowercase symbol of the player who threatens them (`*` for both).
pub fn render(lattice: &Lattice, reach: &ReachGrid, show_reach: bool) -> String {
    let mut out = String::new();
    for z in 0..SIZE {
        out.push_str(&format!("z={}   ", z));
        out.push_str(&" ".repeat(SIZE * 2 - 2));
    }
    out.push('\n');
    for _ in 0..SIZE {
        out.push_str("  ");
        for x in 0..SIZE {
            out.push((b'A' + x as u8) as char);
            out.push(' ');
        }
        out.push_str("  ");
    }
    out.push('\n');
    for y in 0..SIZE {
        for z in 0..SIZE {
            out.push_str(&format!("{} ", y + 1));
            for x in 0..SIZE {
                out.push(cell_char(lattice, reach, Pos::new(x, y, z), show_reach));
                out.push(' ');
            }
            out.push_str("  ");
        }
        out.push('\n');
    }
    out
}

fn cell_char(lattice: &Lattice, reach: &ReachGrid, p: Pos, show_reach: bool) -> char {
    match lattice[p.x][p.y][p.z] {
        Cell::Filled(pl) => pl.symbol(),
        Cell::Empty if show_reach => {
            let marks = reach[p.x][p.y][p.z];
            match (marks[0].is_empty(), marks[1].is_empty()) {
                (false, false) => '*',
                (false, true) => 'x',
                (true, false) => 'o',
                (true, true) => '.',
            }
        }
        Cell::Empty => '.',
    }
}
