// Winning-line table and the per-move line scan.
//
// A line of length SIZE in a SIZE-cube always spans the whole cube along its
// direction, so each direction contributes SIZE^(zero components) lines:
// 3 axes * 16 + 6 face diagonals * 4 + 4 space diagonals * 1 = 76.
use std::sync::OnceLock;

use super::{Cell, Lattice, Player, Pos, ReachGrid, SIZE};

pub const LINE_COUNT: usize = 76;

/// One direction per line family, first non-zero component positive.
const DIRECTIONS: [(i32, i32, i32); 13] = [
    // axes
    (1, 0, 0),
    (0, 1, 0),
    (0, 0, 1),
    // diagonals of horizontal layers (fixed z)
    (1, 1, 0),
    (1, -1, 0),
    // diagonals of vertical planes with fixed y
    (1, 0, 1),
    (1, 0, -1),
    // diagonals of vertical planes with fixed x
    (0, 1, 1),
    (0, 1, -1),
    // space diagonals
    (1, 1, 1),
    (1, 1, -1),
    (1, -1, 1),
    (1, -1, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Parallel to one axis: verticals, and rows/columns of a layer.
    Axis,
    /// Diagonal of a horizontal layer or of a vertical plane.
    FaceDiagonal,
    /// Corner-to-corner through the cube interior.
    SpaceDiagonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub kind: LineKind,
    pub cells: [Pos; SIZE],
}

impl WinningLine {
    pub fn contains(&self, p: Pos) -> bool {
        self.cells.contains(&p)
    }
}

/// How a line looks from the mover's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// Every cell holds the mover's piece.
    Complete,
    /// All but one cell hold the mover's piece and the remaining cell is empty.
    OneShort(Pos),
    Open,
}

/// Totals from one full scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOutcome {
    pub complete_lines: usize,
    pub reach_marks: usize,
}

impl ScanOutcome {
    pub fn won(&self) -> bool {
        self.complete_lines > 0
    }
}

fn starts(component: i32) -> std::ops::Range<usize> {
    match component {
        1 => 0..1,
        -1 => SIZE - 1..SIZE,
        _ => 0..SIZE,
    }
}

fn build_lines() -> Vec<WinningLine> {
    let mut lines = Vec::with_capacity(LINE_COUNT);
    for &(dx, dy, dz) in DIRECTIONS.iter() {
        let kind = match [dx, dy, dz].iter().filter(|c| **c != 0).count() {
            1 => LineKind::Axis,
            2 => LineKind::FaceDiagonal,
            _ => LineKind::SpaceDiagonal,
        };
        for sx in starts(dx) {
            for sy in starts(dy) {
                for sz in starts(dz) {
                    let mut cells = [Pos::new(0, 0, 0); SIZE];
                    for (i, cell) in cells.iter_mut().enumerate() {
                        let step = i as i32;
                        *cell = Pos::new(
                            (sx as i32 + dx * step) as usize,
                            (sy as i32 + dy * step) as usize,
                            (sz as i32 + dz * step) as usize,
                        );
                    }
                    lines.push(WinningLine { kind, cells });
                }
            }
        }
    }
    debug_assert_eq!(lines.len(), LINE_COUNT);
    lines
}

/// All 76 winning lines of the cube, built once.
pub fn winning_lines() -> &'static [WinningLine] {
    static LINES: OnceLock<Vec<WinningLine>> = OnceLock::new();
    LINES.get_or_init(build_lines)
}

/// Lines passing through `p`: 7 for the corners and the eight interior
/// cells, 4 for every other cell.
pub fn lines_through(p: Pos) -> impl Iterator<Item = &'static WinningLine> {
    winning_lines().iter().filter(move |l| l.contains(p))
}

pub fn classify(lattice: &Lattice, line: &WinningLine, mover: Player) -> LineState {
    let mut own = 0usize;
    let mut gap = None;
    for p in line.cells {
        match lattice[p.x][p.y][p.z] {
            Cell::Filled(q) if q == mover => own += 1,
            Cell::Empty => gap = Some(p),
            Cell::Filled(_) => {}
        }
    }
    if own == SIZE {
        return LineState::Complete;
    }
    match gap {
        Some(g) if own == SIZE - 1 => LineState::OneShort(g),
        _ => LineState::Open,
    }
}

/// Checks every winning line for `mover`, marking the gap of each one-short
/// line in `reach`. Marks are only ever added; the other player's slots and
/// marks on cells that filled up later are left as they are.
pub fn scan(lattice: &Lattice, mover: Player, reach: &mut ReachGrid) -> ScanOutcome {
    let mut out = ScanOutcome::default();
    for line in winning_lines() {
        match classify(lattice, line, mover) {
            LineState::Complete => out.complete_lines += 1,
            LineState::OneShort(g) => {
                reach[g.x][g.y][g.z][mover.index()] = Cell::Filled(mover);
                out.reach_marks += 1;
            }
            LineState::Open => {}
        }
    }
    out
}

pub fn is_full(lattice: &Lattice) -> bool {
    lattice.iter().flatten().flatten().all(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{EMPTY_LATTICE, EMPTY_REACH};

    #[test]
    fn test_lines_have_distinct_cells_in_bounds() {
        for line in winning_lines() {
            for (i, a) in line.cells.iter().enumerate() {
                assert!(a.x < SIZE && a.y < SIZE && a.z < SIZE);
                for b in &line.cells[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_classify_ignores_opponent_gap() {
        let mut lat = EMPTY_LATTICE;
        for z in 0..3 {
            lat[0][0][z] = Cell::Filled(Player::One);
        }
        lat[0][0][3] = Cell::Filled(Player::Two);
        let vertical = winning_lines()
            .iter()
            .find(|l| l.cells == [Pos::new(0, 0, 0), Pos::new(0, 0, 1), Pos::new(0, 0, 2), Pos::new(0, 0, 3)])
            .unwrap();
        assert_eq!(classify(&lat, vertical, Player::One), LineState::Open);
        assert_eq!(classify(&lat, vertical, Player::Two), LineState::Open);
    }

    #[test]
    fn test_scan_empty_board_is_quiet() {
        let mut reach = EMPTY_REACH;
        let out = scan(&EMPTY_LATTICE, Player::One, &mut reach);
        assert_eq!(out, ScanOutcome::default());
        assert_eq!(reach, EMPTY_REACH);
    }
}
