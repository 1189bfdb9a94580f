use crate::engine::BoardEngine;

// Leaf count of the game tree below `engine`. Games that end before `depth`
// contribute nothing.
pub fn perft(engine: &BoardEngine, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0u64;
    for col in engine.legal_columns() {
        let mut child = engine.clone();
        if child.place_column(col).is_ok() {
            nodes += perft(&child, depth - 1);
        }
    }
    nodes
}
