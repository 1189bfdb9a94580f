use clap::Parser;
use cube4::perft::perft;
use cube4::{BoardEngine, Column};
use rayon::prelude::*;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "cube4-perft", about = "Count game-tree leaves from a position")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Moves to play first, e.g. "A1 B2 0,3"
    #[arg(long, default_value = "")]
    moves: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let moves = args
        .moves
        .split_whitespace()
        .map(|m| m.parse::<Column>())
        .collect::<Result<Vec<_>, _>>()?;
    let base = BoardEngine::from_moves(&moves)?;
    let depth = args.depth;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 || depth == 0 {
            perft(&base, depth)
        } else {
            base.legal_columns().par_iter().map(|&col| {
                let mut child = base.clone();
                match child.place_column(col) {
                    Ok(_) => perft(&child, depth - 1),
                    Err(_) => 0,
                }
            }).sum()
        };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps {
        println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON));
    } else {
        println!("nodes: {nodes}");
    }
    Ok(())
}
