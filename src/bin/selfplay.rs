use anyhow::Context;
use clap::Parser;
use cube4::config::AppConfig;
use cube4::movelog::MoveLogStore;
use cube4::selfplay::run_self_play;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cube4-selfplay", about = "Play random games against itself and append them to the move log")]
struct Args {
    /// Number of games (overrides the config file)
    #[arg(long)]
    games: Option<usize>,
    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// Move log to append to (overrides the config file)
    #[arg(long)]
    log: Option<PathBuf>,
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let cfg = AppConfig::load_or_default(a.config.as_deref()).context("loading config")?;
    let mut params = cfg.selfplay;
    if let Some(g) = a.games {
        params.games = g;
    }
    if let Some(s) = a.seed {
        params.seed = s;
    }
    if let Some(p) = a.log {
        params.log_path = p;
    }

    let store = MoveLogStore::new(&params.log_path);
    eprintln!("Playing {} games (seed={}) into {}", params.games, params.seed, store.path().display());
    let pb = if a.quiet { ProgressBar::hidden() } else { ProgressBar::new(params.games as u64) };
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}]")?);
    let stats = run_self_play(&params, &store, |_| pb.inc(1))
        .with_context(|| format!("writing {}", store.path().display()))?;
    pb.finish_and_clear();

    if a.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!(
            "games: {} p1: {} p2: {} draws: {} mean moves: {:.1}",
            stats.games, stats.player_one_wins, stats.player_two_wins, stats.draws, stats.mean_moves()
        );
    }
    Ok(())
}
