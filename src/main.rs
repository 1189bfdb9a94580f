use anyhow::{Context, Result};
use clap::Parser;
use cube4::config::AppConfig;
use cube4::movelog::MoveLogStore;
use cube4::{BoardEngine, Column, GameStatus, Player};
use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Three-dimensional four-in-a-row on a 4x4x4 board", long_about = None)]
struct Args {
    /// Operation mode: 'p' to play, 'r' to replay and check the move log
    #[arg(long, default_value = "p")]
    mode: String,

    /// Side played by the random auto-player: 'none', '1' or '2'
    #[arg(long, default_value = "none")]
    auto: String,

    /// Move log path (overrides the config file)
    #[arg(long)]
    log: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not append finished games to the move log
    #[arg(long)]
    no_log: bool,

    /// Start with reach cells hidden
    #[arg(long)]
    hide_reach: bool,

    /// RNG seed for the auto-player (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// In replay mode, print the final board of this game (1-based)
    #[arg(long)]
    game: Option<usize>,
}

fn parse_auto(s: &str) -> Result<Option<Player>> {
    match s.to_lowercase().as_str() {
        "none" | "0" | "" => Ok(None),
        "1" | "one" => Ok(Some(Player::One)),
        "2" | "two" => Ok(Some(Player::Two)),
        _ => anyhow::bail!("Invalid auto side: use 'none', '1' or '2'"),
    }
}

fn print_board(engine: &BoardEngine, show_reach: bool) {
    println!("\n{}", engine.render(show_reach));
}

fn announce(status: GameStatus) {
    match status {
        GameStatus::Won(p) => println!("\n{} wins!", p),
        GameStatus::Draw => println!("\nThe board is full. It's a draw!"),
        GameStatus::InProgress => {}
    }
}

fn play(args: &Args, cfg: &AppConfig) -> Result<()> {
    let auto = parse_auto(&args.auto)?;
    let store = MoveLogStore::new(&cfg.log_path);
    let mut rng = match args.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_entropy(),
    };
    let mut show_reach = cfg.show_reach && !args.hide_reach;
    let mut engine = BoardEngine::new();

    println!("Three-dimensional four-in-a-row");
    println!("===============================");
    println!("Enter a column as letter+number (e.g. B3) or 'x, y'.");
    println!("Commands: 'random', 'reach' (toggle hints), 'reset', 'quit'");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if auto == Some(engine.current_player()) && !engine.status().is_over() {
            let placed = engine.random_place(&mut rng)?;
            println!("\nAuto-player plays: {}", placed.pos.column().label());
        }

        print_board(&engine, show_reach);
        if engine.status().is_over() {
            announce(engine.status());
            if !args.no_log {
                if let Some(rec) = engine.record() {
                    store.record_game(&rec).with_context(|| format!("writing {}", store.path().display()))?;
                }
            }
            print!("Play again? [y/N]: ");
            io::stdout().flush()?;
            match lines.next() {
                Some(Ok(answer)) if answer.trim().eq_ignore_ascii_case("y") => {
                    engine.reset();
                    continue;
                }
                _ => break,
            }
        }

        print!("{} to move: ", engine.current_player());
        io::stdout().flush()?;
        let input = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        match input.trim() {
            "quit" | "q" => {
                println!("Thanks for playing!");
                break;
            }
            "reset" => engine.reset(),
            "reach" => show_reach = !show_reach,
            "random" => {
                engine.random_place(&mut rng)?;
            }
            other => match other.parse::<Column>().and_then(|c| engine.place_column(c)) {
                Ok(p) => println!("Landed at height {}", p.pos.z + 1),
                Err(e) => println!("{}", e),
            },
        }
    }
    Ok(())
}

fn replay(args: &Args, cfg: &AppConfig) -> Result<()> {
    let store = MoveLogStore::new(&cfg.log_path);
    let games = store.read_all_games().with_context(|| format!("reading {}", store.path().display()))?;
    let mut mismatches = 0usize;
    for (i, rec) in games.iter().enumerate() {
        match BoardEngine::from_moves(&rec.moves) {
            Ok(engine) if engine.status() == rec.outcome => {
                if args.game == Some(i + 1) {
                    print_board(&engine, false);
                    announce(engine.status());
                }
            }
            Ok(engine) => {
                mismatches += 1;
                warn!("game {}: logged {} but replay gives {}", i + 1, rec.outcome, engine.status());
            }
            Err(e) => {
                mismatches += 1;
                warn!("game {}: replay failed: {}", i + 1, e);
            }
        }
    }
    println!("games: {} consistent: {} mismatched: {}", games.len(), games.len() - mismatches, mismatches);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut cfg = AppConfig::load_or_default(args.config.as_deref()).context("loading config")?;
    if let Some(p) = &args.log {
        cfg.log_path = p.clone();
    }

    match args.mode.chars().next().unwrap_or('p') {
        'r' => replay(&args, &cfg),
        'p' => play(&args, &cfg),
        other => anyhow::bail!("Unknown mode '{}': use 'p' or 'r'", other),
    }
}
