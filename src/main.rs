//! # Monte-Carlo 2048 Player
//!
//! Plays one game of 2048 with the Monte-Carlo predictor choosing every move
//! and prints the board as it goes.
//!
//! ## Usage
//! Run with `cargo run --release -- --depth 30 --attempts 50` for best performance.
//! Set `RUST_LOG=debug` to see the per-direction estimates of every decision.

use clap::Parser;
use colored::{ColoredString, Colorize};
use mc2048::{
    AutoPlayConfig, AutoPlayer, Executor, GameConfig, GameSession, Grid, MonteCarlo, MoveResult, SearchConfig,
    SequentialExecutor, TurnReport,
};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board side length
    #[clap(short, long, default_value_t = 4)]
    size: usize,

    /// Maximum moves simulated per rollout
    #[clap(short, long, default_value_t = 30)]
    depth: usize,

    /// Rollouts per direction per decision
    #[clap(short, long, default_value_t = 50)]
    attempts: usize,

    /// Number of decisions to make (default: play until the game is over)
    #[clap(short, long)]
    moves: Option<u64>,

    /// Pause between decisions in milliseconds
    #[clap(long, default_value_t = 0)]
    interval_ms: u64,

    /// Worker threads for the rollout pool (0 = automatic)
    #[clap(short, long, default_value_t = 0)]
    num_threads: usize,

    /// Seed for spawns and rollouts, for reproducible games
    #[clap(long)]
    seed: Option<u64>,

    /// Run the four direction jobs on the calling thread instead of a pool
    #[clap(long, action = clap::ArgAction::SetTrue)]
    sequential: bool,

    /// Only print the final board and summary
    #[clap(short, long, action = clap::ArgAction::SetTrue)]
    quiet: bool,

    /// Print the move history when the game ends
    #[clap(long, action = clap::ArgAction::SetTrue)]
    history: bool,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            depth: self.depth,
            attempts: self.attempts,
            threads: self.num_threads,
            seed: self.seed,
        }
    }

    fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size,
            // Offset so spawns and rollouts don't replay the same stream.
            seed: self.seed.map(|s| s.wrapping_add(1)),
        }
    }

    fn autoplay_config(&self) -> AutoPlayConfig {
        AutoPlayConfig {
            moves: self.moves,
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

/// Colours a tile by magnitude
fn paint(value: u32, width: usize) -> ColoredString {
    if value == 0 {
        return format!("{:>width$}", ".", width = width).dimmed();
    }
    let text = format!("{:>width$}", value, width = width);
    match value {
        2 | 4 => text.white(),
        8 | 16 => text.yellow(),
        32 | 64 => text.red(),
        128 | 256 => text.magenta().bold(),
        512 | 1024 => text.cyan().bold(),
        _ => text.green().bold(),
    }
}

fn print_board(grid: &Grid) {
    let width = grid.max_tile().max(1).to_string().len().max(4);
    for row in grid.rows() {
        let cells: Vec<String> = row.iter().map(|&v| paint(v, width).to_string()).collect();
        println!("  {}", cells.join(" "));
    }
}

fn print_turn(report: &TurnReport, session: &GameSession) {
    let outcome = match report.result {
        MoveResult::Applied { score_delta, .. } => format!("+{}", score_delta),
        MoveResult::NoOp => "no-op".to_string(),
        MoveResult::GameOver => "game over".to_string(),
    };
    let fallback = if report.random_fallback { " (random)" } else { "" };
    println!(
        "Turn {}: {}{} {} | score {} | {:.1?}",
        report.turn,
        report.direction.to_string().bold(),
        fallback,
        outcome,
        session.score(),
        report.prediction_time
    );
    print_board(session.grid());
}

fn play<E: Executor>(args: &Args, predictor: MonteCarlo<E>) -> mc2048::Result<()> {
    let mut session = GameSession::from_config(&args.game_config())?;

    println!("Monte-Carlo 2048");
    println!("================");
    println!("Board: {}x{}", args.size, args.size);
    println!("Depth: {}  Attempts: {}", predictor.depth(), predictor.attempts());
    println!("Executor: {}", predictor.executor().name());
    println!("------------------------------------");
    print_board(session.grid());

    #[cfg(debug_assertions)]
    println!("WARNING: Running in debug mode. Rollouts will be significantly slower.\nUse --release for real games.\n");

    let player = AutoPlayer::new(predictor, args.autoplay_config());
    let quiet = args.quiet;
    let summary = player.run(&mut session, |report, session| {
        if !quiet {
            print_turn(report, session);
        }
    });

    if quiet {
        print_board(session.grid());
    }
    println!("\nResults:");
    println!("  Score: {}", summary.score);
    println!("  Best tile: {}", summary.max_tile);
    println!("  Turns: {} ({} no-op)", summary.turns, summary.noop_turns);
    println!("  Game over: {}", summary.finished);
    println!("  Mean prediction time: {:.3?}", summary.mean_prediction_time);
    println!("  Total time: {:.3?}", summary.elapsed);

    if args.history {
        println!("\n{}", session.format_history());
    }
    Ok(())
}

fn run(args: &Args) -> mc2048::Result<()> {
    let search = args.search_config();
    if args.sequential {
        let predictor = MonteCarlo::with_executor(&search, SequentialExecutor)?;
        play(args, predictor)
    } else {
        let predictor = MonteCarlo::from_config(&search)?;
        play(args, predictor)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
