use clap::Parser;
use mc2048::{
    apply_move, spawn_tile, AutoPlayConfig, AutoPlayer, Direction, Executor, GameSession, GameSummary, Grid,
    MonteCarlo, SearchConfig, SequentialExecutor,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::hint::black_box;
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board side length (default: 4)
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// Games to play per executor (default: 10)
    #[arg(long, default_value_t = 10)]
    runs: usize,

    /// Rollout depth (default: 30)
    #[arg(long, default_value_t = 30)]
    depth: usize,

    /// Rollouts per direction (default: 30)
    #[arg(long, default_value_t = 30)]
    attempts: usize,

    /// Worker threads for the pool executor (0 = automatic)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Decision cap per game (default: play until the game is over)
    #[arg(long)]
    max_moves: Option<u64>,

    /// Base seed; game `i` uses `seed + i`
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Random moves for the raw move-throughput test (0 to skip)
    #[arg(long, default_value_t = 100_000)]
    move_samples: usize,

    /// Run only the sequential executor (skip the pool benchmark)
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    sequential_only: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    println!("Monte-Carlo 2048 - Benchmark Tool");
    println!("=================================");
    println!("Board: {}x{}", args.size, args.size);
    println!("Runs: {}", args.runs);
    println!("Depth: {}  Attempts: {}", args.depth, args.attempts);
    println!("Pool Threads: {}", args.threads);
    println!("------------------------------------");

    #[cfg(debug_assertions)]
    println!("WARNING: Running in debug mode. Performance will be significantly lower.\nUse --release for accurate benchmarks.\n");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> mc2048::Result<()> {
    if args.move_samples > 0 {
        move_throughput(args)?;
    }

    let search = SearchConfig {
        depth: args.depth,
        attempts: args.attempts,
        threads: args.threads,
        seed: Some(args.seed),
    };

    println!("\nRunning sequential benchmark...");
    let sequential = MonteCarlo::with_executor(&search, SequentialExecutor)?;
    let summaries = play_games(args, sequential)?;
    print_stats(SequentialExecutor.name(), &summaries);

    #[cfg(feature = "parallel")]
    {
        if !args.sequential_only {
            println!("\nRunning pool benchmark...");
            let pool = MonteCarlo::from_config(&search)?;
            let name = pool.executor().name();
            let summaries = play_games(args, pool)?;
            print_stats(name, &summaries);
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        println!("\nPool benchmark skipped (feature 'parallel' not enabled)");
    }

    Ok(())
}

fn play_games<E: Executor>(args: &Args, predictor: MonteCarlo<E>) -> mc2048::Result<Vec<GameSummary>> {
    let player = AutoPlayer::new(
        predictor,
        AutoPlayConfig {
            moves: args.max_moves,
            interval: Duration::ZERO,
        },
    );

    let mut summaries = Vec::with_capacity(args.runs);
    for i in 0..args.runs {
        let mut session = GameSession::new(args.size, Some(args.seed.wrapping_add(i as u64)))?;
        let summary = player.run(&mut session, |_, _| {});
        println!(
            "  game {:>3}: score {:>7}  best tile {:>5}  turns {:>5}  {:.2?}",
            i + 1,
            summary.score,
            summary.max_tile,
            summary.turns,
            summary.elapsed
        );
        summaries.push(summary);
    }
    Ok(summaries)
}

fn print_stats(name: &str, summaries: &[GameSummary]) {
    if summaries.is_empty() {
        println!("{} Results: no games played", name);
        return;
    }
    let n = summaries.len() as f64;
    let max_score = summaries.iter().map(|s| s.score).max().unwrap_or(0);
    let mean_score = summaries.iter().map(|s| s.score as f64).sum::<f64>() / n;
    let mean_time = summaries.iter().map(|s| s.elapsed.as_secs_f64()).sum::<f64>() / n;
    let turns: u64 = summaries.iter().map(|s| s.turns).sum();
    let decision_time: f64 = summaries
        .iter()
        .map(|s| s.mean_prediction_time.as_secs_f64() * s.turns as f64)
        .sum();
    let best_tile = summaries.iter().map(|s| s.max_tile).max().unwrap_or(0);

    println!("{} Results:", name);
    println!("  Max Score: {}", max_score);
    println!("  Mean Score: {:.2}", mean_score);
    println!("  Best Tile: {}", best_tile);
    println!("  Mean Game Time: {:.3}s", mean_time);
    if turns > 0 {
        println!("  Mean Decision Time: {:.3}ms", decision_time * 1000.0 / turns as f64);
    }
}

/// Times `apply_move` on randomly filled boards
fn move_throughput(args: &Args) -> mc2048::Result<()> {
    let empty = Grid::new(args.size)?;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(args.seed);
    let start = Instant::now();
    let mut merged: u64 = 0;

    for _ in 0..args.move_samples {
        let mut grid = empty.clone();
        for _ in 0..4 {
            if let Ok(next) = spawn_tile(&grid, &mut rng) {
                grid = next;
            }
        }
        let outcome = apply_move(&grid, Direction::random(&mut rng));
        merged += black_box(outcome.score);
    }

    let secs = start.elapsed().as_secs_f64();
    println!("\nMove Throughput:");
    println!("  Moves: {}", args.move_samples);
    println!("  Time: {:.3}s", secs);
    println!("  MPS: {:.0} moves/sec", args.move_samples as f64 / secs.max(f64::EPSILON));
    println!("  Merged Points: {}", merged);
    Ok(())
}
