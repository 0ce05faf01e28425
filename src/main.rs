use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use klotski_solver::config::SolverConfig;
use klotski_solver::{LoadBoard, Solve};

/// Parallel A* solver for Klotski-style sliding block puzzles.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the board file.
    board: PathBuf,

    /// Number of worker threads, 0 means one per hardware thread.
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Give up after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print only the result, not the board.
    #[arg(long)]
    quiet: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board = args.board.load_board().unwrap_or_else(|err| {
        eprintln!("Can't load board {}: {}", args.board.display(), err);
        process::exit(1);
    });

    if !args.quiet {
        println!("Solving {}...", args.board.display());
        print!("{}", board);
        println!();
    }

    let mut config = SolverConfig::default().with_workers(args.workers);
    if let Some(ms) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }

    let result = board.solve(&config).unwrap_or_else(|err| {
        eprintln!("{}", err);
        process::exit(2);
    });

    print!("{}", result);
}
