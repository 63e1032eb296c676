//! Headless runner (default binary).
//!
//! Plays a seeded game with the autoplayer in [`blockfall::driver`] and prints every core
//! event. Usage: `blockfall [--seed N] [--pieces N] [--config path.json] [--quiet]`.

use anyhow::Result;

use blockfall::driver::{load_config, parse_driver_args, run, EventLog};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_driver_args(&args)?;

    let config = load_config(args.config_path.as_deref())?;
    println!(
        "[Driver] field {}x{}, seed {}, up to {} pieces",
        config.width, config.height, args.seed, args.pieces
    );

    let log_path = EventLog::path_from_env();
    if let Some(path) = log_path.as_ref() {
        println!("[Driver] writing events to {}", path.display());
    }
    let mut log = EventLog::new(args.quiet, log_path.as_deref())?;

    let summary = match run(config, &args, &mut log) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("[Driver] run failed: {:#}", e);
            return Err(e);
        }
    };

    println!(
        "[Driver] locked {} pieces, cleared {} rows, {} rotations rejected, {} ticks ({} ms simulated){}",
        summary.pieces_locked,
        summary.rows_cleared,
        summary.rotations_rejected,
        summary.ticks,
        summary.simulated_ms,
        if summary.topped_out { ", topped out" } else { "" }
    );
    Ok(())
}
