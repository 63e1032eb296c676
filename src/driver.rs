//! Headless driver: a seeded autoplayer that exercises the core without a renderer.
//!
//! Each piece gets a random orientation and target column, is steered there, then falls under
//! simulated gravity (soft drop once aligned). Every core event is logged as a
//! `[Driver]`-prefixed line and, when `BLOCKFALL_EVENT_LOG` is set, appended to a JSON-lines
//! file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::core::{CoreConfig, CoreEvent, Game, SimpleRng, TickOutcome};
use crate::types::{MoveDirection, RotationDirection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverArgs {
    pub seed: u32,
    pub pieces: u32,
    pub config_path: Option<PathBuf>,
    pub quiet: bool,
}

impl Default for DriverArgs {
    fn default() -> Self {
        Self {
            seed: 1,
            pieces: 100,
            config_path: None,
            quiet: false,
        }
    }
}

pub fn parse_driver_args(args: &[String]) -> Result<DriverArgs> {
    let mut out = DriverArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                out.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--pieces" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --pieces"))?;
                out.pieces = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --pieces value: {}", v))?;
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                out.config_path = Some(PathBuf::from(v));
            }
            "--quiet" | "-q" => out.quiet = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(out)
}

/// JSON config file if given, otherwise defaults with `BLOCKFALL_*` overrides
pub fn load_config(path: Option<&Path>) -> Result<CoreConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<CoreConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => CoreConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

/// Totals for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pieces_locked: u32,
    pub rows_cleared: u32,
    pub rotations_rejected: u32,
    pub ticks: u32,
    pub simulated_ms: u64,
    pub topped_out: bool,
}

/// Writes events to stdout and an optional JSON-lines file
pub struct EventLog {
    quiet: bool,
    file: Option<BufWriter<File>>,
}

impl EventLog {
    pub fn new(quiet: bool, path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                let f = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("opening event log {}", path.display()))?;
                Some(BufWriter::new(f))
            }
            None => None,
        };
        Ok(Self { quiet, file })
    }

    /// Path from `BLOCKFALL_EVENT_LOG`, ignoring blank values
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::var("BLOCKFALL_EVENT_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    pub fn record(&mut self, event: &CoreEvent) -> Result<()> {
        if !self.quiet {
            println!("[Driver] {}", describe(event));
        }
        if let Some(file) = self.file.as_mut() {
            serde_json::to_writer(&mut *file, event)?;
            file.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// One-line human description of an event
pub fn describe(event: &CoreEvent) -> String {
    match event {
        CoreEvent::PieceSpawned {
            piece_id,
            kind,
            origin,
        } => format!("piece {} ({}) spawned at {}", piece_id, kind, origin),
        CoreEvent::PieceLocked {
            piece_id, cells, ..
        } => {
            let cells: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
            format!("piece {} locked at {}", piece_id, cells.join(" "))
        }
        CoreEvent::RowsCompleted { rows, cells } => {
            format!("rows {:?} completed ({} blocks removed)", rows, cells.len())
        }
        CoreEvent::RowsShifted { shifts } => format!("{} blocks shifted down", shifts.len()),
        CoreEvent::RotationRejected {
            piece_id,
            direction,
        } => format!("piece {} rotation {:?} rejected", piece_id, direction),
        CoreEvent::PieceHeld { held, released } => match released {
            Some(r) => format!("held {}, released {}", held, r),
            None => format!("held {}", held),
        },
        CoreEvent::ToppedOut { kind } => format!("topped out spawning {}", kind),
    }
}

/// Play until `pieces` have locked or the stack tops out
///
/// Roughly every fourth piece is hard dropped and every seventh is swapped into hold first,
/// the rest fall under (soft-drop) gravity ticks.
pub fn run(config: CoreConfig, args: &DriverArgs, log: &mut EventLog) -> Result<RunSummary> {
    let mut game = Game::new(config, args.seed)?;
    let mut rng = SimpleRng::new(args.seed ^ 0x9e37_79b9);
    let mut summary = RunSummary::default();
    let width = game.field().width() as u32;

    while summary.pieces_locked < args.pieces && !game.game_over() {
        if game.active().is_none() {
            summary.ticks += 1;
            summary.simulated_ms += game.drop_interval_ms() as u64;
            if game.tick()? == TickOutcome::ToppedOut {
                drain(&mut game, log, &mut summary)?;
                break;
            }
        }

        if rng.next_u32() % 7 == 0 {
            if let Err(e) = game.hold() {
                if !game.game_over() {
                    return Err(e.into());
                }
                drain(&mut game, log, &mut summary)?;
                break;
            }
        }
        steer(&mut game, &mut rng, width)?;
        drain(&mut game, log, &mut summary)?;

        let cleared = if rng.next_u32() % 4 == 0 {
            let (_, outcome) = game.hard_drop()?;
            outcome.cleared_rows.len()
        } else {
            fall(&mut game, &mut summary)?
        };
        summary.pieces_locked += 1;
        summary.rows_cleared += cleared as u32;
        drain(&mut game, log, &mut summary)?;
    }

    summary.topped_out = game.game_over();
    log.flush()?;
    Ok(summary)
}

/// Tick with soft drop held until the active piece locks; returns rows cleared
fn fall(game: &mut Game, summary: &mut RunSummary) -> Result<usize> {
    game.set_soft_drop(true);
    let cleared = loop {
        summary.ticks += 1;
        summary.simulated_ms += game.drop_interval_ms() as u64;
        match game.tick()? {
            TickOutcome::Fell => continue,
            TickOutcome::Locked(outcome) => break outcome.cleared_rows.len(),
            other => return Err(anyhow!("unexpected tick outcome while falling: {:?}", other)),
        }
    };
    game.set_soft_drop(false);
    Ok(cleared)
}

fn steer(game: &mut Game, rng: &mut SimpleRng, width: u32) -> Result<()> {
    let turns = rng.next_u32() % 4;
    let direction = if rng.next_u32() % 2 == 0 {
        RotationDirection::Clockwise
    } else {
        RotationDirection::CounterClockwise
    };
    for _ in 0..turns {
        game.rotate(direction)?;
    }

    let target = (rng.next_u32() % width) as i32;
    while let Some(piece) = game.active() {
        let leftmost = piece.cells().iter().map(|c| c.x).min().unwrap_or(target);
        let step = if leftmost < target {
            MoveDirection::Right
        } else if leftmost > target {
            MoveDirection::Left
        } else {
            break;
        };
        if !game.move_piece(step)? {
            break;
        }
    }
    Ok(())
}

fn drain(game: &mut Game, log: &mut EventLog, summary: &mut RunSummary) -> Result<()> {
    for event in game.drain_events() {
        if matches!(event, CoreEvent::RotationRejected { .. }) {
            summary.rotations_rejected += 1;
        }
        log.record(&event)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_driver_args_parses_all_flags() {
        let args: Vec<String> = ["--seed", "42", "--pieces", "7", "--config", "cfg.json", "-q"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let parsed = parse_driver_args(&args).unwrap();
        assert_eq!(
            parsed,
            DriverArgs {
                seed: 42,
                pieces: 7,
                config_path: Some(PathBuf::from("cfg.json")),
                quiet: true,
            }
        );
    }

    #[test]
    fn parse_driver_args_uses_defaults() {
        assert_eq!(parse_driver_args(&[]).unwrap(), DriverArgs::default());
    }

    #[test]
    fn parse_driver_args_rejects_bad_values() {
        let bad = vec!["--seed".to_string(), "abc".to_string()];
        assert!(parse_driver_args(&bad).is_err());
        let missing = vec!["--pieces".to_string()];
        assert!(parse_driver_args(&missing).is_err());
        let unknown = vec!["--port".to_string()];
        assert!(parse_driver_args(&unknown).is_err());
    }
}
