//! Core game logic - pure, deterministic, and testable
//!
//! The falling-block core: piece geometry, rotation, collision and kicks, locking, complete-row
//! detection and compaction. It has **no I/O**: rendering, input and timers live in the driver,
//! which calls into [`Game`] and drains [`CoreEvent`]s afterwards.
//!
//! # Module Structure
//!
//! - [`shapes`]: N×N templates of the seven kinds and the color-aware shape library
//! - [`rng`]: seeded LCG and weighted piece selection
//! - [`piece`]: the falling piece and its pivot-table rotation
//! - [`field`]: locked blocks, movement legality, locking, row clears and compaction
//! - [`kick`]: wall/floor kicks after rotation
//! - [`game`]: the inbound API (spawn, move, rotate, lock, tick, hard drop, hold)
//! - [`events`]: outbound notifications
//! - [`config`]: dimensions, weights, colors, gravity
//!
//! # Example
//!
//! ```
//! use blockfall_core::{CoreConfig, Game};
//! use blockfall_types::{MoveDirection, PieceKind, RotationDirection};
//!
//! let mut game = Game::new(CoreConfig::default(), 12345).unwrap();
//! game.spawn_piece(Some(PieceKind::T)).unwrap();
//!
//! assert!(game.move_piece(MoveDirection::Left).unwrap());
//! assert!(game.rotate(RotationDirection::Clockwise).unwrap());
//!
//! let (_distance, outcome) = game.hard_drop().unwrap();
//! assert!(outcome.cleared_rows.is_empty());
//! assert_eq!(game.field().len(), 4);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod field;
pub mod game;
pub mod kick;
pub mod piece;
pub mod rng;
pub mod shapes;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::{ColorScheme, CoreConfig, GravityConfig};
pub use error::{ConfigError, FieldError, GameError};
pub use events::CoreEvent;
pub use field::{Block, ClearReport, Field, LockedCell, RowShift};
pub use game::{Game, LockOutcome, TickOutcome};
pub use kick::Kicked;
pub use piece::{rotate_matrix, Piece};
pub use rng::{pick_random, PieceGenerator, SimpleRng, WeightTable};
pub use shapes::{shape_cells, ShapeLibrary, ShapeMatrix};
