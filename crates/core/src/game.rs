//! Game module - the inbound API the driver calls
//!
//! Ties together the field, the single active piece, the weighted generator and the event
//! queue. Every operation runs to completion: a lock resolves its row clears before returning,
//! so the next spawn always sees a settled field.
//!
//! Timing is the driver's job. It calls [`Game::tick`] whenever its gravity timer fires and
//! asks [`Game::drop_interval_ms`] how long to wait for the next one.

use crate::config::CoreConfig;
use crate::error::{ConfigError, GameError};
use crate::events::CoreEvent;
use crate::field::Field;
use crate::kick;
use crate::piece::Piece;
use crate::rng::{PieceGenerator, WeightTable};
use crate::shapes::ShapeLibrary;
use crate::types::{CellPos, GameAction, MoveDirection, PieceKind, RotationDirection};

/// Result of locking a piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOutcome {
    pub piece_id: u32,
    pub cells: Vec<CellPos>,
    /// Rows cleared by this lock, bottom to top
    pub cleared_rows: Vec<usize>,
}

/// What one gravity tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The active piece fell one row
    Fell,
    /// The active piece could not fall and was locked; the next piece has been spawned unless
    /// the game topped out
    Locked(LockOutcome),
    /// There was no active piece, so one was spawned
    Spawned(u32),
    /// The next piece could not be placed
    ToppedOut,
}

/// Complete core state
#[derive(Debug, Clone)]
pub struct Game {
    config: CoreConfig,
    library: ShapeLibrary,
    field: Field,
    generator: PieceGenerator,
    active: Option<Piece>,
    held: Option<PieceKind>,
    can_hold: bool,
    /// Monotonic id for spawned pieces (0 = none spawned yet)
    piece_id: u32,
    soft_drop: bool,
    game_over: bool,
    events: Vec<CoreEvent>,
}

impl Game {
    /// Validate `config` and build an empty game
    pub fn new(config: CoreConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;

        let field = Field::new(config.width, config.height)?;
        let generator = PieceGenerator::new(WeightTable::new(&config.weights)?, seed);
        let library = ShapeLibrary::new(config.colors);

        Ok(Self {
            config,
            library,
            field,
            generator,
            active: None,
            held: None,
            can_hold: true,
            piece_id: 0,
            soft_drop: false,
            game_over: false,
            events: Vec::new(),
        })
    }

    /// Validated configuration this game was built from
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Templates and colors used for spawning
    pub fn library(&self) -> &ShapeLibrary {
        &self.library
    }

    /// Locked blocks
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Mutable field access for setting up positions
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// The falling piece, if one is in play
    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Kind in the hold slot
    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    /// Whether the current piece may still be swapped into hold
    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Set once a spawn has been blocked
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Kind the generator will produce next
    pub fn next_kind(&self) -> PieceKind {
        self.generator.peek()
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events waiting to be drained
    pub fn pending_events(&self) -> &[CoreEvent] {
        &self.events
    }

    /// Spawn origin for a piece of `kind`
    ///
    /// Horizontally at `width / 2 - 1`, pulled left if the template would poke past the right
    /// wall; vertically at the top row.
    pub fn spawn_origin(&self, kind: PieceKind) -> CellPos {
        let size = self.library.shape_cells(kind).size() as i32;
        let width = self.field.width() as i32;
        let x = (width / 2 - 1).min(width - size).max(0);
        CellPos::new(x, 0)
    }

    /// Spawn a new active piece, drawn from the generator unless `kind` is given
    pub fn spawn_piece(&mut self, kind: Option<PieceKind>) -> Result<Piece, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if let Some(active) = self.active {
            return Err(GameError::PieceAlreadyActive(active.id));
        }

        let kind = kind.unwrap_or_else(|| self.generator.draw());
        self.place_new(kind)
    }

    fn place_new(&mut self, kind: PieceKind) -> Result<Piece, GameError> {
        let piece = Piece::from_library(
            &self.library,
            self.piece_id.wrapping_add(1),
            kind,
            self.spawn_origin(kind),
        );

        if !self.field.fits(&piece) {
            self.game_over = true;
            self.events.push(CoreEvent::ToppedOut { kind });
            return Err(GameError::SpawnBlocked(kind));
        }

        self.piece_id = piece.id;
        self.active = Some(piece);
        self.can_hold = true;
        self.events.push(CoreEvent::PieceSpawned {
            piece_id: piece.id,
            kind,
            origin: piece.origin,
        });
        Ok(piece)
    }

    /// Whether the active piece can take one step (false without an active piece)
    pub fn can_move(&self, direction: MoveDirection) -> bool {
        self.active
            .as_ref()
            .is_some_and(|piece| self.field.can_move(piece, direction))
    }

    /// Move the active piece one step; `Ok(false)` if blocked
    pub fn move_piece(&mut self, direction: MoveDirection) -> Result<bool, GameError> {
        let piece = self.active.ok_or(GameError::NoActivePiece)?;
        if !self.field.can_move(&piece, direction) {
            return Ok(false);
        }
        self.active = Some(piece.translated(direction.delta()));
        Ok(true)
    }

    /// Rotate the active piece, kicking it off walls and floor if needed
    ///
    /// `Ok(false)` when no legal placement exists; the piece is then unchanged and a
    /// `RotationRejected` event is queued.
    pub fn rotate(&mut self, direction: RotationDirection) -> Result<bool, GameError> {
        let piece = self.active.ok_or(GameError::NoActivePiece)?;
        match kick::try_rotate(&self.field, &piece, direction) {
            Some(kicked) => {
                self.active = Some(kicked.piece);
                Ok(true)
            }
            None => {
                self.events.push(CoreEvent::RotationRejected {
                    piece_id: piece.id,
                    direction,
                });
                Ok(false)
            }
        }
    }

    /// Lock the active piece and resolve any completed rows
    ///
    /// Does not spawn the next piece. On `Err` the piece stays active and the field is
    /// unchanged.
    pub fn lock(&mut self) -> Result<LockOutcome, GameError> {
        let piece = self.active.ok_or(GameError::NoActivePiece)?;
        let locked = self.field.lock(&piece)?;
        self.active = None;

        let cells: Vec<CellPos> = locked.iter().map(|c| c.pos).collect();
        self.events.push(CoreEvent::PieceLocked {
            piece_id: piece.id,
            kind: piece.kind,
            color: piece.color,
            cells: cells.clone(),
        });

        let cleared_rows = self.resolve_clears();
        Ok(LockOutcome {
            piece_id: piece.id,
            cells,
            cleared_rows,
        })
    }

    /// Clear every complete row and compact the field
    ///
    /// Returns the cleared row indices (bottom to top) as they were before compaction.
    pub fn resolve_clears(&mut self) -> Vec<usize> {
        let rows = self.field.complete_rows();
        if rows.is_empty() {
            return rows;
        }

        let report = self.field.clear_rows(&rows);
        self.events.push(CoreEvent::RowsCompleted {
            rows: report.rows.clone(),
            cells: report.removed,
        });
        if !report.shifts.is_empty() {
            self.events.push(CoreEvent::RowsShifted {
                shifts: report.shifts,
            });
        }
        report.rows
    }

    /// One gravity step
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }

        if self.active.is_none() {
            return Ok(match self.spawn_piece(None) {
                Ok(piece) => TickOutcome::Spawned(piece.id),
                Err(GameError::SpawnBlocked(_)) => TickOutcome::ToppedOut,
                Err(e) => return Err(e),
            });
        }

        if self.move_piece(MoveDirection::Down)? {
            return Ok(TickOutcome::Fell);
        }

        let outcome = self.lock()?;
        self.spawn_next()?;
        Ok(TickOutcome::Locked(outcome))
    }

    /// Drop the active piece as far as it goes, lock it and spawn the next one
    ///
    /// Returns the distance dropped alongside the lock outcome.
    pub fn hard_drop(&mut self) -> Result<(u32, LockOutcome), GameError> {
        let mut distance = 0;
        while self.move_piece(MoveDirection::Down)? {
            distance += 1;
        }
        let outcome = self.lock()?;
        self.spawn_next()?;
        Ok((distance, outcome))
    }

    /// Spawn after a lock
    ///
    /// A blocked spawn is the ordinary top-out: game over is already flagged and the event
    /// queued. Anything else is a contract violation and propagates.
    fn spawn_next(&mut self) -> Result<(), GameError> {
        match self.spawn_piece(None) {
            Ok(_) | Err(GameError::SpawnBlocked(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Swap the active piece with the held kind (once per spawned piece)
    ///
    /// With nothing held yet, the next generated piece takes the active slot.
    pub fn hold(&mut self) -> Result<bool, GameError> {
        let piece = self.active.ok_or(GameError::NoActivePiece)?;
        if !self.can_hold {
            return Ok(false);
        }

        let released = self.held;
        self.held = Some(piece.kind);
        self.active = None;
        self.events.push(CoreEvent::PieceHeld {
            held: piece.kind,
            released,
        });

        let next = released.unwrap_or_else(|| self.generator.draw());
        self.place_new(next)?;
        self.can_hold = false;
        Ok(true)
    }

    /// Toggle soft drop (shortens the gravity interval)
    pub fn set_soft_drop(&mut self, active: bool) {
        self.soft_drop = active;
    }

    /// Whether soft drop is held
    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    /// Milliseconds until the next gravity tick
    pub fn drop_interval_ms(&self) -> u32 {
        if self.soft_drop {
            self.config.gravity.soft_drop_ms
        } else {
            self.config.gravity.interval_ms
        }
    }

    /// Apply a driver intent; `Ok(false)` when the action had no effect
    pub fn apply_action(&mut self, action: GameAction) -> Result<bool, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        match action {
            GameAction::MoveLeft => self.move_piece(MoveDirection::Left),
            GameAction::MoveRight => self.move_piece(MoveDirection::Right),
            GameAction::SoftDrop => self.move_piece(MoveDirection::Down),
            GameAction::HardDrop => self.hard_drop().map(|_| true),
            GameAction::RotateCw => self.rotate(RotationDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotationDirection::CounterClockwise),
            GameAction::Hold => self.hold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::new(CoreConfig::default(), 12345).unwrap()
    }

    #[test]
    fn test_new_game_state() {
        let game = game();
        assert!(game.active().is_none());
        assert!(game.field().is_empty());
        assert!(!game.game_over());
        assert_eq!(game.held(), None);
        assert_eq!(game.drop_interval_ms(), 500);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = CoreConfig {
            width: 0,
            ..CoreConfig::default()
        };
        assert!(Game::new(config, 1).is_err());
    }

    #[test]
    fn test_spawn_piece() {
        let mut game = game();
        let piece = game.spawn_piece(Some(PieceKind::T)).unwrap();
        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.id, 1);
        assert_eq!(piece.origin, CellPos::new(4, 0));
        assert_eq!(game.active(), Some(&piece));

        let events = game.drain_events();
        assert_eq!(
            events,
            vec![CoreEvent::PieceSpawned {
                piece_id: 1,
                kind: PieceKind::T,
                origin: CellPos::new(4, 0)
            }]
        );
        assert!(game.pending_events().is_empty());
    }

    #[test]
    fn test_spawn_twice_is_contract_violation() {
        let mut game = game();
        game.spawn_piece(None).unwrap();
        assert_eq!(
            game.spawn_piece(None),
            Err(GameError::PieceAlreadyActive(1))
        );
    }

    #[test]
    fn test_spawn_origin_stays_inside_narrow_field() {
        let config = CoreConfig {
            width: 4,
            ..CoreConfig::default()
        };
        let game = Game::new(config, 1).unwrap();
        assert_eq!(game.spawn_origin(PieceKind::I), CellPos::new(0, 0));
        assert_eq!(game.spawn_origin(PieceKind::O), CellPos::new(1, 0));
    }

    #[test]
    fn test_operations_without_active_piece() {
        let mut game = game();
        assert!(!game.can_move(MoveDirection::Down));
        assert_eq!(game.move_piece(MoveDirection::Left), Err(GameError::NoActivePiece));
        assert_eq!(
            game.rotate(RotationDirection::Clockwise),
            Err(GameError::NoActivePiece)
        );
        assert_eq!(game.lock(), Err(GameError::NoActivePiece));
        assert_eq!(game.hold(), Err(GameError::NoActivePiece));
    }

    #[test]
    fn test_move_piece() {
        let mut game = game();
        game.spawn_piece(Some(PieceKind::O)).unwrap();
        assert_eq!(game.move_piece(MoveDirection::Right), Ok(true));
        assert_eq!(game.active().unwrap().origin, CellPos::new(5, 0));
        assert_eq!(game.move_piece(MoveDirection::Down), Ok(true));
        assert_eq!(game.active().unwrap().origin, CellPos::new(5, 1));
    }

    #[test]
    fn test_tick_spawns_falls_and_locks() {
        let config = CoreConfig {
            height: 4,
            ..CoreConfig::default()
        };
        let mut game = Game::new(config, 1).unwrap();

        assert!(matches!(game.tick(), Ok(TickOutcome::Spawned(1))));
        // Every template occupies at most rows 0..=1 at spawn, so it falls at least twice.
        assert_eq!(game.tick(), Ok(TickOutcome::Fell));
        assert_eq!(game.tick(), Ok(TickOutcome::Fell));

        let mut locked = None;
        for _ in 0..4 {
            if let TickOutcome::Locked(outcome) = game.tick().unwrap() {
                locked = Some(outcome);
                break;
            }
        }
        let outcome = locked.expect("piece should lock within the field height");
        assert_eq!(outcome.piece_id, 1);
        assert_eq!(outcome.cells.len(), 4);
        assert_eq!(game.active().map(|p| p.id), Some(2));
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let mut game = game();
        game.spawn_piece(Some(PieceKind::O)).unwrap();
        let (distance, outcome) = game.hard_drop().unwrap();
        assert_eq!(distance, 23);
        assert!(outcome.cells.iter().all(|c| c.y >= 23));
        assert!(game.field().is_occupied(CellPos::new(4, 24)));
        assert_eq!(game.active().map(|p| p.id), Some(2));
    }

    #[test]
    fn test_lock_clears_complete_row() {
        let mut game = game();
        let bottom = game.config().height as i32 - 1;
        let block = crate::field::Block {
            kind: PieceKind::Z,
            color: crate::types::Rgb::RED,
            piece_id: 0,
        };
        for x in 0..10 {
            if x != 4 && x != 5 {
                game.field_mut()
                    .insert(CellPos::new(x, bottom), block)
                    .unwrap();
            }
        }

        game.spawn_piece(Some(PieceKind::O)).unwrap();
        let (_, outcome) = game.hard_drop().unwrap();
        assert_eq!(outcome.cleared_rows, vec![bottom as usize]);

        // The O's top half dropped into the cleared row.
        assert!(game.field().is_occupied(CellPos::new(4, bottom)));
        assert!(game.field().is_occupied(CellPos::new(5, bottom)));
        assert_eq!(game.field().len(), 2);

        let names: Vec<_> = game.drain_events().iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "piece_spawned",
                "piece_locked",
                "rows_completed",
                "rows_shifted",
                "piece_spawned"
            ]
        );
    }

    #[test]
    fn test_hold() {
        let mut game = game();
        game.spawn_piece(Some(PieceKind::T)).unwrap();

        assert_eq!(game.hold(), Ok(true));
        assert_eq!(game.held(), Some(PieceKind::T));
        assert!(!game.can_hold());
        let second = *game.active().unwrap();
        assert_eq!(second.id, 2);

        // Only once per piece.
        assert_eq!(game.hold(), Ok(false));
        assert_eq!(game.active().unwrap().id, 2);

        game.hard_drop().unwrap();
        assert!(game.can_hold());
        assert_eq!(game.hold(), Ok(true));
        assert_eq!(game.active().unwrap().kind, PieceKind::T);
    }

    #[test]
    fn test_top_out() {
        let mut game = game();
        let block = crate::field::Block {
            kind: PieceKind::I,
            color: crate::types::Rgb::AQUA,
            piece_id: 0,
        };
        for x in 0..10 {
            game.field_mut().insert(CellPos::new(x, 1), block).unwrap();
            game.field_mut().insert(CellPos::new(x, 0), block).unwrap();
        }
        assert_eq!(
            game.spawn_piece(Some(PieceKind::T)),
            Err(GameError::SpawnBlocked(PieceKind::T))
        );
        assert!(game.game_over());
        assert_eq!(game.tick(), Err(GameError::GameOver));
        assert!(game
            .drain_events()
            .contains(&CoreEvent::ToppedOut { kind: PieceKind::T }));
    }

    #[test]
    fn test_hard_drop_into_top_out_still_returns_outcome() {
        let mut game = game();
        let block = crate::field::Block {
            kind: PieceKind::Z,
            color: crate::types::Rgb::RED,
            piece_id: 0,
        };
        // Holds the O at the top so every kind's spawn overlaps it once locked.
        game.field_mut().insert(CellPos::new(4, 2), block).unwrap();

        game.spawn_piece(Some(PieceKind::O)).unwrap();
        let (distance, outcome) = game.hard_drop().unwrap();
        assert_eq!(distance, 0);
        assert_eq!(outcome.cells.len(), 4);
        assert!(game.game_over());
        assert!(game.active().is_none());
        assert!(matches!(
            game.drain_events().last(),
            Some(CoreEvent::ToppedOut { .. })
        ));
    }

    #[test]
    fn test_soft_drop_interval() {
        let mut game = game();
        game.set_soft_drop(true);
        assert_eq!(game.drop_interval_ms(), 100);
        game.set_soft_drop(false);
        assert_eq!(game.drop_interval_ms(), 500);
    }

    #[test]
    fn test_apply_action() {
        let mut game = game();
        game.spawn_piece(Some(PieceKind::T)).unwrap();
        assert_eq!(game.apply_action(GameAction::MoveLeft), Ok(true));
        assert_eq!(game.active().unwrap().origin, CellPos::new(3, 0));
        assert_eq!(game.apply_action(GameAction::RotateCw), Ok(true));
        assert_eq!(game.apply_action(GameAction::HardDrop), Ok(true));
        assert!(!game.field().is_empty());
    }
}
