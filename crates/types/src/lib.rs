//! Shared types - plain data shared by the core and its collaborators
//!
//! Everything here is a small `Copy` value type with no behavior beyond conversions, so the
//! core, the headless driver and any presentation layer can all agree on the same vocabulary.
//!
//! # Coordinates
//!
//! The playfield is addressed in grid units, never pixels:
//!
//! - **x**: column, `0` is the left wall
//! - **y**: row, `0` is the top, row index grows downward
//!
//! Pixel conversion ([`CellPos::to_pixels`]) exists for presentation code only.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FIELD_WIDTH` | 10 | Columns |
//! | `DEFAULT_FIELD_HEIGHT` | 25 | Rows |
//! | `DEFAULT_CELL_SIZE` | 32 | Pixels per grid unit |
//! | `DEFAULT_GRAVITY_MS` | 500 | Gravity interval |
//! | `DEFAULT_SOFT_DROP_MS` | 100 | Gravity interval while soft drop is held |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{CellPos, MoveDirection, PieceKind, Rotation};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! let pos = CellPos::new(4, 0) + MoveDirection::Down.delta();
//! assert_eq!(pos, CellPos::new(4, 1));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! ```

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Field width in cells (10 columns)
pub const DEFAULT_FIELD_WIDTH: u16 = 10;

/// Field height in cells (25 rows)
pub const DEFAULT_FIELD_HEIGHT: u16 = 25;

/// Size of one grid unit in pixels
pub const DEFAULT_CELL_SIZE: u32 = 32;

/// Gravity interval in milliseconds
pub const DEFAULT_GRAVITY_MS: u32 = 500;

/// Gravity interval while soft drop is held
pub const DEFAULT_SOFT_DROP_MS: u32 = 100;

/// The seven piece kinds, in the order used by weighted selection
///
/// - **I**: 4x4 template, horizontal bar
/// - **O**: 2x2 square
/// - **T**, **J**, **L**, **S**, **Z**: 3x3 templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in enumeration order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Orientation of a piece relative to its spawn layout
///
/// The cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Orientation after one turn in `direction`
    pub fn turned(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }
}

/// Direction of a single rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// The reverse turn
    pub fn opposite(&self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Direction of a single-cell translation of the falling piece
///
/// There is no `Up`: pieces only rise through a floor kick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// Grid offset of one step in this direction
    pub fn delta(&self) -> CellPos {
        match self {
            MoveDirection::Left => CellPos::new(-1, 0),
            MoveDirection::Right => CellPos::new(1, 0),
            MoveDirection::Down => CellPos::new(0, 1),
        }
    }

    /// Left or right, as opposed to down
    pub fn is_horizontal(&self) -> bool {
        matches!(self, MoveDirection::Left | MoveDirection::Right)
    }
}

/// A (column, row) position in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    /// Position at column `x`, row `y`
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Top-left pixel of this cell for a given cell size
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::CellPos;
    ///
    /// assert_eq!(CellPos::new(2, 3).to_pixels(32), (64, 96));
    /// assert_eq!(CellPos::from_pixels((70, 96), 32), CellPos::new(2, 3));
    /// ```
    pub fn to_pixels(&self, cell_size: u32) -> (i64, i64) {
        let s = cell_size as i64;
        (self.x as i64 * s, self.y as i64 * s)
    }

    /// Cell containing a pixel position (floors toward negative infinity)
    pub fn from_pixels(pixels: (i64, i64), cell_size: u32) -> Self {
        let s = cell_size.max(1) as i64;
        Self::new(pixels.0.div_euclid(s) as i32, pixels.1.div_euclid(s) as i32)
    }
}

impl Add for CellPos {
    type Output = CellPos;

    fn add(self, rhs: CellPos) -> CellPos {
        CellPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for CellPos {
    type Output = CellPos;

    fn sub(self, rhs: CellPos) -> CellPos {
        CellPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 8-bit RGB color attached to a piece and every block it locks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const AQUA: Rgb = Rgb(0, 255, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const PURPLE: Rgb = Rgb(160, 32, 240);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
}

/// Driver-level intents mapped onto core operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down without waiting for gravity
    SoftDrop,
    /// Drop piece to its lowest legal position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap the active piece with the held one
    Hold,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("pause"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
        }
    }
}
