//! Core configuration
//!
//! Everything the core accepts from outside: dimensions, cell size, the per-kind weight table,
//! the color scheme and gravity intervals. Construct with [`CoreConfig::default`], load from
//! JSON via serde, or read overrides from the environment with [`CoreConfig::from_env`].
//! [`CoreConfig::validate`] runs before any game state is built.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    PieceKind, Rgb, DEFAULT_CELL_SIZE, DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH,
    DEFAULT_GRAVITY_MS, DEFAULT_SOFT_DROP_MS,
};

/// Widest template (the I piece) in cells
pub const MIN_FIELD_WIDTH: u16 = 4;

/// Largest accepted `width * height`
pub const MAX_FIELD_CELLS: usize = 1 << 16;

/// Kind → color mapping handed to the shape library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub i: Rgb,
    pub o: Rgb,
    pub t: Rgb,
    pub j: Rgb,
    pub l: Rgb,
    pub s: Rgb,
    pub z: Rgb,
}

impl ColorScheme {
    /// Color assigned to `kind`
    pub fn color(&self, kind: PieceKind) -> Rgb {
        match kind {
            PieceKind::I => self.i,
            PieceKind::O => self.o,
            PieceKind::T => self.t,
            PieceKind::J => self.j,
            PieceKind::L => self.l,
            PieceKind::S => self.s,
            PieceKind::Z => self.z,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            i: Rgb::AQUA,
            o: Rgb::YELLOW,
            t: Rgb::PURPLE,
            j: Rgb::BLUE,
            l: Rgb::ORANGE,
            s: Rgb::GREEN,
            z: Rgb::RED,
        }
    }
}

/// Gravity intervals in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    pub interval_ms: u32,
    pub soft_drop_ms: u32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_GRAVITY_MS,
            soft_drop_ms: DEFAULT_SOFT_DROP_MS,
        }
    }
}

/// Complete configuration for a [`Game`](crate::Game)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub width: u16,
    pub height: u16,
    /// Pixels per grid unit; only used for coordinate conversion
    pub cell_size: u32,
    /// Relative weight per kind; missing kinds weigh zero
    pub weights: BTreeMap<PieceKind, f32>,
    pub colors: ColorScheme,
    pub gravity: GravityConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            weights: uniform_weights(),
            colors: ColorScheme::default(),
            gravity: GravityConfig::default(),
        }
    }
}

/// Weight 1.0 for every kind
pub fn uniform_weights() -> BTreeMap<PieceKind, f32> {
    PieceKind::ALL.iter().map(|&k| (k, 1.0)).collect()
}

/// Parse `"I=1,O=0.5,T=1"` into a weight table
///
/// Kinds not listed are absent from the table (and therefore never drawn).
pub fn parse_weights(s: &str) -> Result<BTreeMap<PieceKind, f32>, ConfigError> {
    let mut weights = BTreeMap::new();
    for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (kind, weight) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedWeight(entry.to_string()))?;
        let kind = PieceKind::from_str(kind)
            .ok_or_else(|| ConfigError::MalformedWeight(entry.to_string()))?;
        let weight: f32 = weight
            .trim()
            .parse()
            .map_err(|_| ConfigError::MalformedWeight(entry.to_string()))?;
        weights.insert(kind, weight);
    }
    Ok(weights)
}

impl CoreConfig {
    /// Defaults overridden by `BLOCKFALL_*` environment variables
    ///
    /// Unparseable numeric values fall back to the default; a malformed
    /// `BLOCKFALL_WEIGHTS` is an error since silently playing with the wrong distribution
    /// would hide the mistake.
    pub fn from_env() -> Result<Self, ConfigError> {
        use std::env;

        let defaults = Self::default();

        let width = env::var("BLOCKFALL_WIDTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.width);
        let height = env::var("BLOCKFALL_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.height);
        let cell_size = env::var("BLOCKFALL_CELL_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cell_size);
        let interval_ms = env::var("BLOCKFALL_GRAVITY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.gravity.interval_ms);
        let soft_drop_ms = env::var("BLOCKFALL_SOFT_DROP_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.gravity.soft_drop_ms);

        let weights = match env::var("BLOCKFALL_WEIGHTS") {
            Ok(s) if !s.trim().is_empty() => parse_weights(&s)?,
            _ => defaults.weights,
        };

        Ok(Self {
            width,
            height,
            cell_size,
            weights,
            colors: defaults.colors,
            gravity: GravityConfig {
                interval_ms,
                soft_drop_ms,
            },
        })
    }

    /// Reject configurations that cannot produce a playable field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::NonPositiveDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let cells = self.width as usize * self.height as usize;
        if cells > MAX_FIELD_CELLS {
            return Err(ConfigError::FieldTooLarge {
                cells,
                max: MAX_FIELD_CELLS,
            });
        }
        if self.width < MIN_FIELD_WIDTH {
            return Err(ConfigError::FieldTooNarrow {
                width: self.width,
                min: MIN_FIELD_WIDTH,
            });
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.gravity.interval_ms == 0 || self.gravity.soft_drop_ms == 0 {
            return Err(ConfigError::ZeroGravityInterval);
        }
        crate::rng::WeightTable::new(&self.weights).map(|_| ())
    }
}
