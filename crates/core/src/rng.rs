//! RNG module - weighted random piece generation
//!
//! Each kind carries a relative weight. A draw picks a uniform value in `[0, total)` and
//! subtracts weights in enumeration order (I, O, T, J, L, S, Z); the kind at which the
//! remainder drops to zero or below is selected. Kinds with weight zero are never selected.
//!
//! Also provides a simple LCG so a seed reproduces the same piece sequence.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in `[0, 1)`
    ///
    /// Uses the high 24 bits, which is exactly the f32 mantissa width; the low bits of an LCG
    /// have short periods.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Current state (for reproducing a sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Validated per-kind weights in enumeration order
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: [f32; 7],
    total: f32,
}

impl WeightTable {
    /// Build from a kind → weight map
    ///
    /// Fails for an empty map, any negative or non-finite weight, a total that overflows `f32`,
    /// or when every weight is zero.
    pub fn new(weights: &BTreeMap<PieceKind, f32>) -> Result<Self, ConfigError> {
        if weights.is_empty() {
            return Err(ConfigError::EmptyWeights);
        }

        let mut table = [0.0f32; 7];
        for (&kind, &weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight { kind, weight });
            }
            table[kind.index()] = weight;
        }

        let total: f32 = table.iter().sum();
        if !total.is_finite() {
            return Err(ConfigError::WeightTotalOverflow);
        }
        if total <= 0.0 {
            return Err(ConfigError::AllWeightsZero);
        }

        Ok(Self {
            weights: table,
            total,
        })
    }

    /// Weight of `kind` (zero if it was not listed)
    pub fn weight(&self, kind: PieceKind) -> f32 {
        self.weights[kind.index()]
    }

    /// Sum of all weights, finite and positive
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Select the kind for a uniform sample `unit` in `[0, 1)`
    pub fn pick(&self, unit: f32) -> PieceKind {
        let mut remainder = unit * self.total;
        let mut last = None;

        for kind in PieceKind::ALL {
            let weight = self.weight(kind);
            if weight <= 0.0 {
                continue;
            }
            remainder -= weight;
            if remainder <= 0.0 {
                return kind;
            }
            last = Some(kind);
        }

        // Only reachable through float rounding on a sample just below 1.0.
        // `new` guarantees at least one positive weight.
        last.unwrap_or(PieceKind::I)
    }
}

/// Seeded weighted generator
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    table: WeightTable,
    rng: SimpleRng,
}

impl PieceGenerator {
    /// Generator over `table` seeded with `seed`
    pub fn new(table: WeightTable, seed: u32) -> Self {
        Self {
            table,
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        let unit = self.rng.next_f32();
        self.table.pick(unit)
    }

    /// Peek at the next kind without advancing the sequence
    pub fn peek(&self) -> PieceKind {
        let mut preview = self.rng.clone();
        self.table.pick(preview.next_f32())
    }

    /// Weights this generator draws from
    pub fn table(&self) -> &WeightTable {
        &self.table
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

/// One-shot weighted draw
pub fn pick_random(table: &WeightTable, rng: &mut SimpleRng) -> PieceKind {
    table.pick(rng.next_f32())
}
