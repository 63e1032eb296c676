//! Blockfall (workspace facade crate).
//!
//! Re-exports the falling-block core and its shared types under one name, and hosts the
//! headless driver used by the `blockfall` binary.

pub mod driver;

pub use blockfall_core as core;
pub use blockfall_types as types;
