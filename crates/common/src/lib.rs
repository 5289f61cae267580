//! Shared vocabulary for sectorspace crates.
//!
//! # Invariants
//! - A `Dimensions` set is non-empty, ordered and free of duplicate names.
//! - `Spatial` never fails: a missing or non-numeric axis reads as `None`.

mod spatial;
mod types;

pub use spatial::Spatial;
pub use types::{Dimensions, DimensionsError};
