//! Construction-time validation errors
//!
//! Geometry and brick construction validate their arguments up front and
//! refuse invalid values; nothing is silently clamped at this layer.

use thiserror::Error;

/// Errors raised while constructing engine entities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A rectangle was given a negative coordinate or extent.
    #[error("invalid geometry: {what} must be non-negative, got {value}")]
    InvalidGeometry { what: &'static str, value: f32 },

    /// A brick was given hitpoints outside the playable range.
    #[error("invalid hitpoints: must be within 1..=9, got {got}")]
    InvalidHitpoints { got: u8 },
}
