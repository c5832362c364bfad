//! Collision and reflection engine for a brick-breaking arcade game
//!
//! Core modules:
//! - `geometry`: Validated axis-aligned rectangles
//! - `angle`: Quadrant-decomposed travel headings
//! - `objects`: Walls, bricks, platform and ball
//! - `physics`: Bounce resolution against platform and obstacles
//!
//! The engine is deterministic and side-effect free apart from brick
//! hitpoints: the driver advances the moving entities each timeframe,
//! then calls the resolvers in [`physics`] to bounce the ball and learn
//! which obstacles were hit.

pub mod angle;
mod collision;
pub mod error;
pub mod geometry;
pub mod objects;
pub mod physics;

pub use angle::{Angle, Quadrant};
pub use error::EngineError;
pub use geometry::Rect;
pub use objects::{Ball, Bounded, Brick, IndestructibleBrick, Moving, Obstacle, Platform, Wall};
pub use physics::{
    resolve_against_obstacles, resolve_against_obstacles_perturbed, resolve_against_platform,
};

/// Engine constants
pub mod consts {
    /// Heading the ball is served with after a reset (down-left).
    pub const SERVE_ANGLE_DEG: f32 = 135.0;

    /// Hitpoint range for destructible bricks.
    pub const MIN_HITPOINTS: u8 = 1;
    pub const MAX_HITPOINTS: u8 = 9;

    /// Forbidden band around the horizontal axis headings (0°, 180°, 360°).
    pub const HORIZONTAL_BAND_DEG: f32 = 30.0;
    /// Forbidden band around the vertical axis headings (90°, 270°).
    pub const VERTICAL_BAND_DEG: f32 = 15.0;
}

/// Wrap an angle in radians into [0°, 360°].
///
/// An exact full turn is left alone so it keeps resolving to quadrant IV.
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    let full_turn = 360.0_f32.to_radians();
    while angle < 0.0 {
        angle += full_turn;
    }
    while angle > full_turn {
        angle -= full_turn;
    }
    angle
}
