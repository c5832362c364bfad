//! Entities on the game board
//!
//! A small closed set of rectangle entities: static walls and bricks, the
//! horizontally moving platform, and the ball. The old class hierarchy is
//! expressed as capability traits (`Bounded`, `Moving`) plus an explicit
//! `Obstacle` tag for everything the ball can run into besides the
//! platform.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::angle::{Angle, Quadrant};
use crate::consts;
use crate::error::EngineError;
use crate::geometry::Rect;

/// Anything occupying an axis-aligned rectangle on the board.
pub trait Bounded {
    fn rect(&self) -> &Rect;
    fn rect_mut(&mut self) -> &mut Rect;
}

/// Anything with a signed scalar speed in units per second.
pub trait Moving: Bounded {
    fn velocity(&self) -> f32;
    fn set_velocity(&mut self, velocity: f32);
}

macro_rules! impl_bounded {
    ($($ty:ty),+) => {
        $(impl Bounded for $ty {
            fn rect(&self) -> &Rect {
                &self.rect
            }
            fn rect_mut(&mut self) -> &mut Rect {
                &mut self.rect
            }
        })+
    };
}

/// A static boundary of the playfield. Levels place left, right and top
/// walls; ball loss past the bottom is the driver's concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    rect: Rect,
}

impl Wall {
    pub fn new(top_left: Vec2, width: f32, height: f32) -> Result<Self, EngineError> {
        Ok(Self {
            rect: Rect::new(top_left, width, height)?,
        })
    }
}

/// A destructible brick with 1 to 9 hitpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    rect: Rect,
    start_hitpoints: u8,
    hitpoints: u8,
}

impl Brick {
    pub fn new(
        top_left: Vec2,
        width: f32,
        height: f32,
        hitpoints: u8,
    ) -> Result<Self, EngineError> {
        if !(consts::MIN_HITPOINTS..=consts::MAX_HITPOINTS).contains(&hitpoints) {
            return Err(EngineError::InvalidHitpoints { got: hitpoints });
        }
        Ok(Self {
            rect: Rect::new(top_left, width, height)?,
            start_hitpoints: hitpoints,
            hitpoints,
        })
    }

    #[inline]
    pub fn start_hitpoints(&self) -> u8 {
        self.start_hitpoints
    }

    #[inline]
    pub fn hitpoints(&self) -> u8 {
        self.hitpoints
    }

    /// Take one hit. Already-destroyed bricks stay at zero.
    pub fn decrease_hitpoints(&mut self) {
        self.hitpoints = self.hitpoints.saturating_sub(1);
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.hitpoints == 0
    }
}

/// A brick that blocks the ball but can never be destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndestructibleBrick {
    rect: Rect,
}

impl IndestructibleBrick {
    pub fn new(top_left: Vec2, width: f32, height: f32) -> Result<Self, EngineError> {
        Ok(Self {
            rect: Rect::new(top_left, width, height)?,
        })
    }
}

/// The player-controlled paddle. Moves horizontally only; keeping it inside
/// the walls is the input handler's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    rect: Rect,
    velocity: f32,
}

impl Platform {
    pub fn new(
        top_left: Vec2,
        width: f32,
        height: f32,
        velocity: f32,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            rect: Rect::new(top_left, width, height)?,
            velocity,
        })
    }

    /// Shift horizontally by `velocity * dt`. Positive velocity moves right.
    pub fn advance(&mut self, elapsed_ms: f32) {
        if self.velocity == 0.0 {
            return;
        }
        let delta_x = elapsed_ms / 1000.0 * self.velocity;
        let x = self.rect.top_left().x + delta_x;
        self.rect.set_x(x);
    }
}

impl Moving for Platform {
    fn velocity(&self) -> f32 {
        self.velocity
    }
    fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }
}

/// The ball. Carries its heading as an [`Angle`], an optional constant
/// downward gravity, and an active flag toggled by the driver (serve,
/// pause, life loss).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    rect: Rect,
    velocity: f32,
    angle: Angle,
    gravity: f32,
    is_active: bool,
}

impl Ball {
    pub fn new(
        top_left: Vec2,
        width: f32,
        height: f32,
        velocity: f32,
        angle: Angle,
        gravity: f32,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            rect: Rect::new(top_left, width, height)?,
            velocity,
            angle,
            gravity,
            is_active: false,
        })
    }

    #[inline]
    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn angle_mut(&mut self) -> &mut Angle {
        &mut self.angle
    }

    pub fn set_angle(&mut self, angle: Angle) {
        self.angle = angle;
    }

    #[inline]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Put the ball back on its serve position after a lost life: fixed
    /// serve heading, inactive until the driver launches it again.
    pub fn reset(&mut self, top_left: Vec2) {
        self.rect.set_top_left(top_left);
        self.angle = Angle::from_degrees(consts::SERVE_ANGLE_DEG);
        self.is_active = false;
    }

    /// Advance the ball by one timeframe.
    ///
    /// Velocity displaces along the current heading; gravity adds an
    /// independent straight-down displacement. Inactive balls do not move.
    pub fn advance(&mut self, elapsed_ms: f32) {
        if !self.is_active {
            return;
        }

        let mut position = self.rect.top_left();
        if self.velocity != 0.0 {
            position = displaced(position, self.velocity, &self.angle, elapsed_ms);
        }
        if self.gravity != 0.0 {
            let down = Angle::from_degrees(90.0);
            position = displaced(position, self.gravity, &down, elapsed_ms);
        }
        self.rect.set_top_left(position);
    }
}

impl Moving for Ball {
    fn velocity(&self) -> f32 {
        self.velocity
    }
    fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }
}

impl_bounded!(Wall, Brick, IndestructibleBrick, Platform, Ball);

fn displaced(position: Vec2, speed: f32, angle: &Angle, elapsed_ms: f32) -> Vec2 {
    let distance = elapsed_ms / 1000.0 * speed;
    position + travel_delta(angle, distance)
}

/// Right-triangle decomposition of a travelled distance along a heading,
/// with signs assigned per quadrant (y grows downward).
fn travel_delta(angle: &Angle, distance: f32) -> Vec2 {
    if distance.abs() < 1e-8 {
        return Vec2::ZERO;
    }

    let side_a = angle.quadrant_angle().sin() * distance;
    let side_b = angle.quadrant_angle().cos() * distance;

    match angle.quadrant() {
        Quadrant::I => Vec2::new(side_b, side_a),
        Quadrant::II => Vec2::new(-side_a, side_b),
        Quadrant::III => Vec2::new(-side_b, -side_a),
        Quadrant::IV => Vec2::new(side_a, -side_b),
    }
}

/// Everything the ball can collide with besides the platform, tagged so the
/// resolver and the driver can tell the variants apart without downcasting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    Wall(Wall),
    Brick(Brick),
    Indestructible(IndestructibleBrick),
}

impl Obstacle {
    pub fn rect(&self) -> &Rect {
        match self {
            Obstacle::Wall(wall) => wall.rect(),
            Obstacle::Brick(brick) => brick.rect(),
            Obstacle::Indestructible(brick) => brick.rect(),
        }
    }

    pub fn as_brick(&self) -> Option<&Brick> {
        match self {
            Obstacle::Brick(brick) => Some(brick),
            _ => None,
        }
    }

    pub fn as_brick_mut(&mut self) -> Option<&mut Brick> {
        match self {
            Obstacle::Brick(brick) => Some(brick),
            _ => None,
        }
    }
}
