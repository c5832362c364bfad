//! Corner-based intersection classification
//!
//! The detector tests each corner of the ball against an obstacle's
//! rectangle. Each containment test is inclusive at the obstacle's near
//! edge and exclusive at the far edge, so flush rectangles are not counted
//! twice. Zero, one or two corner hits map onto a nine-way classification
//! (the `None` case simply drops out of the pair list).

use glam::Vec2;

use crate::geometry::Rect;
use crate::objects::{Ball, Bounded, Obstacle};

/// How the ball overlaps an obstacle: which region of the obstacle the
/// ball's corners intrude into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Intersection {
    Left,
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
}

/// Classify the overlap between the ball and one obstacle rectangle.
///
/// A single corner hit yields the matching diagonal category; two adjacent
/// corner hits merge into the edge between them. Any other combination is
/// geometrically impossible for convex rectangles and degrades to `None`.
pub(crate) fn classify(ball: &Rect, obj: &Rect) -> Option<Intersection> {
    let mut corners: Vec<Intersection> = Vec::with_capacity(2);

    if top_left_in_bottom_right_region(ball.top_left(), obj) {
        corners.push(Intersection::BottomRight);
    }
    if top_right_in_bottom_left_region(ball.top_right(), obj) {
        corners.push(Intersection::BottomLeft);
    }
    if bottom_left_in_top_right_region(ball.bottom_left(), obj) {
        corners.push(Intersection::TopRight);
    }
    if bottom_right_in_top_left_region(ball.bottom_right(), obj) {
        corners.push(Intersection::TopLeft);
    }

    match corners.len() {
        0 => None,
        1 => Some(corners[0]),
        2 => merge_adjacent(&corners),
        _ => None,
    }
}

fn merge_adjacent(corners: &[Intersection]) -> Option<Intersection> {
    let has = |i: Intersection| corners.contains(&i);

    if has(Intersection::BottomLeft) && has(Intersection::TopLeft) {
        Some(Intersection::Left)
    } else if has(Intersection::TopLeft) && has(Intersection::TopRight) {
        Some(Intersection::Top)
    } else if has(Intersection::TopRight) && has(Intersection::BottomRight) {
        Some(Intersection::Right)
    } else if has(Intersection::BottomRight) && has(Intersection::BottomLeft) {
        Some(Intersection::Bottom)
    } else {
        None
    }
}

/// Ball's bottom-right corner inside the obstacle's top-left region.
fn bottom_right_in_top_left_region(corner: Vec2, obj: &Rect) -> bool {
    let x_inside = obj.top_left().x <= corner.x && corner.x < obj.bottom_right().x;
    let y_inside = obj.top_left().y <= corner.y && corner.y < obj.bottom_right().y;
    x_inside && y_inside
}

/// Ball's bottom-left corner inside the obstacle's top-right region.
fn bottom_left_in_top_right_region(corner: Vec2, obj: &Rect) -> bool {
    let x_inside = obj.top_right().x >= corner.x && corner.x > obj.bottom_left().x;
    let y_inside = obj.top_right().y <= corner.y && corner.y < obj.bottom_left().y;
    x_inside && y_inside
}

/// Ball's top-left corner inside the obstacle's bottom-right region.
fn top_left_in_bottom_right_region(corner: Vec2, obj: &Rect) -> bool {
    let x_inside = obj.bottom_right().x >= corner.x && corner.x > obj.top_left().x;
    let y_inside = obj.bottom_right().y >= corner.y && corner.y > obj.top_left().y;
    x_inside && y_inside
}

/// Ball's top-right corner inside the obstacle's bottom-left region.
fn top_right_in_bottom_left_region(corner: Vec2, obj: &Rect) -> bool {
    let x_inside = obj.bottom_left().x <= corner.x && corner.x < obj.top_right().x;
    let y_inside = obj.bottom_left().y >= corner.y && corner.y > obj.top_right().y;
    x_inside && y_inside
}

/// Gather (index, classification) pairs for every obstacle the ball
/// currently overlaps, in list order.
///
/// Destroyed bricks are skipped entirely. Live bricks that intersect take
/// one hit right here, before any resolution happens, so a brick is never
/// decremented twice for one contact.
pub(crate) fn gather_hits(
    ball: &Ball,
    obstacles: &mut [Obstacle],
) -> Vec<(usize, Intersection)> {
    let mut hits = Vec::new();
    for (index, obstacle) in obstacles.iter_mut().enumerate() {
        if let Some(brick) = obstacle.as_brick()
            && brick.is_destroyed()
        {
            continue;
        }
        if let Some(intersection) = classify(ball.rect(), obstacle.rect()) {
            if let Some(brick) = obstacle.as_brick_mut() {
                brick.decrease_hitpoints();
            }
            hits.push((index, intersection));
        }
    }
    hits
}
