//! Reflection resolution
//!
//! The hard part of the engine. Given the classified overlaps from the
//! detector, pick the single resolution for this tick: which edge (or
//! corner pocket) the ball bounces off, snap the ball flush against it,
//! and rewrite the heading — mirrored for plain edges, remapped by contact
//! position for the platform top, reversed outright for corner pockets.
//! Every resolution ends by pulling the heading out of the forbidden
//! near-axis bands that make the game boring to play.

use rand::Rng;

use crate::angle::{Angle, Quadrant};
use crate::collision::{Intersection, classify, gather_hits};
use crate::consts;
use crate::geometry::Rect;
use crate::objects::{Ball, Bounded, Obstacle, Platform};

/// The obstacle edge a resolution bounced the ball off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

/// Bounce the ball off the platform if it currently overlaps it.
///
/// Platform-top contacts steer the ball by contact position instead of a
/// plain mirror. Returns true if a bounce occurred.
pub fn resolve_against_platform(ball: &mut Ball, platform: &Platform) -> bool {
    let Some(intersection) = classify(ball.rect(), platform.rect()) else {
        return false;
    };
    reflect_single(ball, platform.rect(), true, intersection);
    ball.set_angle(clamp_angle(ball.angle()));
    true
}

/// Bounce the ball off whatever obstacles it overlaps.
///
/// Returns the indices of all hit obstacles, in list order, so the driver
/// can award score and trigger effects. Live bricks among them have already
/// taken their hit when this returns.
pub fn resolve_against_obstacles(ball: &mut Ball, obstacles: &mut [Obstacle]) -> Vec<usize> {
    resolve_obstacles_impl(ball, obstacles, None::<&mut rand::rngs::ThreadRng>)
}

/// Like [`resolve_against_obstacles`], but plain single-obstacle edge
/// bounces additionally scale the rebound steepness by a random factor.
///
/// The randomness source is injected so simulations stay reproducible; the
/// deterministic entry points never consume it.
pub fn resolve_against_obstacles_perturbed<R: Rng>(
    ball: &mut Ball,
    obstacles: &mut [Obstacle],
    rng: &mut R,
) -> Vec<usize> {
    resolve_obstacles_impl(ball, obstacles, Some(rng))
}

fn resolve_obstacles_impl<R: Rng>(
    ball: &mut Ball,
    obstacles: &mut [Obstacle],
    mut rng: Option<&mut R>,
) -> Vec<usize> {
    let hits = gather_hits(ball, obstacles);
    if hits.is_empty() {
        return Vec::new();
    }

    if let [(index, intersection)] = hits[..] {
        let edge = reflect_single(ball, obstacles[index].rect(), false, intersection);
        if let Some(rng) = rng.as_deref_mut() {
            perturb_edge_bounce(ball, obstacles[index].rect(), edge, rng);
        }
        ball.set_angle(clamp_angle(ball.angle()));
        return vec![index];
    }

    reflect_multiple(ball, obstacles, &hits);
    ball.set_angle(clamp_angle(ball.angle()));
    hits.into_iter().map(|(index, _)| index).collect()
}

/// Resolve a single classified overlap.
///
/// Diagonal categories tie-break on penetration depth: the axis the ball
/// is deeper inside wins. Platform-top contacts (direct or via tie-break)
/// take the steered remap instead of a plain mirror.
fn reflect_single(
    ball: &mut Ball,
    obj: &Rect,
    is_platform: bool,
    intersection: Intersection,
) -> Edge {
    match intersection {
        Intersection::Left => bounce_left(ball, obj),
        Intersection::TopLeft => {
            if deeper_left_than_top(ball, obj) {
                bounce_left(ball, obj)
            } else {
                bounce_top_dispatch(ball, obj, is_platform)
            }
        }
        Intersection::Top => bounce_top_dispatch(ball, obj, is_platform),
        Intersection::TopRight => {
            if deeper_top_than_right(ball, obj) {
                bounce_top_dispatch(ball, obj, is_platform)
            } else {
                bounce_right(ball, obj)
            }
        }
        Intersection::Right => bounce_right(ball, obj),
        Intersection::BottomRight => {
            if deeper_right_than_bottom(ball, obj) {
                bounce_right(ball, obj)
            } else {
                bounce_bottom(ball, obj)
            }
        }
        Intersection::Bottom => bounce_bottom(ball, obj),
        Intersection::BottomLeft => {
            if deeper_bottom_than_left(ball, obj) {
                bounce_bottom(ball, obj)
            } else {
                bounce_left(ball, obj)
            }
        }
    }
}

/// Resolve simultaneous overlaps with several obstacles.
///
/// Recognized 2- and 3-object corner configurations are "pocket" hits: the
/// ball is wedged into an outside corner, gets snapped out along both axes
/// and sent straight back. Otherwise, if every category points at the same
/// side, bounce off that side of the first obstacle. Mixed unrecognized
/// sets leave the ball untouched.
fn reflect_multiple(ball: &mut Ball, obstacles: &[Obstacle], hits: &[(usize, Intersection)]) {
    assert!(hits.len() > 1);

    if hits.len() == 2 && reflect_two_in_pocket(ball, obstacles, hits) {
        return;
    }
    if hits.len() == 3 && reflect_three_in_pocket(ball, obstacles, hits) {
        return;
    }

    let first = obstacles[hits[0].0].rect();
    if only_from(
        hits,
        &[
            Intersection::Left,
            Intersection::TopLeft,
            Intersection::BottomLeft,
        ],
    ) {
        bounce_left(ball, first);
    } else if only_from(
        hits,
        &[
            Intersection::Top,
            Intersection::TopLeft,
            Intersection::TopRight,
        ],
    ) {
        bounce_top(ball, first);
    } else if only_from(
        hits,
        &[
            Intersection::Right,
            Intersection::TopRight,
            Intersection::BottomRight,
        ],
    ) {
        bounce_right(ball, first);
    } else if only_from(
        hits,
        &[
            Intersection::Bottom,
            Intersection::BottomRight,
            Intersection::BottomLeft,
        ],
    ) {
        bounce_bottom(ball, first);
    }
}

fn reflect_two_in_pocket(
    ball: &mut Ball,
    obstacles: &[Obstacle],
    hits: &[(usize, Intersection)],
) -> bool {
    if has_all(hits, &[Intersection::Right, Intersection::BottomLeft])
        || has_all(hits, &[Intersection::TopRight, Intersection::Bottom])
    {
        snap_into_top_left_pocket(ball, obstacles, hits);
        turn_around(ball, -180.0);
        return true;
    }
    if has_all(hits, &[Intersection::BottomRight, Intersection::Left])
        || has_all(hits, &[Intersection::Bottom, Intersection::TopLeft])
    {
        snap_into_top_right_pocket(ball, obstacles, hits);
        turn_around(ball, -180.0);
        return true;
    }
    if has_all(hits, &[Intersection::Top, Intersection::BottomLeft])
        || has_all(hits, &[Intersection::Left, Intersection::TopRight])
    {
        snap_into_bottom_right_pocket(ball, obstacles, hits);
        turn_around(ball, 180.0);
        return true;
    }
    if has_all(hits, &[Intersection::Top, Intersection::BottomRight])
        || has_all(hits, &[Intersection::TopLeft, Intersection::Right])
    {
        snap_into_bottom_left_pocket(ball, obstacles, hits);
        turn_around(ball, 180.0);
        return true;
    }
    false
}

fn reflect_three_in_pocket(
    ball: &mut Ball,
    obstacles: &[Obstacle],
    hits: &[(usize, Intersection)],
) -> bool {
    if has_all(
        hits,
        &[
            Intersection::BottomLeft,
            Intersection::BottomRight,
            Intersection::TopRight,
        ],
    ) {
        snap_into_top_left_pocket(ball, obstacles, hits);
        turn_around(ball, -180.0);
        return true;
    }
    if has_all(
        hits,
        &[
            Intersection::BottomRight,
            Intersection::BottomLeft,
            Intersection::TopLeft,
        ],
    ) {
        snap_into_top_right_pocket(ball, obstacles, hits);
        turn_around(ball, -180.0);
        return true;
    }
    if has_all(
        hits,
        &[
            Intersection::TopRight,
            Intersection::TopLeft,
            Intersection::BottomLeft,
        ],
    ) {
        snap_into_bottom_right_pocket(ball, obstacles, hits);
        turn_around(ball, 180.0);
        return true;
    }
    if has_all(
        hits,
        &[
            Intersection::TopLeft,
            Intersection::TopRight,
            Intersection::BottomRight,
        ],
    ) {
        snap_into_bottom_left_pocket(ball, obstacles, hits);
        turn_around(ball, 180.0);
        return true;
    }
    false
}

fn snap_into_top_left_pocket(
    ball: &mut Ball,
    obstacles: &[Obstacle],
    hits: &[(usize, Intersection)],
) {
    for &(index, intersection) in hits {
        let obj = obstacles[index].rect();
        match intersection {
            Intersection::BottomLeft | Intersection::Bottom => place_below(ball, obj),
            Intersection::BottomRight => {}
            Intersection::TopRight | Intersection::Right => place_right_of(ball, obj),
            other => panic!("category {other:?} cannot form a top-left pocket"),
        }
    }
}

fn snap_into_top_right_pocket(
    ball: &mut Ball,
    obstacles: &[Obstacle],
    hits: &[(usize, Intersection)],
) {
    for &(index, intersection) in hits {
        let obj = obstacles[index].rect();
        match intersection {
            Intersection::BottomRight | Intersection::Bottom => place_below(ball, obj),
            Intersection::BottomLeft => {}
            Intersection::TopLeft | Intersection::Left => place_left_of(ball, obj),
            other => panic!("category {other:?} cannot form a top-right pocket"),
        }
    }
}

fn snap_into_bottom_right_pocket(
    ball: &mut Ball,
    obstacles: &[Obstacle],
    hits: &[(usize, Intersection)],
) {
    for &(index, intersection) in hits {
        let obj = obstacles[index].rect();
        match intersection {
            Intersection::TopRight | Intersection::Top => place_above(ball, obj),
            Intersection::TopLeft => {}
            Intersection::BottomLeft | Intersection::Left => place_left_of(ball, obj),
            other => panic!("category {other:?} cannot form a bottom-right pocket"),
        }
    }
}

fn snap_into_bottom_left_pocket(
    ball: &mut Ball,
    obstacles: &[Obstacle],
    hits: &[(usize, Intersection)],
) {
    for &(index, intersection) in hits {
        let obj = obstacles[index].rect();
        match intersection {
            Intersection::TopLeft | Intersection::Top => place_above(ball, obj),
            Intersection::TopRight => {}
            Intersection::BottomRight | Intersection::Right => place_right_of(ball, obj),
            other => panic!("category {other:?} cannot form a bottom-left pocket"),
        }
    }
}

/// Pocket hits send the ball straight back where it came from.
fn turn_around(ball: &mut Ball, delta_deg: f32) {
    let mut angle = ball.angle();
    angle.set_value(angle.value() + delta_deg.to_radians());
    ball.set_angle(angle);
}

fn has_all(hits: &[(usize, Intersection)], set: &[Intersection]) -> bool {
    set.iter()
        .all(|wanted| hits.iter().any(|(_, i)| i == wanted))
}

fn only_from(hits: &[(usize, Intersection)], set: &[Intersection]) -> bool {
    hits.iter().all(|(_, i)| set.contains(i))
}

fn bounce_left(ball: &mut Ball, obj: &Rect) -> Edge {
    ball.angle_mut().mirror_vertical();
    place_left_of(ball, obj);
    Edge::Left
}

fn bounce_top(ball: &mut Ball, obj: &Rect) -> Edge {
    ball.angle_mut().mirror_horizontal();
    place_above(ball, obj);
    Edge::Top
}

fn bounce_right(ball: &mut Ball, obj: &Rect) -> Edge {
    ball.angle_mut().mirror_vertical();
    place_right_of(ball, obj);
    Edge::Right
}

fn bounce_bottom(ball: &mut Ball, obj: &Rect) -> Edge {
    ball.angle_mut().mirror_horizontal();
    place_below(ball, obj);
    Edge::Bottom
}

fn bounce_top_dispatch(ball: &mut Ball, obj: &Rect, is_platform: bool) -> Edge {
    if is_platform {
        bounce_top_steered(ball, obj)
    } else {
        bounce_top(ball, obj)
    }
}

/// Platform-top bounce with "paddle steering": the farther from the
/// platform center the contact happens, the steeper the rebound toward
/// that side. Center contacts send the ball up at a near-vertical angle.
fn bounce_top_steered(ball: &mut Ball, platform: &Rect) -> Edge {
    let x_left = platform.top_left().x;
    let x_right = platform.bottom_right().x;

    match ball.angle().quadrant() {
        Quadrant::I => {
            // Ball travelling down-right; contact point is its right edge.
            let x_center = x_right - platform.width() / 2.0;
            let factor = steering_factor(ball.rect().bottom_right().x, x_left, x_center, x_right);
            let quadrant_angle =
                60.0_f32.to_radians() - (45.0_f32.to_radians() - 45.0_f32.to_radians() * factor);
            assert!(
                (0.0..=90.0_f32.to_radians()).contains(&quadrant_angle),
                "steered rebound angle out of quadrant range"
            );
            ball.angle_mut().mirror_horizontal();
            ball.angle_mut().set_quadrant_angle(quadrant_angle);
            place_above(ball, platform);
        }
        Quadrant::II => {
            // Ball travelling down-left; contact point is its left edge.
            let x_center = x_left + platform.width() / 2.0;
            let factor = steering_factor(ball.rect().top_left().x, x_left, x_center, x_right);
            let quadrant_angle =
                30.0_f32.to_radians() + (45.0_f32.to_radians() - 45.0_f32.to_radians() * factor);
            assert!(
                (0.0..=90.0_f32.to_radians()).contains(&quadrant_angle),
                "steered rebound angle out of quadrant range"
            );
            ball.angle_mut().mirror_horizontal();
            ball.angle_mut().set_quadrant_angle(quadrant_angle);
            place_above(ball, platform);
        }
        quadrant @ (Quadrant::III | Quadrant::IV) => {
            panic!("platform top hit while ball travels upward ({quadrant:?})");
        }
    }
    Edge::Top
}

/// Normalized distance of the contact point from the platform center:
/// 0 at the center, 1 at either end.
fn steering_factor(contact_x: f32, left: f32, center: f32, right: f32) -> f32 {
    assert!(left < center && center < right, "degenerate platform extent");

    let contact_x = contact_x.clamp(left, right);
    let half_width = center - left;
    let factor = if contact_x <= center {
        (center - contact_x) / half_width
    } else {
        (contact_x - center) / half_width
    };
    factor.clamp(0.0, 1.0)
}

// Penetration-depth tie-breaks for diagonal categories. Negative depths
// mean the detector classified an overlap that is not there, which is an
// upstream integration bug.

fn deeper_left_than_top(ball: &Ball, obj: &Rect) -> bool {
    let x = ball.rect().bottom_right().x - obj.top_left().x;
    let y = ball.rect().bottom_right().y - obj.top_left().y;
    assert!(x >= 0.0 && y >= 0.0, "negative penetration depth");
    y > x
}

fn deeper_top_than_right(ball: &Ball, obj: &Rect) -> bool {
    let x = obj.top_right().x - ball.rect().bottom_left().x;
    let y = ball.rect().bottom_left().y - obj.top_right().y;
    assert!(x >= 0.0 && y >= 0.0, "negative penetration depth");
    x > y
}

fn deeper_right_than_bottom(ball: &Ball, obj: &Rect) -> bool {
    let x = obj.bottom_right().x - ball.rect().top_left().x;
    let y = obj.bottom_right().y - ball.rect().top_left().y;
    assert!(x >= 0.0 && y >= 0.0, "negative penetration depth");
    y > x
}

fn deeper_bottom_than_left(ball: &Ball, obj: &Rect) -> bool {
    let x = ball.rect().top_right().x - obj.bottom_left().x;
    let y = obj.bottom_left().y - ball.rect().top_right().y;
    assert!(x >= 0.0 && y >= 0.0, "negative penetration depth");
    x > y
}

/// Snap the ball's right edge to the obstacle's left edge.
fn place_left_of(ball: &mut Ball, obj: &Rect) {
    let x = obj.top_left().x - ball.rect().width();
    ball.rect_mut().set_x(x);
}

/// Snap the ball's left edge to the obstacle's right edge.
fn place_right_of(ball: &mut Ball, obj: &Rect) {
    ball.rect_mut().set_x(obj.bottom_right().x);
}

/// Snap the ball's bottom edge to the obstacle's top edge.
fn place_above(ball: &mut Ball, obj: &Rect) {
    let y = obj.top_left().y - ball.rect().height();
    ball.rect_mut().set_y(y);
}

/// Snap the ball's top edge to the obstacle's bottom edge.
fn place_below(ball: &mut Ball, obj: &Rect) {
    ball.rect_mut().set_y(obj.bottom_right().y);
}

/// Randomized rebound-steepness variation for plain edge bounces.
///
/// When the ball leaves toward the far side of the obstacle it just hit,
/// the rebound steepens by a factor in [1.0, 1.5] (capped at 60°); when it
/// comes back over the obstacle it flattens by a factor in [0.5, 1.0].
fn perturb_edge_bounce<R: Rng>(ball: &mut Ball, obj: &Rect, edge: Edge, rng: &mut R) {
    let moving_away = match edge {
        Edge::Left | Edge::Right => {
            let ball_mid = ball.rect().top_left().y + ball.rect().height() / 2.0;
            let obj_mid = obj.top_left().y + obj.height() / 2.0;
            match ball.angle().quadrant() {
                // Heading down
                Quadrant::I | Quadrant::II => ball_mid >= obj_mid,
                // Heading up
                Quadrant::III | Quadrant::IV => ball_mid <= obj_mid,
            }
        }
        Edge::Top | Edge::Bottom => {
            let ball_mid = ball.rect().top_left().x + ball.rect().width() / 2.0;
            let obj_mid = obj.top_left().x + obj.width() / 2.0;
            match ball.angle().quadrant() {
                // Heading right
                Quadrant::I | Quadrant::IV => ball_mid >= obj_mid,
                // Heading left
                Quadrant::II | Quadrant::III => ball_mid <= obj_mid,
            }
        }
    };

    let quadrant_angle = ball.angle().quadrant_angle();
    let new_quadrant_angle = if moving_away {
        let factor = rng.random_range(1.0f32..=1.5);
        (quadrant_angle * factor).min(60.0_f32.to_radians())
    } else {
        quadrant_angle * rng.random_range(0.5f32..=1.0)
    };
    ball.angle_mut().set_quadrant_angle(new_quadrant_angle);
}

/// Pull a heading out of the forbidden near-axis bands.
///
/// Near-horizontal (±30° around 0°/180°/360°) and near-vertical (±15°
/// around 90°/270°) trajectories make rallies drag on, so any value inside
/// a band snaps to the band's nearer boundary. Each band is half-open, so
/// an exact 360° passes through while an exact 0° snaps up to 30°.
pub(crate) fn clamp_angle(angle: Angle) -> Angle {
    let band_x = consts::HORIZONTAL_BAND_DEG.to_radians();
    let band_y = consts::VERTICAL_BAND_DEG.to_radians();
    let value = angle.value();
    let mut clamped = angle;

    if just_above(value, 0.0, band_x) {
        clamped.set_value(band_x);
    } else if just_below(value, 90.0_f32.to_radians(), band_y) {
        clamped.set_value(90.0_f32.to_radians() - band_y);
    } else if just_above(value, 90.0_f32.to_radians(), band_y) {
        clamped.set_value(90.0_f32.to_radians() + band_y);
    } else if just_below(value, 180.0_f32.to_radians(), band_x) {
        clamped.set_value(180.0_f32.to_radians() - band_x);
    } else if just_above(value, 180.0_f32.to_radians(), band_x) {
        clamped.set_value(180.0_f32.to_radians() + band_x);
    } else if just_below(value, 270.0_f32.to_radians(), band_y) {
        clamped.set_value(270.0_f32.to_radians() - band_y);
    } else if just_above(value, 270.0_f32.to_radians(), band_y) {
        clamped.set_value(270.0_f32.to_radians() + band_y);
    } else if just_below(value, 360.0_f32.to_radians(), band_x) {
        clamped.set_value(360.0_f32.to_radians() - band_x);
    }
    clamped
}

fn just_below(value: f32, target: f32, delta: f32) -> bool {
    value >= target - delta && value < target
}

fn just_above(value: f32, target: f32, delta: f32) -> bool {
    value >= target && value < target + delta
}
