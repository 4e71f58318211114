//! Collision response for axis-aligned bodies
//!
//! Detection lives in `rect`; this module decides what happens to positions
//! and velocities once something touched.

use glam::Vec2;

use super::rect::Rect;

/// Hard clamp of a span `[pos, pos + extent]` into `[0, limit]`.
/// Used for player-driven bodies, which never bounce.
#[inline]
pub fn clamp_span(pos: f32, extent: f32, limit: f32) -> f32 {
    if pos < 0.0 {
        0.0
    } else if pos + extent > limit {
        limit - extent
    } else {
        pos
    }
}

/// Elastic bounce of a span against `0` and `limit` on one axis.
///
/// Clamps `pos` back inside and negates `vel` when an edge was crossed.
/// Returns true on a bounce.
pub fn bounce_span(pos: &mut f32, extent: f32, vel: &mut f32, limit: f32) -> bool {
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = -*vel;
        true
    } else if *pos + extent > limit {
        *pos = limit - extent;
        *vel = -*vel;
        true
    } else {
        false
    }
}

/// Elastic bounce against the top edge only (y = 0)
pub fn bounce_ceiling(pos: &mut f32, vel: &mut f32) -> bool {
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = -*vel;
        true
    } else {
        false
    }
}

/// Ball vs paddle steering bounce.
///
/// Only resolves while the ball is heading down into the paddle. The vertical
/// component flips; the horizontal component is forced toward the side of the
/// paddle center the ball struck (unchanged on a dead-center hit).
pub fn paddle_deflect(ball: &Rect, dir: Vec2, paddle: &Rect) -> Option<Vec2> {
    if dir.y <= 0.0 || !ball.intersects(paddle) {
        return None;
    }

    let mut out = Vec2::new(dir.x, -dir.y);
    let ball_center = ball.center().x;
    let paddle_center = paddle.center().x;
    if ball_center < paddle_center {
        out.x = -dir.x.abs();
    } else if ball_center > paddle_center {
        out.x = dir.x.abs();
    }
    Some(out)
}

/// Ball vs brick side resolution (caller has already established overlap).
///
/// Four checks in fixed order: ball below, above, right of, left of the
/// brick. The first one that holds picks the axis, which flips only if the
/// velocity on that axis still points into the brick.
pub fn brick_deflect(ball: &Rect, dir: Vec2, brick: &Rect) -> Vec2 {
    let mut out = dir;
    if ball.top() < brick.bottom() {
        // below
        if out.y < 0.0 {
            out.y = -out.y;
        }
    } else if ball.bottom() > brick.top() {
        // above
        if out.y > 0.0 {
            out.y = -out.y;
        }
    } else if ball.left() < brick.right() {
        // right
        if out.x < 0.0 {
            out.x = -out.x;
        }
    } else if ball.right() > brick.left() {
        // left
        if out.x > 0.0 {
            out.x = -out.x;
        }
    }
    out
}
