//! Collision detection and paddle response
//!
//! Everything on the field is an axis-aligned box, so detection is a plain
//! rectangle overlap. The interesting part is the response: where the ball
//! strikes the paddle decides the outgoing angle.

use glam::Vec2;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// True when the interiors overlap. Rectangles that only share an edge do not.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Which way the ball leaves a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebound {
    /// Off the left paddle, toward +x
    Right,
    /// Off the right paddle, toward -x
    Left,
}

/// Result of a paddle contact
#[derive(Debug, Clone, Copy)]
pub struct PaddleHit {
    /// Ball center offset from paddle center, in half paddle heights.
    /// Not clamped: a late detection near the tip can land outside [-1, 1].
    pub norm: f32,
    /// Deflection angle in radians
    pub angle: f32,
    /// Outgoing velocity
    pub velocity: Vec2,
}

/// Compute the outgoing velocity for a ball striking a paddle.
///
/// Speed grows by `speed_step` per hit, capped at `speed_max`. The vertical
/// component follows the deflection angle; only the horizontal sign depends on
/// the paddle side.
pub fn paddle_rebound(
    ball: &Rect,
    velocity: Vec2,
    paddle: &Rect,
    rebound: Rebound,
    max_deflection: f32,
    speed_step: f32,
    speed_max: f32,
) -> PaddleHit {
    let offset = ball.center_y() - paddle.center_y();
    let norm = offset / (paddle.h / 2.0);
    let angle = norm * max_deflection;
    let speed = (velocity.length() + speed_step).min(speed_max);

    let dir_x = match rebound {
        Rebound::Right => 1.0,
        Rebound::Left => -1.0,
    };

    PaddleHit {
        norm,
        angle,
        velocity: Vec2::new(dir_x * angle.cos() * speed, angle.sin() * speed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_DEFLECTION: f32 = 50.0_f32 * std::f32::consts::PI / 180.0;

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&Rect::new(2.0, 2.0, 2.0, 2.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 5.0, 5.0)));
        // Shared edge is not an overlap
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_center_hit_goes_straight() {
        let paddle = Rect::new(40.0, 250.0, 12.0, 100.0);
        let ball = Rect::new(45.0, 293.0, 14.0, 14.0);
        let hit = paddle_rebound(
            &ball,
            Vec2::new(-6.0, 0.0),
            &paddle,
            Rebound::Right,
            MAX_DEFLECTION,
            0.6,
            14.0,
        );
        assert!(hit.norm.abs() < 1e-6);
        assert!(hit.angle.abs() < 1e-6);
        assert!((hit.velocity.x - 6.6).abs() < 1e-4);
        assert!(hit.velocity.y.abs() < 1e-4);
    }

    #[test]
    fn test_edge_hit_deflects_by_max_angle() {
        let paddle = Rect::new(848.0, 250.0, 12.0, 100.0);
        // Ball center at paddle bottom edge
        let ball = Rect::new(840.0, 343.0, 14.0, 14.0);
        let hit = paddle_rebound(
            &ball,
            Vec2::new(6.0, 0.0),
            &paddle,
            Rebound::Left,
            MAX_DEFLECTION,
            0.6,
            14.0,
        );
        assert!((hit.norm - 1.0).abs() < 1e-6);
        assert!((hit.angle - MAX_DEFLECTION).abs() < 1e-6);
        assert!(hit.velocity.x < 0.0);
        // Downward deflection below paddle center
        assert!(hit.velocity.y > 0.0);
        assert!((hit.velocity.length() - 6.6).abs() < 1e-4);
    }

    #[test]
    fn test_late_hit_exceeds_envelope() {
        let paddle = Rect::new(40.0, 250.0, 12.0, 100.0);
        // Ball center 10 units past the top tip
        let ball = Rect::new(45.0, 233.0, 14.0, 14.0);
        let hit = paddle_rebound(
            &ball,
            Vec2::new(-6.0, 0.0),
            &paddle,
            Rebound::Right,
            MAX_DEFLECTION,
            0.6,
            14.0,
        );
        assert!(hit.norm < -1.0);
        assert!(hit.angle.abs() > MAX_DEFLECTION);
    }

    #[test]
    fn test_speed_capped() {
        let paddle = Rect::new(40.0, 250.0, 12.0, 100.0);
        let ball = Rect::new(45.0, 293.0, 14.0, 14.0);
        let hit = paddle_rebound(
            &ball,
            Vec2::new(-13.8, 0.0),
            &paddle,
            Rebound::Right,
            MAX_DEFLECTION,
            0.6,
            14.0,
        );
        assert!((hit.velocity.length() - 14.0).abs() < 1e-4);
    }
}
