//! Collision detection and response against the arena boundary
//!
//! The ball lives inside a circle. A hit is any overlap between the ball's
//! effective radius and the ring; response is a reflection off the inward
//! normal plus a positional push back inside.

use glam::DVec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at collision (pointing toward the arena centre)
    pub normal: DVec2,
    /// Penetration depth (for position correction)
    pub penetration: f64,
    /// Distance from arena centre to ball centre
    pub distance: f64,
}

impl CollisionResult {
    pub fn miss(distance: f64) -> Self {
        Self {
            hit: false,
            normal: DVec2::ZERO,
            penetration: 0.0,
            distance,
        }
    }
}

/// Check the ball against the inside of a circular boundary
///
/// A ball sitting exactly on the centre has no radial direction; its
/// velocity decides which way it is heading, and a resting ball is treated
/// as falling straight down.
pub fn boundary_collision(
    ball_pos: DVec2,
    ball_vel: DVec2,
    ball_radius: f64,
    centre: DVec2,
    arena_radius: f64,
) -> CollisionResult {
    let offset = ball_pos - centre;
    let distance = offset.length();

    if distance + ball_radius <= arena_radius {
        return CollisionResult::miss(distance);
    }

    let outward = offset
        .try_normalize()
        .or_else(|| ball_vel.try_normalize())
        .unwrap_or(DVec2::Y);

    CollisionResult {
        hit: true,
        normal: -outward,
        penetration: distance + ball_radius - arena_radius,
        distance,
    }
}

/// Reflect velocity off a surface
///
/// v' = v - k(v·n)n; k = 2 is a mirror reflection, smaller values absorb
/// part of the normal component.
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2, coefficient: f64) -> DVec2 {
    velocity - coefficient * velocity.dot(normal) * normal
}
