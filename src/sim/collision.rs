//! Collision geometry for the arcade physics world
//!
//! Everything on screen is either a circle (the ball) or an axis-aligned box
//! (blocks, paddle, ground, falling power-ups), all inside a rectangular
//! edge loop. Normals always point toward the first shape, so pushing the
//! first shape along `normal * penetration` separates the pair.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Collision point (if hit)
    pub point: Vec2,
    /// Surface normal at collision (pointing toward the first shape)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// Same contact seen from the other shape
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Check collision between a circle and an axis-aligned box
pub fn circle_box_collision(
    center: Vec2,
    radius: f32,
    box_center: Vec2,
    half: Vec2,
) -> CollisionResult {
    let local = center - box_center;
    let closest = local.clamp(-half, half);
    let delta = local - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > 0.0 {
        if dist_sq >= radius * radius {
            return CollisionResult::miss();
        }
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            point: box_center + closest,
            normal: delta / dist,
            penetration: radius - dist,
        };
    }

    // Center inside the box (tunneling case) - exit through the nearest face
    let gap = half - local.abs();
    let (normal, depth) = if gap.x < gap.y {
        (Vec2::new(local.x.signum(), 0.0), gap.x)
    } else {
        (Vec2::new(0.0, local.y.signum()), gap.y)
    };
    CollisionResult {
        hit: true,
        point: center - normal * depth,
        normal,
        penetration: depth + radius,
    }
}

/// Check collision between two axis-aligned boxes
pub fn box_box_collision(
    a_center: Vec2,
    a_half: Vec2,
    b_center: Vec2,
    b_half: Vec2,
) -> CollisionResult {
    let delta = a_center - b_center;
    let overlap = (a_half + b_half) - delta.abs();

    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return CollisionResult::miss();
    }

    // Separate along the axis of least overlap
    let (normal, penetration) = if overlap.x < overlap.y {
        (Vec2::new(sign_or_one(delta.x), 0.0), overlap.x)
    } else {
        (Vec2::new(0.0, sign_or_one(delta.y)), overlap.y)
    };
    CollisionResult {
        hit: true,
        point: a_center - normal * (a_half * normal.abs()).length(),
        normal,
        penetration,
    }
}

/// Check a circle against the inside of a rectangular edge loop
pub fn circle_bounds_collision(
    center: Vec2,
    radius: f32,
    bounds_center: Vec2,
    bounds_half: Vec2,
) -> CollisionResult {
    inside_bounds(center, Vec2::splat(radius), bounds_center, bounds_half)
}

/// Check a box against the inside of a rectangular edge loop
pub fn box_bounds_collision(
    center: Vec2,
    half: Vec2,
    bounds_center: Vec2,
    bounds_half: Vec2,
) -> CollisionResult {
    inside_bounds(center, half, bounds_center, bounds_half)
}

fn inside_bounds(
    center: Vec2,
    extent: Vec2,
    bounds_center: Vec2,
    bounds_half: Vec2,
) -> CollisionResult {
    let local = center - bounds_center;
    let limit = bounds_half - extent;
    let excess = local.abs() - limit;

    // Deepest wall wins; corners resolve one axis per step
    if excess.x <= 0.0 && excess.y <= 0.0 {
        return CollisionResult::miss();
    }
    let (normal, penetration) = if excess.x >= excess.y {
        (Vec2::new(-local.x.signum(), 0.0), excess.x)
    } else {
        (Vec2::new(0.0, -local.y.signum()), excess.y)
    };
    CollisionResult {
        hit: true,
        point: center - normal * (extent * normal.abs()).length(),
        normal,
        penetration,
    }
}

#[inline]
fn sign_or_one(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - (1 + e)(v·n)n, only when moving into the surface
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let approach = velocity.dot(normal);
    if approach >= 0.0 {
        return velocity;
    }
    velocity - (1.0 + restitution) * approach * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_box_from_above() {
        let result = circle_box_collision(
            Vec2::new(0.0, 14.0),
            10.0,
            Vec2::ZERO,
            Vec2::new(20.0, 5.0),
        );
        assert!(result.hit);
        assert!((result.normal - Vec2::Y).length() < 1e-5);
        assert!((result.penetration - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_box_miss() {
        let result = circle_box_collision(
            Vec2::new(0.0, 16.0),
            10.0,
            Vec2::ZERO,
            Vec2::new(20.0, 5.0),
        );
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_center_inside_box() {
        let result = circle_box_collision(
            Vec2::new(18.0, 0.0),
            10.0,
            Vec2::ZERO,
            Vec2::new(20.0, 5.0),
        );
        assert!(result.hit);
        assert!((result.normal - Vec2::X).length() < 1e-5);
        assert!((result.penetration - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_box_box_overlap() {
        let result = box_box_collision(
            Vec2::new(0.0, 9.0),
            Vec2::new(10.0, 5.0),
            Vec2::ZERO,
            Vec2::new(20.0, 5.0),
        );
        assert!(result.hit);
        assert!((result.normal - Vec2::Y).length() < 1e-5);
        assert!((result.penetration - 1.0).abs() < 1e-5);

        let result = box_box_collision(
            Vec2::new(0.0, 11.0),
            Vec2::new(10.0, 5.0),
            Vec2::ZERO,
            Vec2::new(20.0, 5.0),
        );
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_bounds() {
        let center = Vec2::new(50.0, 50.0);
        let half = Vec2::new(50.0, 50.0);

        assert!(!circle_bounds_collision(Vec2::new(50.0, 50.0), 10.0, center, half).hit);

        // Touching the right wall
        let result = circle_bounds_collision(Vec2::new(95.0, 50.0), 10.0, center, half);
        assert!(result.hit);
        assert!((result.normal - Vec2::NEG_X).length() < 1e-5);
        assert!((result.penetration - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 20.0);
        let reflected = reflect_velocity(velocity, Vec2::NEG_X, 1.0);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!((reflected.y - 20.0).abs() < 0.001);

        // Already separating: untouched
        let separating = reflect_velocity(Vec2::new(-100.0, 0.0), Vec2::NEG_X, 1.0);
        assert_eq!(separating, Vec2::new(-100.0, 0.0));

        // Inelastic stops the normal component
        let dead = reflect_velocity(velocity, Vec2::NEG_X, 0.0);
        assert!(dead.x.abs() < 0.001);
    }
}
