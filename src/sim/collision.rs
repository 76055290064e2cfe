//! Collision detection helpers
//!
//! Circle-vs-arena-wall and circle-vs-circle contacts. Both compare squared
//! distances first and only take a square root once a contact needs a
//! normal. Coincident centers have no defined normal and report no contact.

use glam::Vec2;

/// Contact between an entity and the arena wall
#[derive(Debug, Clone, Copy)]
pub struct WallContact {
    /// Unit vector from the arena center toward the entity
    pub normal: Vec2,
    /// Distance from the arena center to the entity center
    pub distance: f32,
    /// How far the entity center is past `arena_radius - radius`
    pub overlap: f32,
}

/// Contact between two entities
#[derive(Debug, Clone, Copy)]
pub struct PairContact {
    /// Unit vector from the first entity toward the second
    pub normal: Vec2,
    /// Penetration depth (sum of radii minus center distance)
    pub overlap: f32,
}

/// Check whether a circle's edge has crossed the arena wall
pub fn wall_contact(pos: Vec2, radius: f32, center: Vec2, arena_radius: f32) -> Option<WallContact> {
    let offset = pos - center;
    let dist_sq = offset.length_squared();
    let max_dist = arena_radius - radius;

    if max_dist >= 0.0 && dist_sq <= max_dist * max_dist {
        return None;
    }
    if dist_sq <= f32::EPSILON {
        return None;
    }

    let distance = dist_sq.sqrt();
    Some(WallContact {
        normal: offset / distance,
        distance,
        overlap: distance - max_dist,
    })
}

/// Check whether two circles overlap
pub fn pair_contact(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> Option<PairContact> {
    let delta = b_pos - a_pos;
    let dist_sq = delta.length_squared();
    let min_dist = a_radius + b_radius;

    if dist_sq >= min_dist * min_dist || dist_sq <= f32::EPSILON {
        return None;
    }

    let distance = dist_sq.sqrt();
    Some(PairContact {
        normal: delta / distance,
        overlap: min_dist - distance,
    })
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect only when moving into the surface along `normal`
#[inline]
pub fn reflect_if_approaching(velocity: Vec2, outward_normal: Vec2) -> Vec2 {
    if velocity.dot(outward_normal) > 0.0 {
        reflect_velocity(velocity, outward_normal)
    } else {
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wall_contact_inside_is_none() {
        assert!(wall_contact(Vec2::new(100.0, 0.0), 10.0, Vec2::ZERO, 300.0).is_none());
    }

    #[test]
    fn test_wall_contact_edge_crossed() {
        let c = wall_contact(Vec2::new(295.0, 0.0), 10.0, Vec2::ZERO, 300.0).unwrap();
        assert!((c.normal - Vec2::X).length() < 1e-5);
        assert!((c.overlap - 5.0).abs() < 1e-4);
        assert!((c.distance - 295.0).abs() < 1e-4);
    }

    #[test]
    fn test_wall_contact_offset_center() {
        let center = Vec2::new(400.0, 300.0);
        let c = wall_contact(Vec2::new(400.0, 10.0), 10.0, center, 280.0).unwrap();
        assert!((c.normal - Vec2::new(0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_wall_contact_at_center_is_none() {
        // Arena smaller than the entity: no usable normal at the center
        assert!(wall_contact(Vec2::ZERO, 10.0, Vec2::ZERO, 5.0).is_none());
    }

    #[test]
    fn test_pair_contact() {
        let c = pair_contact(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0).unwrap();
        assert!((c.normal - Vec2::X).length() < 1e-5);
        assert!((c.overlap - 5.0).abs() < 1e-4);
        assert!(pair_contact(Vec2::ZERO, 10.0, Vec2::new(25.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_pair_contact_coincident_is_none() {
        assert!(pair_contact(Vec2::ONE, 10.0, Vec2::ONE, 10.0).is_none());
    }

    #[test]
    fn test_reflect_velocity() {
        // Moving right into a wall whose outward normal is +x
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::X);
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_reflect_if_approaching_ignores_receding() {
        let v = Vec2::new(-3.0, 1.0);
        assert_eq!(reflect_if_approaching(v, Vec2::X), v);
    }

    proptest! {
        #[test]
        fn prop_reflection_preserves_speed(
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let v = Vec2::new(vx, vy);
            let n = Vec2::new(angle.cos(), angle.sin());
            let r = reflect_if_approaching(v, n);
            prop_assert!((r.length() - v.length()).abs() < 1e-3);
            prop_assert!(r.dot(n) <= 1e-3);
        }
    }
}
