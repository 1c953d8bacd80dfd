//! Stone-stone collision detection and response
//!
//! Stones are equal-mass discs. On contact both velocities are rotated into
//! the contact frame (x along the line of centers), the normal components are
//! swapped, restitution is applied, and the result is rotated back.

use glam::Vec2;

use super::stone::Stone;
use crate::{rotate_into, rotate_out_of};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the stones overlapped
    pub hit: bool,
    /// Contact angle (radians, direction from the first stone to the second)
    pub angle: f32,
    /// Unit normal from the first stone toward the second
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            angle: 0.0,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check whether two stones overlap
///
/// Coincident centers give an undefined contact angle; 0 is used instead so
/// nothing downstream sees NaN.
pub fn stone_stone_collision(a: &Stone, b: &Stone) -> CollisionResult {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let min_distance = a.radius + b.radius;

    if distance >= min_distance {
        return CollisionResult::miss();
    }

    let angle = if distance > 0.0 {
        delta.y.atan2(delta.x)
    } else {
        0.0
    };

    CollisionResult {
        hit: true,
        angle,
        normal: Vec2::new(angle.cos(), angle.sin()),
        penetration: min_distance - distance,
    }
}

/// Exchange normal velocities of two equal-mass bodies, then scale by restitution
///
/// Returns the new (a, b) velocities in world space.
pub fn exchange_velocities(va: Vec2, vb: Vec2, angle: f32, restitution: f32) -> (Vec2, Vec2) {
    let (sin, cos) = angle.sin_cos();

    let a = rotate_into(va, sin, cos);
    let b = rotate_into(vb, sin, cos);

    // Normal (x) components swap, tangential (y) components stay
    let a_final = Vec2::new(b.x, a.y) * restitution;
    let b_final = Vec2::new(a.x, b.y) * restitution;

    (
        rotate_out_of(a_final, sin, cos),
        rotate_out_of(b_final, sin, cos),
    )
}

/// Resolve a collision between two stones in place
///
/// Returns true if the stones were touching. Both stones are pushed apart by
/// half the overlap each and marked as moving so a struck stone wakes up.
pub fn resolve(a: &mut Stone, b: &mut Stone, restitution: f32) -> bool {
    let result = stone_stone_collision(a, b);
    if !result.hit {
        return false;
    }

    let (va, vb) = exchange_velocities(a.vel, b.vel, result.angle, restitution);
    a.vel = va;
    b.vel = vb;
    a.moving = true;
    b.moving = true;

    let push = result.normal * (result.penetration / 2.0);
    a.pos -= push;
    b.pos += push;

    log::trace!(
        "Stone collision at angle {:.3}, overlap {:.3}",
        result.angle,
        result.penetration
    );
    true
}

/// Resolve every unordered pair once, in index order
///
/// Returns the number of contacts resolved.
pub fn resolve_all(stones: &mut [Stone], restitution: f32) -> usize {
    let mut contacts = 0;
    for i in 0..stones.len() {
        let (head, tail) = stones.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve(a, b, restitution) {
                contacts += 1;
            }
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stone::Side;

    fn stone_at(x: f32, y: f32, vel: Vec2) -> Stone {
        let mut stone = Stone::new(Vec2::new(x, y), 10.0, Side::Player);
        stone.vel = vel;
        stone.moving = vel != Vec2::ZERO;
        stone
    }

    /// Split a velocity into (normal, tangential) parts for the given angle
    fn components(v: Vec2, angle: f32) -> (f32, f32) {
        let (sin, cos) = angle.sin_cos();
        let r = rotate_into(v, sin, cos);
        (r.x, r.y)
    }

    #[test]
    fn test_no_collision_when_apart() {
        let mut a = stone_at(0.0, 0.0, Vec2::new(1.0, 0.0));
        let mut b = stone_at(25.0, 0.0, Vec2::ZERO);
        assert!(!resolve(&mut a, &mut b, 0.8));
        assert!(!b.moving);
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let a = stone_at(0.0, 0.0, Vec2::ZERO);
        let b = stone_at(20.0, 0.0, Vec2::ZERO);
        assert!(!stone_stone_collision(&a, &b).hit);
    }

    #[test]
    fn test_head_on_transfers_momentum() {
        let mut a = stone_at(0.0, 0.0, Vec2::new(5.0, 0.0));
        let mut b = stone_at(18.0, 0.0, Vec2::ZERO);
        assert!(resolve(&mut a, &mut b, 0.8));

        assert!(a.vel.length() < 1e-5);
        assert!((b.vel.x - 4.0).abs() < 1e-5);
        assert!(b.moving);
        assert!(a.moving);
    }

    #[test]
    fn test_elastic_exchange_conserves_momentum() {
        let mut a = stone_at(0.0, 0.0, Vec2::new(3.0, 1.0));
        let mut b = stone_at(14.0, 6.0, Vec2::new(-2.0, 0.5));
        let before = a.vel * a.mass() + b.vel * b.mass();
        resolve(&mut a, &mut b, 1.0);
        let after = a.vel * a.mass() + b.vel * b.mass();
        assert!((after - before).length() < 1e-3);
    }

    #[test]
    fn test_struck_stone_wakes_up() {
        let mut a = stone_at(0.0, 0.0, Vec2::new(0.0, 3.0));
        let mut b = stone_at(0.0, 15.0, Vec2::ZERO);
        resolve(&mut a, &mut b, 0.8);
        assert!(b.moving);
        assert!(b.vel.y > 0.0);
    }

    #[test]
    fn test_overlap_is_removed() {
        let mut a = stone_at(0.0, 0.0, Vec2::new(2.0, 1.0));
        let mut b = stone_at(12.0, 9.0, Vec2::new(-1.0, 0.5));
        resolve(&mut a, &mut b, 0.8);
        assert!((a.pos.distance(b.pos) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_coincident_centers_stay_finite() {
        let mut a = stone_at(50.0, 50.0, Vec2::new(1.0, -2.0));
        let mut b = stone_at(50.0, 50.0, Vec2::new(-0.5, 0.5));
        assert!(resolve(&mut a, &mut b, 0.8));

        assert!(a.pos.is_finite() && b.pos.is_finite());
        assert!(a.vel.is_finite() && b.vel.is_finite());
        // Fallback angle 0 separates along x
        assert!((b.pos.x - a.pos.x - 20.0).abs() < 1e-4);
        assert_eq!(a.pos.y, b.pos.y);
    }

    #[test]
    fn test_resolve_all_visits_each_pair() {
        let mut stones = vec![
            stone_at(0.0, 0.0, Vec2::new(1.0, 0.0)),
            stone_at(15.0, 0.0, Vec2::ZERO),
            stone_at(300.0, 300.0, Vec2::ZERO),
        ];
        assert_eq!(resolve_all(&mut stones, 0.8), 1);
        assert!(stones[1].moving);
        assert!(!stones[2].moving);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn tangential_components_scale_only_by_restitution(
                dx in -19.0f32..19.0,
                dy in -19.0f32..19.0,
                vax in -20.0f32..20.0,
                vay in -20.0f32..20.0,
                vbx in -20.0f32..20.0,
                vby in -20.0f32..20.0,
            ) {
                prop_assume!(dx.hypot(dy) > 0.5 && dx.hypot(dy) < 20.0);
                let mut a = stone_at(0.0, 0.0, Vec2::new(vax, vay));
                let mut b = stone_at(dx, dy, Vec2::new(vbx, vby));
                let angle = dy.atan2(dx);
                let (_, ta) = components(a.vel, angle);
                let (_, tb) = components(b.vel, angle);

                let mut damped_a = a.clone();
                let mut damped_b = b.clone();

                // Restitution 1 isolates the exchange itself
                prop_assert!(resolve(&mut a, &mut b, 1.0));
                let (_, ta2) = components(a.vel, angle);
                let (_, tb2) = components(b.vel, angle);
                prop_assert!((ta - ta2).abs() < 1e-3);
                prop_assert!((tb - tb2).abs() < 1e-3);

                prop_assert!(resolve(&mut damped_a, &mut damped_b, 0.8));
                let (_, ta3) = components(damped_a.vel, angle);
                let (_, tb3) = components(damped_b.vel, angle);
                prop_assert!((ta3 - 0.8 * ta).abs() < 1e-3);
                prop_assert!((tb3 - 0.8 * tb).abs() < 1e-3);
            }

            #[test]
            fn restitution_loses_normal_speed(
                dx in -19.0f32..19.0,
                dy in -19.0f32..19.0,
                vax in -20.0f32..20.0,
                vay in -20.0f32..20.0,
                vbx in -20.0f32..20.0,
                vby in -20.0f32..20.0,
            ) {
                prop_assume!(dx.hypot(dy) > 0.5 && dx.hypot(dy) < 20.0);
                let mut a = stone_at(0.0, 0.0, Vec2::new(vax, vay));
                let mut b = stone_at(dx, dy, Vec2::new(vbx, vby));
                let angle = dy.atan2(dx);
                let (na, _) = components(a.vel, angle);
                let (nb, _) = components(b.vel, angle);
                prop_assume!(na.abs() + nb.abs() > 1e-2);

                resolve(&mut a, &mut b, 0.8);
                let (na2, _) = components(a.vel, angle);
                let (nb2, _) = components(b.vel, angle);
                prop_assert!(na2.abs() + nb2.abs() < na.abs() + nb.abs());
            }

            #[test]
            fn resolved_stones_just_touch(
                dx in -19.0f32..19.0,
                dy in -19.0f32..19.0,
            ) {
                let mut a = stone_at(100.0, 100.0, Vec2::new(1.0, 0.0));
                let mut b = stone_at(100.0 + dx, 100.0 + dy, Vec2::ZERO);
                prop_assume!(a.pos.distance(b.pos) < 20.0);

                resolve(&mut a, &mut b, 0.8);
                prop_assert!((a.pos.distance(b.pos) - 20.0).abs() < 1e-3);
            }
        }
    }
}
