//! Rink edge handling
//!
//! The rink is an axis-aligned rectangle from (0, 0) to (width, height).
//! A stone whose edge crosses a side is pulled back onto it and bounces off
//! with damped perpendicular speed.

use super::stone::Stone;

/// Keep a stone inside the rink, bouncing it off any edge it crossed
///
/// `damping` is the fraction of perpendicular speed kept (0.5 halves it).
/// Returns true if any edge was hit.
pub fn clamp(stone: &mut Stone, width: f32, height: f32, damping: f32) -> bool {
    let r = stone.radius;
    let mut hit = false;

    if stone.pos.x < r {
        stone.pos.x = r;
        stone.vel.x *= -damping;
        hit = true;
    } else if stone.pos.x > width - r {
        stone.pos.x = width - r;
        stone.vel.x *= -damping;
        hit = true;
    }

    if stone.pos.y < r {
        stone.pos.y = r;
        stone.vel.y *= -damping;
        hit = true;
    } else if stone.pos.y > height - r {
        stone.pos.y = height - r;
        stone.vel.y *= -damping;
        hit = true;
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stone::Side;
    use glam::Vec2;

    fn stone(pos: Vec2, vel: Vec2) -> Stone {
        let mut s = Stone::new(pos, 10.0, Side::Opponent);
        s.launch(vel);
        s
    }

    #[test]
    fn test_inside_is_untouched() {
        let mut s = stone(Vec2::new(50.0, 50.0), Vec2::new(-3.0, 2.0));
        assert!(!clamp(&mut s, 100.0, 200.0, 0.5));
        assert_eq!(s.pos, Vec2::new(50.0, 50.0));
        assert_eq!(s.vel, Vec2::new(-3.0, 2.0));
    }

    #[test]
    fn test_top_edge_bounces_with_damping() {
        let mut s = stone(Vec2::new(50.0, 4.0), Vec2::new(1.0, -8.0));
        assert!(clamp(&mut s, 100.0, 200.0, 0.5));
        assert_eq!(s.pos.y, 10.0);
        assert_eq!(s.vel, Vec2::new(1.0, 4.0));
    }

    #[test]
    fn test_corner_hits_both_axes() {
        let mut s = stone(Vec2::new(99.0, 195.0), Vec2::new(6.0, 2.0));
        clamp(&mut s, 100.0, 200.0, 0.5);
        assert_eq!(s.pos, Vec2::new(90.0, 190.0));
        assert_eq!(s.vel, Vec2::new(-3.0, -1.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clamped_stones_stay_on_the_ice(
                x in -300.0f32..400.0,
                y in -300.0f32..500.0,
                vx in -50.0f32..50.0,
                vy in -50.0f32..50.0,
            ) {
                let mut s = stone(Vec2::new(x, y), Vec2::new(vx, vy));
                clamp(&mut s, 100.0, 200.0, 0.5);
                prop_assert!(s.pos.x >= 10.0 && s.pos.x <= 90.0);
                prop_assert!(s.pos.y >= 10.0 && s.pos.y <= 190.0);
            }
        }
    }
}
