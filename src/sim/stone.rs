//! Stones and their per-tick kinematics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::STONE_MASS;
use crate::tuning::Tuning;

/// Which side a stone (or a turn) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// The other side
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Stable index for per-side arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Opponent => "Opponent",
        }
    }
}

/// Friction and stop rule applied by [`Stone::advance`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IceFriction {
    pub normal: f32,
    pub sweeping: f32,
    pub stop_threshold: f32,
}

impl Default for IceFriction {
    fn default() -> Self {
        Self::from(&Tuning::default())
    }
}

impl From<&Tuning> for IceFriction {
    fn from(tuning: &Tuning) -> Self {
        Self {
            normal: tuning.friction_normal,
            sweeping: tuning.friction_sweeping,
            stop_threshold: tuning.stop_threshold,
        }
    }
}

/// A curling stone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stone {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed at creation
    pub radius: f32,
    pub owner: Side,
    pub moving: bool,
}

impl Stone {
    /// A resting stone at `pos`
    pub fn new(pos: Vec2, radius: f32, owner: Side) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            owner,
            moving: false,
        }
    }

    /// Uniform for every stone
    #[inline]
    pub fn mass(&self) -> f32 {
        STONE_MASS
    }

    /// Release the stone with the given velocity
    pub fn launch(&mut self, vel: Vec2) {
        self.vel = vel;
        self.moving = true;
    }

    /// Integrate one tick: move, apply friction, then check the stop rule.
    ///
    /// Sweeping swaps in the higher retention coefficient. The stop rule is
    /// per axis: both |vx| and |vy| must be under the threshold, which is
    /// looser than a circular speed check for stones sliding at an angle.
    pub fn advance(&mut self, sweeping: bool, friction: &IceFriction) {
        if !self.moving {
            return;
        }

        self.pos += self.vel;

        let retain = if sweeping {
            friction.sweeping
        } else {
            friction.normal
        };
        self.vel *= retain;

        if self.vel.x.abs() < friction.stop_threshold && self.vel.y.abs() < friction.stop_threshold
        {
            self.vel = Vec2::ZERO;
            self.moving = false;
        }
    }

    /// Distance from the stone center to a point
    #[inline]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.pos.distance(point)
    }
}
