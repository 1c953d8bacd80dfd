//! Data-driven physics and rule constants
//!
//! Every number the simulation uses lives here so a match can be rebalanced
//! from a JSON file without touching code. Missing fields fall back to the
//! defaults below.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Physics and rule tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Stone kinematics ===
    /// Velocity retained per tick on plain ice
    pub friction_normal: f32,
    /// Velocity retained per tick while sweeping (must exceed `friction_normal`)
    pub friction_sweeping: f32,
    /// Per-axis speed below which a stone is considered stopped
    pub stop_threshold: f32,

    // === Collisions ===
    /// Fraction of velocity kept after a stone-stone hit
    pub restitution: f32,
    /// Fraction of perpendicular speed kept after hitting a rink edge
    pub wall_damping: f32,

    // === Rink geometry (relative to rink size) ===
    /// Stone radius as a fraction of rink width
    pub stone_radius_ratio: f32,
    /// House radius as a fraction of rink width
    pub house_radius_ratio: f32,
    /// Distance from the bottom edge to the hack
    pub hack_offset: f32,
    /// Button height as a fraction of rink height
    pub button_ratio: f32,

    // === Turns ===
    /// Stones each side throws per end
    pub stones_per_end: u8,
    /// Pause before the opponent throws
    pub opponent_delay_ticks: u32,
    /// Pause between scoring and the next end
    pub end_transition_ticks: u32,
    /// How long a single sweep gesture keeps sweeping active
    pub sweep_clear_ticks: u32,

    // === Aiming ===
    /// Drag distance to launch speed multiplier
    pub throw_force: f32,
    /// Shorter drags are treated as cancelled
    pub min_drag_distance: f32,
    /// Drags must start within this many stone radii of the stone
    pub grab_radius_factor: f32,

    // === Opponent ===
    /// Forward speed as a fraction of hack-to-button distance
    pub opponent_force_ratio: f32,
    /// Lateral speed per unit of lateral aim offset
    pub opponent_lateral_gain: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction_normal: 0.992,
            friction_sweeping: 0.998,
            stop_threshold: 0.05,

            restitution: 0.8,
            wall_damping: 0.5,

            stone_radius_ratio: 0.04,
            house_radius_ratio: 0.4,
            hack_offset: 100.0,
            button_ratio: 0.25,

            stones_per_end: 4,
            opponent_delay_ticks: crate::seconds_to_ticks(1.0),
            end_transition_ticks: crate::seconds_to_ticks(1.0),
            sweep_clear_ticks: crate::seconds_to_ticks(0.1),

            throw_force: 0.15,
            min_drag_distance: 10.0,
            grab_radius_factor: 2.0,

            opponent_force_ratio: 0.155,
            opponent_lateral_gain: 0.05,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every field is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_fields = [
            ("friction_normal", self.friction_normal),
            ("friction_sweeping", self.friction_sweeping),
            ("restitution", self.restitution),
            ("wall_damping", self.wall_damping),
            ("stone_radius_ratio", self.stone_radius_ratio),
            ("house_radius_ratio", self.house_radius_ratio),
            ("button_ratio", self.button_ratio),
        ];
        for (field, value) in unit_fields {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        // Friction must actually slow stones down or ends never settle
        if self.friction_normal >= 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "friction_normal",
                value: self.friction_normal,
            });
        }
        if self.friction_sweeping >= 1.0 || self.friction_sweeping < self.friction_normal {
            return Err(ConfigError::OutOfRange {
                field: "friction_sweeping",
                value: self.friction_sweeping,
            });
        }

        let positive_fields = [
            ("stop_threshold", self.stop_threshold),
            ("throw_force", self.throw_force),
            ("grab_radius_factor", self.grab_radius_factor),
            ("opponent_force_ratio", self.opponent_force_ratio),
        ];
        for (field, value) in positive_fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        let non_negative_fields = [
            ("hack_offset", self.hack_offset),
            ("min_drag_distance", self.min_drag_distance),
            ("opponent_lateral_gain", self.opponent_lateral_gain),
        ];
        for (field, value) in non_negative_fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        if self.stones_per_end == 0 {
            return Err(ConfigError::OutOfRange {
                field: "stones_per_end",
                value: 0.0,
            });
        }

        Ok(())
    }
}
