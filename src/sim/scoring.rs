//! End scoring
//!
//! Standard curling count: the side with the stone closest to the button
//! scores one point for every stone it has nearer than the opponent's best.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::stone::{Side, Stone};

/// Outcome of a single end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndResult {
    /// Side holding shot stone, `None` for a blank end
    pub winner: Option<Side>,
    pub points: u32,
}

impl EndResult {
    pub fn blank() -> Self {
        Self {
            winner: None,
            points: 0,
        }
    }
}

/// Cumulative match score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    points: [u32; 2],
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self, side: Side) -> u32 {
        self.points[side.index()]
    }

    /// Credit an end result to the winning side (blank ends change nothing)
    pub fn award(&mut self, result: &EndResult) {
        if let Some(side) = result.winner {
            self.points[side.index()] += result.points;
        }
    }

    /// Zero both sides
    pub fn reset(&mut self) {
        self.points = [0; 2];
    }
}

/// Measure an end without touching the scoreboard
///
/// Only stones whose center is within `house_radius` plus their own radius
/// of `button` count. Ties in distance keep their original order.
pub fn measure(stones: &[Stone], button: Vec2, house_radius: f32) -> EndResult {
    let mut in_house: Vec<(f32, Side)> = stones
        .iter()
        .map(|s| (s.distance_to(button), s.owner, s.radius))
        .filter(|&(dist, _, radius)| dist <= house_radius + radius)
        .map(|(dist, owner, _)| (dist, owner))
        .collect();

    // sort_by is stable
    in_house.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let Some(&(_, winner)) = in_house.first() else {
        return EndResult::blank();
    };

    let points = in_house
        .iter()
        .take_while(|&&(_, owner)| owner == winner)
        .count() as u32;

    EndResult {
        winner: Some(winner),
        points,
    }
}

/// Measure an end and credit the result to the scoreboard
pub fn score(
    stones: &[Stone],
    button: Vec2,
    house_radius: f32,
    scoreboard: &mut Scoreboard,
) -> EndResult {
    let result = measure(stones, button, house_radius);
    scoreboard.award(&result);
    result
}
