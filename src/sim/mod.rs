//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Stable iteration order (stones in throw order)
//! - No rendering or platform dependencies

pub mod aim;
pub mod boundary;
pub mod collision;
pub mod opponent;
pub mod schedule;
pub mod scoring;
pub mod state;
pub mod stone;
pub mod tick;

pub use aim::{AimParams, Drag};
pub use boundary::clamp;
pub use collision::{
    CollisionResult, exchange_velocities, resolve, resolve_all, stone_stone_collision,
};
pub use opponent::{ThrowModel, decide_throw};
pub use schedule::{Deferred, Schedule};
pub use scoring::{EndResult, Scoreboard, measure, score};
pub use state::{
    GameEvent, GamePhase, InvalidThrow, MatchState, Rink, RngState, Snapshot, StoneView,
};
pub use stone::{IceFriction, Side, Stone};
pub use tick::{ThrowCommand, TickInput, step_stones, tick};
