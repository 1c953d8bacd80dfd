//! Fixed-step simulation tick
//!
//! One tick is one displayed frame. Each tick applies input, fires due
//! deferred actions, then (while stones slide) runs
//! kinematics -> collisions -> rink edges -> settle check.

use glam::Vec2;

use super::boundary;
use super::collision::resolve_all;
use super::opponent::decide_throw;
use super::schedule::Deferred;
use super::state::{GamePhase, MatchState, Rink};
use super::stone::{IceFriction, Side, Stone};
use crate::tuning::Tuning;

/// A throw request from the input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowCommand {
    pub side: Side,
    pub velocity: Vec2,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Completed throw gesture
    pub throw: Option<ThrowCommand>,
    /// Sweep gesture seen this tick
    pub sweep: bool,
    /// Idle/demo mode - the computer throws for the player too
    pub idle_mode: bool,
}

/// Advance the match by one tick
pub fn tick(state: &mut MatchState, input: &TickInput) {
    if let Some(cmd) = input.throw {
        if let Err(e) = state.request_throw(cmd.side, cmd.velocity) {
            log::debug!("Ignored {} throw: {e}", cmd.side.as_str());
        }
    }

    if input.sweep {
        state.set_sweep_active(true);
    }

    if input.idle_mode && state.turn == Side::Player && state.phase == GamePhase::Idle {
        computer_throw(state, Side::Player);
    }

    for purpose in state.schedule.advance() {
        match purpose {
            Deferred::OpponentThrow => {
                if state.turn == Side::Opponent && state.phase == GamePhase::Idle {
                    computer_throw(state, Side::Opponent);
                }
            }
            Deferred::EndTransition => state.start_new_end(),
            Deferred::SweepClear => state.sweeping = false,
        }
    }

    if state.phase == GamePhase::Moving {
        let still_moving = step_stones(
            &mut state.stones,
            state.sweeping,
            &state.rink,
            &state.tuning,
        );
        if !still_moving {
            state.end_turn();
        }
    }

    state.time_ticks += 1;
}

/// Let the opponent strategy pick and launch a throw for `side`
fn computer_throw(state: &mut MatchState, side: Side) {
    let Some(stone) = &state.current_stone else {
        return;
    };
    let launch = stone.pos;
    let mut rng = state.rng_state.next_rng();
    let velocity = decide_throw(
        launch,
        state.rink.button,
        state.rink.width,
        &state.throw_model,
        &mut rng,
    );

    if let Err(e) = state.request_throw(side, velocity) {
        log::warn!("Computer throw for {} refused: {e}", side.as_str());
    }
}

/// Run one physics step over every stone in play
///
/// Returns whether any stone was still sliding after the kinematic pass.
/// Collisions may wake a stone afterwards; it is picked up next step.
pub fn step_stones(stones: &mut [Stone], sweeping: bool, rink: &Rink, tuning: &Tuning) -> bool {
    let friction = IceFriction::from(tuning);

    let mut any_moving = false;
    for stone in stones.iter_mut() {
        stone.advance(sweeping, &friction);
        any_moving |= stone.moving;
    }

    resolve_all(stones, tuning.restitution);

    for stone in stones.iter_mut() {
        boundary::clamp(stone, rink.width, rink.height, tuning.wall_damping);
    }

    any_moving
}
