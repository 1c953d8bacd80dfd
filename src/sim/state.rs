//! Match state and turn control
//!
//! All state the simulation needs between ticks lives here, together with
//! the turn transitions (throw, turn hand-off, end scoring, new end).

use std::fmt;

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aim::{AimParams, Drag};
use super::opponent::ThrowModel;
use super::schedule::{Deferred, Schedule};
use super::scoring::{self, EndResult, Scoreboard};
use super::stone::{Side, Stone};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the side on turn to throw
    Idle,
    /// At least one thrown stone has not settled yet
    Moving,
    /// All stones thrown and settled; the end has been scored
    EndFinished,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ThrowLaunched { side: Side, velocity: Vec2 },
    TurnChanged { turn: Side },
    EndFinished { end: u32, result: EndResult },
    NewEnd { end: u32 },
}

/// Why a throw request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidThrow {
    /// Stones are still moving or the end is over
    NotIdle,
    /// The other side is on turn
    WrongSide,
    /// The side has thrown all its stones
    NoStonesLeft,
    /// Velocity has a NaN or infinite component
    NonFinite,
}

impl fmt::Display for InvalidThrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            InvalidThrow::NotIdle => "not waiting for a throw",
            InvalidThrow::WrongSide => "not this side's turn",
            InvalidThrow::NoStonesLeft => "no stones left this end",
            InvalidThrow::NonFinite => "launch velocity is not finite",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for InvalidThrow {}

/// Rink geometry derived from the playing surface size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rink {
    pub width: f32,
    pub height: f32,
    /// Launch point, on the center line near the bottom
    pub hack: Vec2,
    /// Center of the house
    pub button: Vec2,
    pub stone_radius: f32,
    pub house_radius: f32,
}

impl Rink {
    pub fn new(width: f32, height: f32, tuning: &Tuning) -> Self {
        let center_x = width / 2.0;
        Self {
            width,
            height,
            hack: Vec2::new(center_x, height - tuning.hack_offset),
            button: Vec2::new(center_x, height * tuning.button_ratio),
            stone_radius: width * tuning.stone_radius_ratio,
            house_radius: width * tuning.house_radius_ratio,
        }
    }
}

/// RNG state wrapper for serialization
///
/// Every computer throw draws from a fresh PCG stream so replays with the
/// same seed reproduce the same throws.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Read-only stone data for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoneView {
    pub pos: Vec2,
    pub radius: f32,
    pub owner: Side,
}

impl From<&Stone> for StoneView {
    fn from(stone: &Stone) -> Self {
        Self {
            pos: stone.pos,
            radius: stone.radius,
            owner: stone.owner,
        }
    }
}

/// Everything the HUD and renderer need for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub turn: Side,
    pub phase: GamePhase,
    pub end_number: u32,
    pub player_stones_left: u8,
    pub opponent_stones_left: u8,
    pub player_score: u32,
    pub opponent_score: u32,
    pub sweeping: bool,
    pub stones: Vec<StoneView>,
    /// Stone waiting at the hack, if any
    pub current_stone: Option<StoneView>,
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Physics and rule constants
    pub tuning: Tuning,
    /// Playing surface
    pub rink: Rink,
    /// Computer aim model
    pub throw_model: ThrowModel,
    /// RNG state
    pub rng_state: RngState,
    /// 1-based end counter
    pub end_number: u32,
    /// Side on turn
    pub turn: Side,
    /// Stones left to throw, indexed by `Side::index`
    remaining: [u8; 2],
    /// Current phase
    pub phase: GamePhase,
    /// Stones in play this end, in throw order
    pub stones: Vec<Stone>,
    /// Stone waiting at the hack
    pub current_stone: Option<Stone>,
    /// Cumulative score across ends
    pub scoreboard: Scoreboard,
    /// Last scored end
    pub last_result: Option<EndResult>,
    /// Friction is reduced while set
    pub sweeping: bool,
    /// Deferred actions
    pub schedule: Schedule,
    /// Player drag in progress
    #[serde(skip)]
    pub drag: Option<Drag>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Undrained notifications
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl MatchState {
    /// Create a match with default settings and the given seed
    pub fn new(seed: u64) -> Self {
        Self::from_settings(&Settings {
            seed,
            ..Settings::default()
        })
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let tuning = settings.tuning.clone();
        let rink = Rink::new(settings.rink_width, settings.rink_height, &tuning);
        let throw_model = ThrowModel {
            force_ratio: tuning.opponent_force_ratio,
            lateral_gain: tuning.opponent_lateral_gain,
            error_fraction: settings.difficulty.aim_error(),
        };

        let mut state = Self {
            rink,
            throw_model,
            rng_state: RngState::new(settings.seed),
            end_number: 0,
            turn: Side::Player,
            remaining: [tuning.stones_per_end; 2],
            phase: GamePhase::Idle,
            stones: Vec::new(),
            current_stone: None,
            scoreboard: Scoreboard::new(),
            last_result: None,
            sweeping: false,
            schedule: Schedule::new(),
            drag: None,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        };

        state.start_new_end();
        state
    }

    /// Stones `side` still has to throw this end
    pub fn remaining(&self, side: Side) -> u8 {
        self.remaining[side.index()]
    }

    /// Override stone counts (scenario setup)
    ///
    /// Emptying the side on turn while it waits to throw passes the turn on,
    /// or finishes the end if neither side has stones left.
    pub fn set_remaining(&mut self, side: Side, count: u8) {
        self.remaining[side.index()] = count;
        self.rebalance_turn();
    }

    fn rebalance_turn(&mut self) {
        if self.phase != GamePhase::Idle || self.remaining(self.turn) > 0 {
            return;
        }

        self.schedule.cancel(Deferred::OpponentThrow);
        self.drag = None;
        let next = self.turn.other();
        if self.remaining(next) > 0 {
            self.turn = next;
        }

        self.prepare_turn();
        if self.phase == GamePhase::Idle {
            log::debug!("{} to throw", self.turn.as_str());
            self.push_event(GameEvent::TurnChanged { turn: self.turn });
        }
    }

    pub fn aim_params(&self) -> AimParams {
        AimParams {
            throw_force: self.tuning.throw_force,
            min_drag_distance: self.tuning.min_drag_distance,
            grab_radius_factor: self.tuning.grab_radius_factor,
        }
    }

    /// Take all queued notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear the ice and give both sides a full set of stones
    pub fn start_new_end(&mut self) {
        self.stones.clear();
        self.remaining = [self.tuning.stones_per_end; 2];
        self.turn = Side::Player;
        self.phase = GamePhase::Idle;
        self.sweeping = false;
        self.drag = None;
        self.schedule.clear();
        self.end_number += 1;

        log::info!("End {} started", self.end_number);
        self.push_event(GameEvent::NewEnd {
            end: self.end_number,
        });
        self.prepare_turn();
    }

    /// Start over from end 1 with a blank scoreboard
    pub fn reset_match(&mut self) {
        self.scoreboard.reset();
        self.last_result = None;
        self.end_number = 0;
        self.start_new_end();
    }

    /// Place the next stone at the hack, or score if nobody has stones left
    fn prepare_turn(&mut self) {
        if self.remaining.iter().all(|&n| n == 0) {
            self.finish_end();
            return;
        }

        self.phase = GamePhase::Idle;
        self.current_stone = Some(Stone::new(
            self.rink.hack,
            self.rink.stone_radius,
            self.turn,
        ));

        if self.turn == Side::Opponent {
            self.schedule
                .schedule(Deferred::OpponentThrow, self.tuning.opponent_delay_ticks);
        }
    }

    /// All stones settled: hand over to the other side if it has stones left
    pub(crate) fn end_turn(&mut self) {
        self.sweeping = false;
        self.schedule.cancel(Deferred::SweepClear);
        for stone in &mut self.stones {
            stone.moving = false;
        }

        let next = self.turn.other();
        if self.remaining(next) > 0 {
            self.turn = next;
        }

        self.prepare_turn();
        if self.phase == GamePhase::Idle {
            log::debug!("{} to throw", self.turn.as_str());
            self.push_event(GameEvent::TurnChanged { turn: self.turn });
        }
    }

    /// Score the end and queue the next one
    fn finish_end(&mut self) {
        self.phase = GamePhase::EndFinished;
        self.current_stone = None;

        let result = scoring::score(
            &self.stones,
            self.rink.button,
            self.rink.house_radius,
            &mut self.scoreboard,
        );
        match result.winner {
            Some(side) => log::info!(
                "End {}: {} scores {} (match {}-{})",
                self.end_number,
                side.as_str(),
                result.points,
                self.scoreboard.points(Side::Player),
                self.scoreboard.points(Side::Opponent)
            ),
            None => log::info!("End {}: blank end", self.end_number),
        }

        self.last_result = Some(result);
        self.push_event(GameEvent::EndFinished {
            end: self.end_number,
            result,
        });
        self.schedule
            .schedule(Deferred::EndTransition, self.tuning.end_transition_ticks);
    }

    /// Launch the waiting stone for `side`
    ///
    /// Only the side on turn may throw, and only while the end is idle.
    /// A refused throw leaves the state untouched.
    pub fn request_throw(&mut self, side: Side, velocity: Vec2) -> Result<(), InvalidThrow> {
        if self.phase != GamePhase::Idle {
            return Err(InvalidThrow::NotIdle);
        }
        if side != self.turn {
            return Err(InvalidThrow::WrongSide);
        }
        if !velocity.is_finite() {
            return Err(InvalidThrow::NonFinite);
        }
        if self.remaining(side) == 0 {
            return Err(InvalidThrow::NoStonesLeft);
        }
        let Some(mut stone) = self.current_stone.take() else {
            return Err(InvalidThrow::NoStonesLeft);
        };

        stone.launch(velocity);
        self.stones.push(stone);
        self.remaining[side.index()] -= 1;
        self.phase = GamePhase::Moving;
        self.drag = None;
        self.schedule.cancel(Deferred::OpponentThrow);

        log::debug!(
            "{} threw ({:.2}, {:.2}), {} left",
            side.as_str(),
            velocity.x,
            velocity.y,
            self.remaining(side)
        );
        self.push_event(GameEvent::ThrowLaunched { side, velocity });
        Ok(())
    }

    /// Turn sweeping on or off
    ///
    /// Ignored unless stones are sliding. Turning it on (re)arms the
    /// auto-clear timer. Returns true if the request was applied.
    pub fn set_sweep_active(&mut self, active: bool) -> bool {
        if self.phase != GamePhase::Moving || !self.stones.iter().any(|s| s.moving) {
            return false;
        }

        self.sweeping = active;
        if active {
            self.schedule
                .schedule(Deferred::SweepClear, self.tuning.sweep_clear_ticks);
        } else {
            self.schedule.cancel(Deferred::SweepClear);
        }
        true
    }

    /// Pointer pressed: start aiming if it is the player's idle turn
    pub fn begin_drag(&mut self, pointer: Vec2) -> bool {
        if self.turn != Side::Player || self.phase != GamePhase::Idle {
            return false;
        }
        let Some(stone) = &self.current_stone else {
            return false;
        };
        self.drag = Drag::begin(pointer, stone.pos, stone.radius, &self.aim_params());
        self.drag.is_some()
    }

    /// Pointer moved: sweeps while stones slide, otherwise updates the aim
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        if self.phase == GamePhase::Moving {
            self.set_sweep_active(true);
            return;
        }
        if let Some(drag) = &mut self.drag {
            drag.update(pointer);
        }
    }

    /// Pointer released: throw if the drag was long enough
    pub fn end_drag(&mut self, pointer: Vec2) -> Option<Vec2> {
        let drag = self.drag.take()?;
        let velocity = drag.release(pointer, &self.aim_params())?;
        self.request_throw(Side::Player, velocity).ok()?;
        Some(velocity)
    }

    /// Aim guide endpoints while dragging
    pub fn aim_line(&self) -> Option<(Vec2, Vec2)> {
        let drag = self.drag.as_ref()?;
        let stone = self.current_stone.as_ref()?;
        Some(drag.aim_line(stone.pos))
    }

    /// Playing surface changed size; the waiting stone follows the hack
    pub fn resize(&mut self, width: f32, height: f32) {
        self.rink = Rink::new(width, height, &self.tuning);
        if let Some(stone) = &mut self.current_stone {
            stone.pos = self.rink.hack;
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            turn: self.turn,
            phase: self.phase,
            end_number: self.end_number,
            player_stones_left: self.remaining(Side::Player),
            opponent_stones_left: self.remaining(Side::Opponent),
            player_score: self.scoreboard.points(Side::Player),
            opponent_score: self.scoreboard.points(Side::Opponent),
            sweeping: self.sweeping,
            stones: self.stones.iter().map(StoneView::from).collect(),
            current_stone: self.current_stone.as_ref().map(StoneView::from),
        }
    }
}
