//! One-shot deferred actions measured in ticks
//!
//! Each purpose has a single slot. Scheduling a purpose that is already
//! pending replaces it, so overlapping requests can never double-fire.

use serde::{Deserialize, Serialize};

/// What a deferred action is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// Computer throws after its thinking pause
    OpponentThrow,
    /// Scored end gives way to the next one
    EndTransition,
    /// Sweeping lapses once gestures stop
    SweepClear,
}

impl Deferred {
    const ALL: [Deferred; 3] = [
        Deferred::OpponentThrow,
        Deferred::EndTransition,
        Deferred::SweepClear,
    ];

    #[inline]
    fn slot(self) -> usize {
        match self {
            Deferred::OpponentThrow => 0,
            Deferred::EndTransition => 1,
            Deferred::SweepClear => 2,
        }
    }
}

/// Pending deferred actions, at most one per purpose
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Ticks remaining per slot
    remaining: [Option<u32>; 3],
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `purpose` to fire after `ticks` calls to [`Schedule::advance`],
    /// replacing any pending timer for the same purpose
    pub fn schedule(&mut self, purpose: Deferred, ticks: u32) {
        self.remaining[purpose.slot()] = Some(ticks.max(1));
    }

    /// Drop a pending timer; returns true if one was pending
    pub fn cancel(&mut self, purpose: Deferred) -> bool {
        self.remaining[purpose.slot()].take().is_some()
    }

    pub fn is_pending(&self, purpose: Deferred) -> bool {
        self.remaining[purpose.slot()].is_some()
    }

    /// Ticks left before `purpose` fires
    pub fn ticks_left(&self, purpose: Deferred) -> Option<u32> {
        self.remaining[purpose.slot()]
    }

    pub fn clear(&mut self) {
        self.remaining = [None; 3];
    }

    /// Count down one tick and return the purposes that fire, in slot order
    pub fn advance(&mut self) -> Vec<Deferred> {
        let mut fired = Vec::new();
        for purpose in Deferred::ALL {
            let slot = &mut self.remaining[purpose.slot()];
            if let Some(ticks) = slot {
                *ticks -= 1;
                if *ticks == 0 {
                    *slot = None;
                    fired.push(purpose);
                }
            }
        }
        fired
    }
}
