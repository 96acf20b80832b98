//! Posture score state machine
//!
//! One [`ScoreEngine::tick`] per evaluation interval turns the classifier
//! verdict into a bounded score with hysteresis:
//!
//! ```text
//!            bad               elapsed ≥ trigger
//! Neutral ───────► Accumulating ────────────────► Triggered ──┐
//!    ▲  ▲            │    ▲                                   │
//!    │  └── good ────┘    └── bad, elapsed < trigger          │
//!    └────────────────────────────────────────────────────────┘
//! ```
//!
//! Hysteresis is strict: a single good tick fully resets the dwell timer,
//! so only *continuous* bad posture reaches the trigger. On trigger the
//! engine books the dwell duration against the decay window and recomputes
//! the score; on good ticks the score takes a bounded random walk that
//! models gradual recovery.
//!
//! The engine performs no IO. `Triggered` tells the caller to drive the
//! actuator pulse and send the warning; the caller owns both effects.

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

use crate::{
    constants::scoring::{
        DECAY_WINDOW_MS, DWELL_TRIGGER_MS, INITIAL_SCORE, SCORE_MAX, SCORE_MIN, WALK_AMPLITUDE,
    },
    time::Timestamp,
};

/// Round to two decimals, the score's published precision
fn round2(value: f64) -> f64 {
    libm::round(value * 100.0) / 100.0
}

/// Bad-posture dwell sub-machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellState {
    /// No bad-posture episode in progress
    Neutral,
    /// Bad posture observed, waiting out the trigger threshold
    Accumulating {
        /// When the current episode started
        since: Timestamp,
    },
}

/// What one evaluation tick decided
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Bad posture below the trigger threshold; score unchanged
    Holding,
    /// Sustained bad posture: drive the actuator pulse and send a warning
    Triggered {
        /// Score after booking the dwell penalty
        score: f64,
    },
    /// Good posture; score perturbed by the recovery walk
    Settled {
        /// Score after the walk
        score: f64,
    },
}

/// Stateful score engine
///
/// Owns the score, the cumulative bad-posture time and the dwell state.
/// The RNG is seedable so tests replay the same walk.
#[derive(Clone)]
pub struct ScoreEngine {
    score: f64,
    accumulated_bad_ms: u64,
    dwell: DwellState,
    rng: Mcg128Xsl64,
}

impl core::fmt::Debug for ScoreEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScoreEngine")
            .field("score", &self.score)
            .field("accumulated_bad_ms", &self.accumulated_bad_ms)
            .field("dwell", &self.dwell)
            .finish_non_exhaustive()
    }
}

impl ScoreEngine {
    /// Create an engine at full score
    pub fn new(seed: u64) -> Self {
        Self {
            score: INITIAL_SCORE,
            accumulated_bad_ms: 0,
            dwell: DwellState::Neutral,
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }

    /// Current score, always within `[0, 100]` at two decimals
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Total bad-posture time booked by triggers, monotone within a run
    pub fn accumulated_bad_ms(&self) -> u64 {
        self.accumulated_bad_ms
    }

    /// Current dwell state
    pub fn dwell(&self) -> DwellState {
        self.dwell
    }

    /// Advance the state machine by one evaluation tick
    ///
    /// `bad` is the classifier verdict for this tick, `now` the tick
    /// timestamp. Call only while a session is active.
    pub fn tick(&mut self, bad: bool, now: Timestamp) -> TickOutcome {
        if !bad {
            self.dwell = DwellState::Neutral;
            let delta = self.rng.gen_range(-WALK_AMPLITUDE..=WALK_AMPLITUDE);
            self.score = round2((self.score + delta).clamp(SCORE_MIN, SCORE_MAX));
            return TickOutcome::Settled { score: self.score };
        }

        match self.dwell {
            DwellState::Neutral => {
                self.dwell = DwellState::Accumulating { since: now };
                TickOutcome::Holding
            }
            DwellState::Accumulating { since } => {
                if now.saturating_sub(since) < DWELL_TRIGGER_MS {
                    return TickOutcome::Holding;
                }

                self.accumulated_bad_ms += DWELL_TRIGGER_MS;
                let penalty =
                    self.accumulated_bad_ms as f64 / DECAY_WINDOW_MS as f64 * SCORE_MAX;
                self.score = round2((SCORE_MAX - penalty).max(SCORE_MIN));
                self.dwell = DwellState::Neutral;
                TickOutcome::Triggered { score: self.score }
            }
        }
    }
}
