//! Score engine tuning
//!
//! All durations are milliseconds of [`crate::time::Timestamp`].

/// Continuous bad posture required before feedback fires
pub const DWELL_TRIGGER_MS: u64 = 10_000;

/// Haptic pulse length once feedback fires
pub const FEEDBACK_PULSE_MS: u64 = 5_000;

/// Evaluation tick cadence
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Cumulative bad-posture time that drains the score to zero
pub const DECAY_WINDOW_MS: u64 = 300_000;

/// Half-width of the good-posture score perturbation, score units per tick
pub const WALK_AMPLITUDE: f64 = 1.5;

/// Score at process start
pub const INITIAL_SCORE: f64 = 100.0;

/// Score floor
pub const SCORE_MIN: f64 = 0.0;

/// Score ceiling
pub const SCORE_MAX: f64 = 100.0;
