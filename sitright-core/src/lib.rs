//! Core posture evaluation engine for Sitright
//!
//! Turns a stream of noisy IMU samples into a bounded posture score with
//! hysteresis, decay and feedback actuation. Designed for small always-on
//! devices.
//!
//! Key constraints:
//! - No blocking sleeps anywhere in the evaluation path
//! - Deterministic under test (injectable clock and RNG seed)
//! - Hardware and transport live behind traits; this crate never touches IO
//!
//! ```no_run
//! use sitright_core::{PostureClassifier, PostureProfile, Sample, ScoreEngine};
//!
//! let classifier = PostureClassifier::new(PostureProfile::default());
//! let mut engine = ScoreEngine::new(0x5eed);
//!
//! let sample = Sample::new([0.1, -0.3, 9.8], [0.5, 0.2, -0.1]);
//! let outcome = engine.tick(classifier.is_bad(&sample), 1_000);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod classifier;
pub mod constants;
pub mod errors;
pub mod history;
pub mod sample;
pub mod scoring;
pub mod session;
pub mod time;
pub mod traits;

// Public API
pub use classifier::{AxisRange, PostureClassifier, PostureFault, PostureProfile};
pub use errors::{HardwareError, HardwareResult};
pub use history::{HistorySummary, ScoreHistory, ScorePoint};
pub use sample::{Axis, Sample};
pub use scoring::{DwellState, ScoreEngine, TickOutcome};
pub use session::{EdgeDetector, SessionController, SessionTransition};
pub use time::{TimeSource, Timestamp};
pub use traits::{Actuator, Command, DigitalInput, ImuSource, Notification, Notifier};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
