//! Error types for hardware seams
//!
//! Errors are kept small and heap-free: variants carry only `&'static str`
//! reasons and implement `Copy`, so they can be returned from per-tick hot
//! paths and stored without allocation.
//!
//! Recovery policy (enforced by the evaluation loop, not here):
//! - `SensorRead` is per-tick recoverable: the tick is skipped, the loop
//!   continues.
//! - `ActuatorInit` is fatal at startup: the process must not begin
//!   monitoring without a known-safe actuator state.
//! - `Actuator` and `InputRead` at runtime are logged and tolerated.

use thiserror_no_std::Error;

/// Result type for hardware trait operations
pub type HardwareResult<T> = Result<T, HardwareError>;

/// Failures surfaced by the hardware seams
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// IMU read failed for this tick
    #[error("sensor read failed: {reason}")]
    SensorRead {
        /// Driver-provided cause
        reason: &'static str,
    },

    /// Actuator could not be brought to a known-safe state at startup
    #[error("actuator init failed: {reason}")]
    ActuatorInit {
        /// Driver-provided cause
        reason: &'static str,
    },

    /// Actuator refused a state change at runtime
    #[error("actuator set failed: {reason}")]
    Actuator {
        /// Driver-provided cause
        reason: &'static str,
    },

    /// Digital input level could not be read
    #[error("input read failed: {reason}")]
    InputRead {
        /// Driver-provided cause
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for HardwareError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::SensorRead { reason } => defmt::write!(fmt, "sensor read failed: {}", reason),
            Self::ActuatorInit { reason } => defmt::write!(fmt, "actuator init failed: {}", reason),
            Self::Actuator { reason } => defmt::write!(fmt, "actuator set failed: {}", reason),
            Self::InputRead { reason } => defmt::write!(fmt, "input read failed: {}", reason),
        }
    }
}
