//! Seams to the outside world
//!
//! Everything the engine touches beyond its own state lives behind a trait:
//! the IMU, the haptic actuator, the toggle input and the messaging
//! channel. The device binary supplies real (or simulated) implementations;
//! tests supply scripted ones.
//!
//! - [`hardware`] - IMU, actuator and digital input contracts
//! - [`notify`] - outbound notifications and inbound commands

pub mod hardware;
pub mod notify;

pub use hardware::{Actuator, DigitalInput, ImuSource};
pub use notify::{Command, Notification, Notifier};
