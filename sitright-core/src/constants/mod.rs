//! Fixed device configuration
//!
//! Everything here is a compile-time constant, not a runtime flag: the
//! device ships with one tuning. Constants are grouped by the component
//! that reads them.

pub mod posture;
pub mod scoring;
pub mod session;
