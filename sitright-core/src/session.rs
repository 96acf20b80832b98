//! Monitoring session lifecycle
//!
//! A session is the interval between two toggle events of the physical
//! trigger. [`SessionController`] owns the active flag and start timestamp;
//! [`EdgeDetector`] turns a polled input level into debounced rising edges
//! without any blocking sleeps, so the evaluation loop never stalls on the
//! toggle path.

use crate::{constants::session::DEBOUNCE_MS, time::Timestamp};

/// What a toggle call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTransition {
    /// Monitoring switched on
    Started {
        /// Session start timestamp
        at: Timestamp,
    },
    /// Monitoring switched off
    Stopped {
        /// How long the session ran
        uptime_ms: u64,
    },
}

/// Session on/off state machine
///
/// Invariant: a start timestamp is recorded iff the session is active.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionController {
    started_at: Option<Timestamp>,
}

impl SessionController {
    /// Create an inactive controller
    pub const fn new() -> Self {
        Self { started_at: None }
    }

    /// Whether monitoring is on
    pub const fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Session start timestamp while active
    pub const fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    /// Elapsed session time while active
    pub fn uptime(&self, now: Timestamp) -> Option<u64> {
        self.started_at.map(|at| now.saturating_sub(at))
    }

    /// Flip the session state
    ///
    /// Re-toggling is never an error: on always follows off and vice versa.
    pub fn toggle(&mut self, now: Timestamp) -> SessionTransition {
        match self.started_at.take() {
            None => {
                self.started_at = Some(now);
                SessionTransition::Started { at: now }
            }
            Some(at) => SessionTransition::Stopped {
                uptime_ms: now.saturating_sub(at),
            },
        }
    }
}

/// Debounced rising-edge detector for a polled digital input
///
/// Reports an edge only on a low→high transition at least the debounce
/// window after the previously accepted edge. A held-high input therefore
/// produces exactly one edge, and contact bounce inside the window is
/// swallowed.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector {
    last_level: bool,
    last_edge_at: Option<Timestamp>,
    debounce_ms: u64,
}

impl EdgeDetector {
    /// Create a detector with a custom debounce window
    pub const fn with_debounce(debounce_ms: u64) -> Self {
        Self {
            last_level: false,
            last_edge_at: None,
            debounce_ms,
        }
    }

    /// Create a detector with the stock debounce window
    pub const fn new() -> Self {
        Self::with_debounce(DEBOUNCE_MS)
    }

    /// Feed one polled level, returning `true` on an accepted rising edge
    pub fn update(&mut self, level: bool, now: Timestamp) -> bool {
        let rising = level && !self.last_level;
        self.last_level = level;

        if !rising {
            return false;
        }

        let accepted = self
            .last_edge_at
            .map_or(true, |at| now.saturating_sub(at) >= self.debounce_ms);
        if accepted {
            self.last_edge_at = Some(now);
        }
        accepted
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}
