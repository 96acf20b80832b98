//! Messaging channel contract
//!
//! Outbound, the device pushes lifecycle and warning texts (and the history
//! chart image) to a fixed recipient. Inbound, the transport delivers
//! `status` / `graph` commands, each with a reply target. Delivery is
//! fire-and-forget from the evaluation loop's point of view: a failed send
//! never propagates into scoring.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

/// Inbound command keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Reply with the current score
    Status,
    /// Reply with a rendered chart of the score history
    Graph,
}

impl Command {
    /// Parse a message text into a command
    ///
    /// Accepts the bare keyword or a leading-slash form, case-insensitive,
    /// ignoring surrounding whitespace and anything after the keyword.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let keyword = first.strip_prefix('/').unwrap_or(first);

        if keyword.eq_ignore_ascii_case("status") {
            Some(Command::Status)
        } else if keyword.eq_ignore_ascii_case("graph") {
            Some(Command::Graph)
        } else {
            None
        }
    }
}

/// Outbound push events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    /// Monitoring switched on
    SessionStarted,
    /// Monitoring switched off after `uptime_ms`
    SessionStopped {
        /// Session length
        uptime_ms: u64,
    },
    /// Sustained bad posture fired feedback
    PostureWarning {
        /// Score after the penalty
        score: f64,
    },
}

impl Notification {
    /// Message text for this event
    pub fn render(&self) -> String {
        match self {
            Notification::SessionStarted => {
                String::from("🔵 System is now ON. Monitoring posture...")
            }
            Notification::SessionStopped { uptime_ms } => format!(
                "🔴 System is OFF. Worked for {:.2} seconds.",
                *uptime_ms as f64 / 1_000.0
            ),
            Notification::PostureWarning { score } => {
                format!("⚠️ Bad posture detected! Your score: {score:.2}/100")
            }
        }
    }
}

/// Outbound messaging transport
pub trait Notifier {
    /// Transport-specific failure type
    type Error: core::fmt::Debug;

    /// Push a text message to `recipient`
    fn send_text(&self, recipient: &str, text: &str) -> Result<(), Self::Error>;

    /// Push an image attachment to `recipient`
    fn send_image(&self, recipient: &str, filename: &str, data: &[u8])
        -> Result<(), Self::Error>;
}
