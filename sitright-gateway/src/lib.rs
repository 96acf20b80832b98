//! Messaging gateway for Sitright
//!
//! Implements the core [`Notifier`](sitright_core::Notifier) contract over a
//! Telegram-style HTTP bot API and runs the inbound command listener.
//!
//! ## Design
//!
//! The transport is deliberately blocking. The evaluation loop never calls
//! it on its hot path without accepting the latency (sends are
//! fire-and-forget from the loop's point of view, failures are logged and
//! dropped), and inbound traffic lives on its own long-polling thread that
//! hands parsed commands over an mpsc channel. No async runtime is needed
//! for one bot talking to one recipient.
//!
//! ## Reliability
//!
//! Outbound calls make a single retry after a fixed backoff when the
//! failure looks transient (transport error or 5xx). Anything else is
//! returned to the caller, which logs and moves on — delivery failures must
//! never reach the scoring path.
//!
//! ## Example
//!
//! ```no_run
//! use sitright_gateway::{BotClient, BotConfig};
//! use sitright_core::Notifier;
//!
//! let client = BotClient::new(BotConfig::new("123:abc", "42"));
//! client.send_text("42", "🔵 System is now ON. Monitoring posture...")?;
//! # Ok::<(), sitright_gateway::GatewayError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bot;
pub mod listener;

pub use bot::{BotClient, BotConfig, Update};
pub use listener::{CommandListener, InboundCommand};

use thiserror::Error;

/// Gateway failures
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connection-level failure (DNS, TLS, socket)
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("server returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Response body did not parse as expected
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<ureq::Error> for GatewayError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => GatewayError::Status { status },
            ureq::Error::Transport(t) => GatewayError::Transport(t.to_string()),
        }
    }
}
