//! Inbound command listener
//!
//! A dedicated thread long-polls `getUpdates` and translates message texts
//! into [`Command`]s, published over an mpsc channel. The evaluation loop
//! never sees transport details; the command handler just drains the
//! receiver.
//!
//! Poll failures are logged and retried after a short pause — a flaky
//! network must not kill command handling for the life of the process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use sitright_core::Command;

use crate::bot::{BotClient, Update};

/// Pause before polling again after a failed `getUpdates`
const POLL_RETRY_PAUSE: Duration = Duration::from_secs(3);

/// A parsed command and where to send the reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    /// What was asked
    pub command: Command,
    /// Chat id to answer
    pub reply_to: String,
}

/// Translate a batch of updates into commands, advancing the poll offset
///
/// The offset moves past every update, command or not, so unparseable
/// chatter is consumed rather than re-delivered forever.
fn collect_commands(updates: Vec<Update>, next_offset: &mut i64) -> Vec<InboundCommand> {
    let mut commands = Vec::new();

    for update in updates {
        *next_offset = (*next_offset).max(update.update_id + 1);

        let Some(message) = update.message else {
            continue;
        };
        let Some(text) = message.text else {
            continue;
        };
        if let Some(command) = Command::parse(&text) {
            commands.push(InboundCommand {
                command,
                reply_to: message.chat.id.to_string(),
            });
        }
    }

    commands
}

/// Handle to the listener thread
pub struct CommandListener {
    handle: JoinHandle<()>,
}

impl CommandListener {
    /// Spawn the listener
    ///
    /// Runs until `shutdown` is set (checked between polls; with the
    /// configured long-poll window, shutdown latency is bounded by it) or
    /// the receiver side hangs up.
    pub fn spawn(client: BotClient, shutdown: Arc<AtomicBool>) -> (Self, Receiver<InboundCommand>) {
        let (tx, rx) = mpsc::channel();
        let handle = std::thread::Builder::new()
            .name("bot-listener".into())
            .spawn(move || poll_loop(client, shutdown, tx))
            .expect("spawning listener thread");

        (Self { handle }, rx)
    }

    /// Wait for the listener thread to finish
    pub fn join(self) {
        let _ = self.handle.join();
    }
}

fn poll_loop(client: BotClient, shutdown: Arc<AtomicBool>, tx: Sender<InboundCommand>) {
    let mut offset = 0i64;

    while !shutdown.load(Ordering::Relaxed) {
        let updates = match client.get_updates(offset) {
            Ok(updates) => updates,
            Err(err) => {
                log::warn!("getUpdates failed: {err}");
                std::thread::sleep(POLL_RETRY_PAUSE);
                continue;
            }
        };

        for command in collect_commands(updates, &mut offset) {
            if tx.send(command).is_err() {
                // Receiver gone: the device is shutting down
                return;
            }
        }
    }
}
