//! Inbound command handling
//!
//! Drains the listener channel and answers `status` and `graph` against a
//! locked snapshot of the shared state. Runs beside the evaluation loop;
//! replies go to whoever asked, not the configured push recipient.

use std::sync::mpsc::Receiver;

use sitright_core::Notifier;
use sitright_gateway::InboundCommand;

use crate::chart;
use crate::monitor::SharedState;

/// Text sent for `graph` when nothing has been recorded yet
const NO_DATA_REPLY: &str = "No posture data available yet.";

/// Answer a single command
pub fn handle_command<N: Notifier>(command: &InboundCommand, state: &SharedState, notifier: &N) {
    match command.command {
        sitright_core::Command::Status => {
            let score = {
                let state = state.lock().expect("monitor state poisoned");
                state.engine.score()
            };
            let reply = format!("Posture Score: {score:.2}/100");
            if let Err(err) = notifier.send_text(&command.reply_to, &reply) {
                tracing::warn!(?err, "status reply dropped");
            }
        }
        sitright_core::Command::Graph => {
            let (snapshot, summary) = {
                let state = state.lock().expect("monitor state poisoned");
                (state.history.snapshot(), state.history.summary())
            };

            let Some(summary) = summary else {
                if let Err(err) = notifier.send_text(&command.reply_to, NO_DATA_REPLY) {
                    tracing::warn!(?err, "graph reply dropped");
                }
                return;
            };

            let svg = chart::render(&snapshot, &summary);
            if let Err(err) =
                notifier.send_image(&command.reply_to, "posture_scores.svg", svg.as_bytes())
            {
                tracing::warn!(?err, "graph image dropped");
            }
        }
    }
}

/// Answer commands until the listener hangs up
pub fn run_handler<N: Notifier>(rx: Receiver<InboundCommand>, state: SharedState, notifier: N) {
    while let Ok(command) = rx.recv() {
        handle_command(&command, &state, &notifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::MonitorState;
    use sitright_core::Command;
    use std::sync::{Arc, Mutex};

    /// Notifier double recording every send
    #[derive(Debug, Clone, Default)]
    struct RecordingNotifier {
        texts: Arc<Mutex<Vec<(String, String)>>>,
        images: Arc<Mutex<Vec<(String, String, usize)>>>,
    }

    impl Notifier for RecordingNotifier {
        type Error = std::convert::Infallible;

        fn send_text(&self, recipient: &str, text: &str) -> Result<(), Self::Error> {
            self.texts
                .lock()
                .unwrap()
                .push((recipient.into(), text.into()));
            Ok(())
        }

        fn send_image(
            &self,
            recipient: &str,
            filename: &str,
            data: &[u8],
        ) -> Result<(), Self::Error> {
            self.images
                .lock()
                .unwrap()
                .push((recipient.into(), filename.into(), data.len()));
            Ok(())
        }
    }

    fn shared_state() -> SharedState {
        Arc::new(Mutex::new(MonitorState::new(1)))
    }

    #[test]
    fn status_replies_with_current_score() {
        let state = shared_state();
        let notifier = RecordingNotifier::default();

        handle_command(
            &InboundCommand {
                command: Command::Status,
                reply_to: "42".into(),
            },
            &state,
            &notifier,
        );

        let texts = notifier.texts.lock().unwrap();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].0, "42");
        assert_eq!(texts[0].1, "Posture Score: 100.00/100");
    }

    #[test]
    fn graph_on_empty_history_sends_no_data_text() {
        let state = shared_state();
        let notifier = RecordingNotifier::default();

        handle_command(
            &InboundCommand {
                command: Command::Graph,
                reply_to: "42".into(),
            },
            &state,
            &notifier,
        );

        assert!(notifier.images.lock().unwrap().is_empty());
        let texts = notifier.texts.lock().unwrap();
        assert_eq!(texts[0].1, NO_DATA_REPLY);
    }

    #[test]
    fn graph_with_history_sends_an_image() {
        let state = shared_state();
        state.lock().unwrap().history.append(1_000, 97.5);
        state.lock().unwrap().history.append(2_000, 96.67);
        let notifier = RecordingNotifier::default();

        handle_command(
            &InboundCommand {
                command: Command::Graph,
                reply_to: "42".into(),
            },
            &state,
            &notifier,
        );

        assert!(notifier.texts.lock().unwrap().is_empty());
        let images = notifier.images.lock().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].1, "posture_scores.svg");
        assert!(images[0].2 > 0);
    }
}
