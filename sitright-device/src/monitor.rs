//! The evaluation loop
//!
//! One pass per tick: settle any pending actuator-off deadline, poll the
//! toggle input through the debounced edge detector, then — while a session
//! is active — read the IMU, classify, advance the score engine and append
//! to the history.
//!
//! Engine, session and history sit together behind one mutex
//! ([`SharedState`]); the command handler locks the same mutex for
//! snapshots, so a score read can never tear against a mid-tick update.
//! Locks are dropped before any notification is sent.
//!
//! The haptic pulse is a deferred deadline, not a sleep: `Triggered` turns
//! the actuator on and records when to turn it off, and a later tick
//! performs the off transition. The loop keeps sensing and keeps answering
//! the toggle for the whole pulse.
//!
//! Failure policy per tick: a failed sensor read skips the tick, a failed
//! input read skips edge detection, failed notification sends and actuator
//! writes are logged. Nothing here aborts the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sitright_core::{
    constants::scoring::FEEDBACK_PULSE_MS, Actuator, DigitalInput, EdgeDetector, ImuSource,
    Notification, Notifier, PostureClassifier, ScoreEngine, ScoreHistory, SessionController,
    SessionTransition, TickOutcome, TimeSource, Timestamp,
};

/// State shared between the evaluation loop and the command handler
#[derive(Debug)]
pub struct MonitorState {
    /// Score state machine
    pub engine: ScoreEngine,
    /// Session lifecycle
    pub session: SessionController,
    /// Scored tick log
    pub history: ScoreHistory,
}

impl MonitorState {
    /// Create state with an engine seeded by `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            engine: ScoreEngine::new(seed),
            session: SessionController::new(),
            history: ScoreHistory::new(),
        }
    }
}

/// Shared handle to [`MonitorState`]
pub type SharedState = Arc<Mutex<MonitorState>>;

/// The device evaluation loop
pub struct MonitorLoop<I, A, D, N, C> {
    imu: I,
    actuator: A,
    toggle: D,
    notifier: N,
    clock: C,
    recipient: String,
    classifier: PostureClassifier,
    state: SharedState,
    edge: EdgeDetector,
    pulse_off_at: Option<Timestamp>,
}

impl<I, A, D, N, C> MonitorLoop<I, A, D, N, C>
where
    I: ImuSource,
    A: Actuator,
    D: DigitalInput,
    N: Notifier,
    C: TimeSource,
{
    /// Wire up a loop
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        imu: I,
        actuator: A,
        toggle: D,
        notifier: N,
        clock: C,
        recipient: impl Into<String>,
        classifier: PostureClassifier,
        state: SharedState,
    ) -> Self {
        Self {
            imu,
            actuator,
            toggle,
            notifier,
            clock,
            recipient: recipient.into(),
            classifier,
            state,
            edge: EdgeDetector::new(),
            pulse_off_at: None,
        }
    }

    /// Whether a haptic pulse is currently held on
    pub fn pulse_active(&self) -> bool {
        self.pulse_off_at.is_some()
    }

    fn notify(&self, notification: Notification) {
        if let Err(err) = self
            .notifier
            .send_text(&self.recipient, &notification.render())
        {
            tracing::warn!(?err, "notification dropped");
        }
    }

    fn set_actuator(&mut self, on: bool) {
        if let Err(err) = self.actuator.set(on) {
            tracing::warn!(?err, on, "actuator write failed");
        }
    }

    /// Run one evaluation pass
    pub fn tick(&mut self) {
        let now = self.clock.now();

        // Settle a pending actuator-off deadline first so the pulse length
        // never depends on what else this tick does.
        if let Some(deadline) = self.pulse_off_at {
            if now >= deadline {
                self.set_actuator(false);
                self.pulse_off_at = None;
            }
        }

        match self.toggle.read() {
            Ok(level) => {
                if self.edge.update(level, now) {
                    let transition = {
                        let mut state = self.state.lock().expect("monitor state poisoned");
                        state.session.toggle(now)
                    };
                    match transition {
                        SessionTransition::Started { .. } => {
                            tracing::info!("session started");
                            self.notify(Notification::SessionStarted);
                        }
                        SessionTransition::Stopped { uptime_ms } => {
                            tracing::info!(uptime_ms, "session stopped");
                            self.notify(Notification::SessionStopped { uptime_ms });
                        }
                    }
                }
            }
            Err(err) => tracing::warn!(?err, "toggle read failed"),
        }

        let active = {
            let state = self.state.lock().expect("monitor state poisoned");
            state.session.is_active()
        };
        if !active {
            return;
        }

        let sample = match self.imu.read() {
            Ok(sample) => sample,
            Err(err) => {
                tracing::warn!(?err, "sensor read failed, skipping tick");
                return;
            }
        };
        let bad = self.classifier.is_bad(&sample);

        let outcome = {
            let mut state = self.state.lock().expect("monitor state poisoned");
            let outcome = state.engine.tick(bad, now);
            let score = state.engine.score();
            state.history.append(now, score);
            outcome
        };

        if let TickOutcome::Triggered { score } = outcome {
            tracing::info!(score, "sustained bad posture, firing feedback");
            self.set_actuator(true);
            self.pulse_off_at = Some(now + FEEDBACK_PULSE_MS);
            self.notify(Notification::PostureWarning { score });
        }
    }

    /// Tick at `interval` until `shutdown` is set, then clean up
    ///
    /// Cleanup is best effort: a final OFF notification if a session is
    /// still active, and the actuator released.
    pub fn run(&mut self, interval: Duration, shutdown: &AtomicBool) {
        while !shutdown.load(Ordering::Relaxed) {
            self.tick();
            std::thread::sleep(interval);
        }
        self.finish();
    }

    /// Best-effort shutdown: close an open session and release hardware
    pub fn finish(&mut self) {
        let transition = {
            let mut state = self.state.lock().expect("monitor state poisoned");
            state
                .session
                .is_active()
                .then(|| state.session.toggle(self.clock.now()))
        };
        if let Some(SessionTransition::Stopped { uptime_ms }) = transition {
            self.notify(Notification::SessionStopped { uptime_ms });
        }

        self.set_actuator(false);
        self.pulse_off_at = None;
    }
}
