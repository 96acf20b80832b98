//! Evaluation loop integration tests
//!
//! Drive `MonitorLoop::tick` directly with scripted hardware and a manual
//! clock: no sleeps, no network, fully deterministic apart from the score
//! walk (which these assertions do not depend on).

use std::sync::{Arc, Mutex};

use sitright_core::{
    constants::scoring::{FEEDBACK_PULSE_MS, TICK_INTERVAL_MS},
    time::FixedTime,
    HardwareError, Notifier, PostureClassifier, Sample, TimeSource,
};
use sitright_device::hardware::{LatchInput, RecordingActuator, ScriptedImu};
use sitright_device::monitor::{MonitorLoop, MonitorState, SharedState};

const UPRIGHT: Sample = Sample::new([0.1, -0.2, 9.81], [0.0, 0.0, 0.0]);
const SLOUCHED: Sample = Sample::new([7.5, -0.2, 9.3], [0.0, 0.0, 0.0]);

/// Notifier double recording message texts per recipient
#[derive(Debug, Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
}

impl Notifier for RecordingNotifier {
    type Error = std::convert::Infallible;

    fn send_text(&self, _recipient: &str, text: &str) -> Result<(), Self::Error> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn send_image(&self, _recipient: &str, _filename: &str, _data: &[u8]) -> Result<(), Self::Error> {
        self.sent.lock().unwrap().push("<image>".to_string());
        Ok(())
    }
}

struct Rig {
    monitor: MonitorLoop<
        ScriptedImu,
        RecordingActuator,
        LatchInput,
        RecordingNotifier,
        Arc<FixedTimeHandle>,
    >,
    clock_handle: Arc<FixedTimeHandle>,
    state: SharedState,
    toggle: Arc<std::sync::atomic::AtomicBool>,
    actuator_log: Arc<Mutex<Vec<bool>>>,
    sent: Arc<Mutex<Vec<String>>>,
}

/// The loop owns its clock; sharing one `FixedTime` between the loop and
/// the test body needs a cheap cloneable wrapper.
struct FixedTimeHandle(FixedTime);

impl sitright_core::TimeSource for FixedTimeHandle {
    fn now(&self) -> u64 {
        self.0.now()
    }
}

fn rig(script: Vec<Result<Sample, HardwareError>>) -> Rig {
    let clock_handle = Arc::new(FixedTimeHandle(FixedTime::new(0)));
    let state: SharedState = Arc::new(Mutex::new(MonitorState::new(1234)));
    let actuator = RecordingActuator::new();
    let actuator_log = actuator.log();
    let input = LatchInput::new();
    let toggle = input.handle();
    let notifier = RecordingNotifier::default();
    let sent = Arc::clone(&notifier.sent);

    let monitor = MonitorLoop::new(
        ScriptedImu::new(script),
        actuator,
        input,
        notifier,
        Arc::clone(&clock_handle),
        "42",
        PostureClassifier::default(),
        Arc::clone(&state),
    );

    Rig {
        monitor,
        clock_handle,
        state,
        toggle,
        actuator_log,
        sent,
    }
}

impl Rig {
    /// Run one tick and advance the clock by the nominal interval
    fn step(&mut self) {
        self.monitor.tick();
        self.clock_handle.0.advance(TICK_INTERVAL_MS);
    }

    fn history_len(&self) -> usize {
        self.state.lock().unwrap().history.len()
    }
}

#[test]
fn idle_loop_records_nothing() {
    let mut rig = rig(vec![Ok(UPRIGHT); 5]);

    for _ in 0..5 {
        rig.step();
    }

    assert_eq!(rig.history_len(), 0);
    assert!(rig.sent.lock().unwrap().is_empty());
}

#[test]
fn toggle_starts_session_and_history_grows_per_tick() {
    let mut rig = rig(vec![Ok(UPRIGHT); 20]);

    rig.toggle.store(true, std::sync::atomic::Ordering::Relaxed);
    rig.step(); // Rising edge: session starts, first active tick records
    rig.toggle.store(false, std::sync::atomic::Ordering::Relaxed);

    for _ in 0..9 {
        rig.step();
    }

    assert_eq!(rig.history_len(), 10);
    let sent = rig.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("ON"), "{}", sent[0]);
}

#[test]
fn toggle_off_reports_uptime() {
    let mut rig = rig(vec![Ok(UPRIGHT); 20]);

    rig.toggle.store(true, std::sync::atomic::Ordering::Relaxed);
    rig.step();
    rig.toggle.store(false, std::sync::atomic::Ordering::Relaxed);
    for _ in 0..9 {
        rig.step();
    }
    rig.toggle.store(true, std::sync::atomic::Ordering::Relaxed);
    rig.step();

    let sent = rig.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    // 10 ticks at 1s between the two accepted edges
    assert!(sent[1].contains("10.00 seconds"), "{}", sent[1]);
    assert!(!rig.state.lock().unwrap().session.is_active());
}

#[test]
fn sustained_slouch_fires_pulse_and_warning() {
    let mut script = vec![Ok(SLOUCHED); 12];
    script.insert(0, Ok(UPRIGHT)); // first active tick is good posture
    let mut rig = rig(script);

    rig.toggle.store(true, std::sync::atomic::Ordering::Relaxed);
    rig.step();
    rig.toggle.store(false, std::sync::atomic::Ordering::Relaxed);

    // 10 slouched ticks reach the dwell threshold on the 11th
    for _ in 0..10 {
        rig.step();
        assert!(!rig.monitor.pulse_active());
    }
    rig.step();

    assert!(rig.monitor.pulse_active());
    assert_eq!(*rig.actuator_log.lock().unwrap(), vec![true]);
    let warning = rig
        .sent
        .lock()
        .unwrap()
        .iter()
        .find(|t| t.contains("Bad posture"))
        .cloned()
        .expect("warning sent");
    assert!(warning.contains("96.67/100"), "{warning}");
}

#[test]
fn pulse_turns_off_at_deadline_without_blocking_ticks() {
    let mut script = vec![Ok(SLOUCHED); 11];
    script.extend(vec![Ok(UPRIGHT); 10]);
    let mut rig = rig(script);

    rig.toggle.store(true, std::sync::atomic::Ordering::Relaxed);
    rig.step();
    rig.toggle.store(false, std::sync::atomic::Ordering::Relaxed);

    // Reach the trigger
    while !rig.monitor.pulse_active() {
        rig.step();
    }
    let history_at_trigger = rig.history_len();

    // The pulse holds for FEEDBACK_PULSE_MS of ticks, loop keeps recording
    let pulse_ticks = (FEEDBACK_PULSE_MS / TICK_INTERVAL_MS) as usize;
    for _ in 0..pulse_ticks {
        assert!(rig.monitor.pulse_active());
        rig.step();
    }
    assert!(!rig.monitor.pulse_active());

    assert_eq!(*rig.actuator_log.lock().unwrap(), vec![true, false]);
    assert_eq!(rig.history_len(), history_at_trigger + pulse_ticks);
}

#[test]
fn sensor_failure_skips_tick_and_loop_continues() {
    let script = vec![
        Ok(UPRIGHT),
        Err(HardwareError::SensorRead { reason: "i2c timeout" }),
        Ok(UPRIGHT),
    ];
    let mut rig = rig(script);

    rig.toggle.store(true, std::sync::atomic::Ordering::Relaxed);
    rig.step();
    rig.toggle.store(false, std::sync::atomic::Ordering::Relaxed);
    rig.step(); // failed read: no history entry
    rig.step();

    assert_eq!(rig.history_len(), 2);
    assert!(rig.state.lock().unwrap().session.is_active());
}

#[test]
fn finish_closes_open_session_and_releases_actuator() {
    let mut rig = rig(vec![Ok(UPRIGHT); 5]);

    rig.toggle.store(true, std::sync::atomic::Ordering::Relaxed);
    rig.step();
    rig.toggle.store(false, std::sync::atomic::Ordering::Relaxed);
    rig.step();

    rig.monitor.finish();

    assert!(!rig.state.lock().unwrap().session.is_active());
    let sent = rig.sent.lock().unwrap();
    assert!(sent.last().unwrap().contains("System is OFF"), "{:?}", sent);
    assert_eq!(*rig.actuator_log.lock().unwrap(), vec![false]);
}
