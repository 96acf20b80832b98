//! End-to-end flow across classifier, score engine, session and history
//!
//! Drives the full evaluation path the way the device loop does, with a
//! manually advanced clock, and checks the observable contract: hysteresis,
//! score decay, history growth and session uptime.

use sitright_core::{
    constants::scoring::TICK_INTERVAL_MS,
    time::{FixedTime, TimeSource},
    PostureClassifier, Sample, ScoreEngine, ScoreHistory, SessionController, SessionTransition,
    TickOutcome,
};

fn upright() -> Sample {
    Sample::new([0.0, 0.0, 9.8], [0.0, 0.0, 0.0])
}

fn slouched() -> Sample {
    // Accelerometer X far outside the default profile
    Sample::new([8.0, 0.0, 9.8], [0.0, 0.0, 0.0])
}

/// One device-style evaluation tick: classify, score, log.
fn evaluate(
    classifier: &PostureClassifier,
    engine: &mut ScoreEngine,
    history: &mut ScoreHistory,
    sample: Sample,
    clock: &FixedTime,
) -> TickOutcome {
    let outcome = engine.tick(classifier.is_bad(&sample), clock.now());
    history.append(clock.now(), engine.score());
    clock.advance(TICK_INTERVAL_MS);
    outcome
}

#[test]
fn sustained_slouch_triggers_and_decays_score() {
    let classifier = PostureClassifier::default();
    let mut engine = ScoreEngine::new(9);
    let mut history = ScoreHistory::new();
    let clock = FixedTime::new(0);

    let mut triggers = 0;
    for _ in 0..11 {
        if let TickOutcome::Triggered { score } =
            evaluate(&classifier, &mut engine, &mut history, slouched(), &clock)
        {
            triggers += 1;
            assert_eq!(score, 96.67);
        }
    }

    assert_eq!(triggers, 1);
    assert_eq!(history.len(), 11);
    assert_eq!(history.latest().unwrap().score, 96.67);
}

#[test]
fn interrupted_slouch_never_triggers() {
    let classifier = PostureClassifier::default();
    let mut engine = ScoreEngine::new(9);
    let mut history = ScoreHistory::new();
    let clock = FixedTime::new(0);

    // 9 bad, 1 good, 9 bad: 19 ticks, no trigger
    for i in 0..19 {
        let sample = if i == 9 { upright() } else { slouched() };
        let outcome = evaluate(&classifier, &mut engine, &mut history, sample, &clock);
        assert!(
            !matches!(outcome, TickOutcome::Triggered { .. }),
            "tick {i} must not trigger"
        );
    }

    assert_eq!(engine.accumulated_bad_ms(), 0);
    assert_eq!(history.len(), 19);
}

#[test]
fn session_uptime_matches_toggle_spacing() {
    let mut session = SessionController::new();
    let clock = FixedTime::new(5_000);

    session.toggle(clock.now());
    assert!(session.is_active());

    // 120 ticks of monitoring
    let classifier = PostureClassifier::default();
    let mut engine = ScoreEngine::new(1);
    let mut history = ScoreHistory::new();
    for _ in 0..120 {
        evaluate(&classifier, &mut engine, &mut history, upright(), &clock);
    }

    match session.toggle(clock.now()) {
        SessionTransition::Stopped { uptime_ms } => {
            assert_eq!(uptime_ms, 120 * TICK_INTERVAL_MS);
        }
        other => panic!("expected stop, got {other:?}"),
    }
    assert_eq!(history.len(), 120);
}
