//! Hardware trait implementations for a daemon without wired peripherals
//!
//! Real GPIO/IMU drivers stay out of scope; these implementations serve the
//! same seams from software. `SyntheticImu` and `ReplayImu` feed the
//! evaluation loop in production-shaped runs, `LogActuator` narrates what a
//! motor would do, and the scripted/recording variants drive the loop under
//! test.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use sitright_core::{
    Actuator, DigitalInput, HardwareError, HardwareResult, ImuSource, Sample,
};

/// Upright reading comfortably inside the factory profile
const UPRIGHT: Sample = Sample::new([0.1, -0.2, 9.81], [0.4, -0.3, 0.2]);

/// Slouched reading with the accelerometer X axis far out of range
const SLOUCHED: Sample = Sample::new([7.5, -0.2, 9.3], [0.4, -0.3, 0.2]);

/// Wave generator: stretches of good posture with slouch bursts
///
/// The burst length exceeds the dwell threshold so a full cycle exercises
/// the trigger path end to end.
#[derive(Debug, Default)]
pub struct SyntheticImu {
    tick: u64,
}

impl SyntheticImu {
    /// Ticks of good posture per cycle
    const GOOD_TICKS: u64 = 30;
    /// Ticks of slouch per cycle
    const BAD_TICKS: u64 = 15;

    /// Create a generator starting upright
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImuSource for SyntheticImu {
    fn read(&mut self) -> HardwareResult<Sample> {
        let phase = self.tick % (Self::GOOD_TICKS + Self::BAD_TICKS);
        self.tick += 1;
        Ok(if phase < Self::GOOD_TICKS {
            UPRIGHT
        } else {
            SLOUCHED
        })
    }
}

/// Replay of a recorded capture: one `ax,ay,az,gx,gy,gz` row per line
///
/// The capture loops forever so short recordings still drive long sessions.
#[derive(Debug)]
pub struct ReplayImu {
    samples: Vec<Sample>,
    cursor: usize,
}

impl ReplayImu {
    /// Load a capture file
    pub fn from_csv(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading capture {}", path.display()))?;

        let mut samples = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<f32> = line
                .split(',')
                .map(|f| f.trim().parse())
                .collect::<std::result::Result<_, _>>()
                .with_context(|| format!("capture line {}", lineno + 1))?;
            anyhow::ensure!(
                fields.len() == 6,
                "capture line {}: expected 6 fields, got {}",
                lineno + 1,
                fields.len()
            );
            samples.push(Sample::new(
                [fields[0], fields[1], fields[2]],
                [fields[3], fields[4], fields[5]],
            ));
        }
        anyhow::ensure!(!samples.is_empty(), "capture is empty");

        Ok(Self { samples, cursor: 0 })
    }
}

impl ImuSource for ReplayImu {
    fn read(&mut self) -> HardwareResult<Sample> {
        let sample = self.samples[self.cursor];
        self.cursor = (self.cursor + 1) % self.samples.len();
        Ok(sample)
    }
}

/// Scripted IMU for tests: plays back prepared results, then fails
#[derive(Debug)]
pub struct ScriptedImu {
    script: Vec<HardwareResult<Sample>>,
    cursor: usize,
}

impl ScriptedImu {
    /// Create a source that yields `script` in order
    pub fn new(script: Vec<HardwareResult<Sample>>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl ImuSource for ScriptedImu {
    fn read(&mut self) -> HardwareResult<Sample> {
        let result = self
            .script
            .get(self.cursor)
            .copied()
            .unwrap_or(Err(HardwareError::SensorRead {
                reason: "script exhausted",
            }));
        self.cursor += 1;
        result
    }
}

/// Actuator that narrates state changes to the log
#[derive(Debug, Default)]
pub struct LogActuator {
    on: bool,
}

impl LogActuator {
    /// Create an off actuator
    pub fn new() -> Self {
        Self::default()
    }
}

impl Actuator for LogActuator {
    fn set(&mut self, on: bool) -> HardwareResult<()> {
        if self.on != on {
            tracing::info!(on, "haptic actuator");
        }
        self.on = on;
        Ok(())
    }
}

/// Actuator that records every `set` call for assertions
#[derive(Debug, Default)]
pub struct RecordingActuator {
    log: Arc<Mutex<Vec<bool>>>,
}

impl RecordingActuator {
    /// Create an actuator with an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded calls
    pub fn log(&self) -> Arc<Mutex<Vec<bool>>> {
        Arc::clone(&self.log)
    }
}

impl Actuator for RecordingActuator {
    fn set(&mut self, on: bool) -> HardwareResult<()> {
        self.log.lock().expect("actuator log poisoned").push(on);
        Ok(())
    }
}

/// Digital input backed by a shared flag
///
/// The daemon flips it for auto-start; tests flip it to simulate presses.
#[derive(Debug, Clone, Default)]
pub struct LatchInput {
    level: Arc<AtomicBool>,
}

impl LatchInput {
    /// Create a low input
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for driving the level from outside the loop
    pub fn handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.level)
    }
}

impl DigitalInput for LatchInput {
    fn read(&mut self) -> HardwareResult<bool> {
        Ok(self.level.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_wave_covers_both_postures() {
        let mut imu = SyntheticImu::new();
        let classifier = sitright_core::PostureClassifier::default();

        let verdicts: Vec<bool> = (0..SyntheticImu::GOOD_TICKS + SyntheticImu::BAD_TICKS)
            .map(|_| classifier.is_bad(&imu.read().unwrap()))
            .collect();

        assert!(verdicts.iter().any(|b| *b));
        assert!(verdicts.iter().any(|b| !*b));
        // Slouch burst is long enough to reach the dwell trigger
        let bad_run = verdicts.iter().filter(|b| **b).count() as u64;
        assert!(bad_run * 1_000 > sitright_core::constants::scoring::DWELL_TRIGGER_MS);
    }

    #[test]
    fn replay_parses_and_loops() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.csv");
        fs::write(&path, "# capture\n0.1, -0.2, 9.81, 0.0, 0.0, 0.0\n7.5,0.0,9.3,0.0,0.0,0.0\n")
            .unwrap();

        let mut imu = ReplayImu::from_csv(&path).unwrap();
        let first = imu.read().unwrap();
        let second = imu.read().unwrap();
        let third = imu.read().unwrap();

        assert_eq!(first.accel[0], 0.1);
        assert_eq!(second.accel[0], 7.5);
        assert_eq!(third, first);
    }

    #[test]
    fn replay_rejects_short_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.csv");
        fs::write(&path, "0.1,0.2,0.3\n").unwrap();

        assert!(ReplayImu::from_csv(&path).is_err());
    }

    #[test]
    fn scripted_imu_fails_after_script() {
        let mut imu = ScriptedImu::new(vec![Ok(UPRIGHT)]);
        assert!(imu.read().is_ok());
        assert!(matches!(
            imu.read(),
            Err(HardwareError::SensorRead { .. })
        ));
    }
}
