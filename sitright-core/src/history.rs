//! Append-only score history
//!
//! One [`ScorePoint`] is appended per evaluation tick while a session is
//! active. The log grows unbounded by design: the device runs one long
//! session and never persists across restarts. The evaluation loop is the
//! only writer; the command path works on snapshots.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::time::Timestamp;

/// One scored evaluation tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScorePoint {
    /// Tick timestamp
    pub timestamp: Timestamp,
    /// Score after the tick
    pub score: f64,
}

/// Aggregate view of the history for status replies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySummary {
    /// Number of recorded ticks
    pub count: usize,
    /// Most recent score
    pub latest: f64,
    /// Mean score over the log
    pub mean: f64,
    /// Lowest score seen
    pub min: f64,
    /// Highest score seen
    pub max: f64,
}

/// Ordered log of scored ticks
#[derive(Debug, Clone, Default)]
pub struct ScoreHistory {
    points: Vec<ScorePoint>,
}

impl ScoreHistory {
    /// Create an empty log
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append one tick
    pub fn append(&mut self, timestamp: Timestamp, score: f64) {
        self.points.push(ScorePoint { timestamp, score });
    }

    /// Number of recorded ticks
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether anything has been recorded
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent point
    pub fn latest(&self) -> Option<ScorePoint> {
        self.points.last().copied()
    }

    /// Iterate the log in append order
    pub fn iter(&self) -> impl Iterator<Item = &ScorePoint> {
        self.points.iter()
    }

    /// Owned copy for consumers outside the evaluation loop
    pub fn snapshot(&self) -> Vec<ScorePoint> {
        self.points.clone()
    }

    /// Aggregate statistics, `None` while empty
    pub fn summary(&self) -> Option<HistorySummary> {
        let latest = self.latest()?;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for point in &self.points {
            min = min.min(point.score);
            max = max.max(point.score);
            sum += point.score;
        }

        Some(HistorySummary {
            count: self.points.len(),
            latest: latest.score,
            mean: sum / self.points.len() as f64,
            min,
            max,
        })
    }
}
