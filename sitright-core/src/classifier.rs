//! Posture classification against per-axis reference ranges
//!
//! The classifier is a pure function from a [`Sample`] to the set of axes
//! whose readings fall strictly outside their configured closed range. Any
//! fault classifies the sample as bad posture; an empty fault list is good
//! posture.
//!
//! Bounds are inclusive: a reading exactly equal to a limit is in range.
//! Non-finite readings (NaN, ±inf) can never satisfy a closed range and
//! classify as faults on their axis.

use heapless::Vec;

use crate::{
    constants::posture,
    sample::{Axis, Sample},
};

/// Inclusive `[min, max]` bound for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisRange {
    min: f32,
    max: f32,
}

impl AxisRange {
    /// Create a range, swapping inverted bounds
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        Self { min, max }
    }

    /// Lower bound
    pub const fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Whether `value` lies within the closed range
    ///
    /// Non-finite values are always out of range.
    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// One axis reading outside its configured range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostureFault {
    /// Axis that violated its range
    pub axis: Axis,
    /// Observed reading
    pub value: f32,
    /// Configured lower bound
    pub min: f32,
    /// Configured upper bound
    pub max: f32,
}

/// Reference ranges for all six axes
///
/// Immutable at runtime. The default profile is the factory tuning in
/// [`crate::constants::posture`]; deployments with a different mount can
/// override it from device configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PostureProfile {
    /// Accelerometer X bound
    pub accel_x: AxisRange,
    /// Accelerometer Y bound
    pub accel_y: AxisRange,
    /// Accelerometer Z bound
    pub accel_z: AxisRange,
    /// Gyroscope X bound
    pub gyro_x: AxisRange,
    /// Gyroscope Y bound
    pub gyro_y: AxisRange,
    /// Gyroscope Z bound
    pub gyro_z: AxisRange,
}

impl Default for PostureProfile {
    fn default() -> Self {
        Self {
            accel_x: AxisRange::new(posture::ACCEL_X_MIN, posture::ACCEL_X_MAX),
            accel_y: AxisRange::new(posture::ACCEL_Y_MIN, posture::ACCEL_Y_MAX),
            accel_z: AxisRange::new(posture::ACCEL_Z_MIN, posture::ACCEL_Z_MAX),
            gyro_x: AxisRange::new(posture::GYRO_X_MIN, posture::GYRO_X_MAX),
            gyro_y: AxisRange::new(posture::GYRO_Y_MIN, posture::GYRO_Y_MAX),
            gyro_z: AxisRange::new(posture::GYRO_Z_MIN, posture::GYRO_Z_MAX),
        }
    }
}

impl PostureProfile {
    /// Bound for one axis
    pub const fn range(&self, axis: Axis) -> AxisRange {
        match axis {
            Axis::AccelX => self.accel_x,
            Axis::AccelY => self.accel_y,
            Axis::AccelZ => self.accel_z,
            Axis::GyroX => self.gyro_x,
            Axis::GyroY => self.gyro_y,
            Axis::GyroZ => self.gyro_z,
        }
    }
}

/// Pure sample-to-verdict classifier
#[derive(Debug, Clone)]
pub struct PostureClassifier {
    profile: PostureProfile,
}

impl PostureClassifier {
    /// Create a classifier over `profile`
    pub const fn new(profile: PostureProfile) -> Self {
        Self { profile }
    }

    /// The profile this classifier checks against
    pub const fn profile(&self) -> &PostureProfile {
        &self.profile
    }

    /// Collect every out-of-range axis in `sample`
    ///
    /// Empty means good posture. The buffer is bounded by the six axes, no
    /// allocation.
    pub fn classify(&self, sample: &Sample) -> Vec<PostureFault, 6> {
        let mut faults = Vec::new();

        for axis in Axis::ALL {
            let range = self.profile.range(axis);
            let value = sample.axis(axis);
            if !range.contains(value) {
                // Cannot overflow: one slot per axis
                let _ = faults.push(PostureFault {
                    axis,
                    value,
                    min: range.min(),
                    max: range.max(),
                });
            }
        }

        faults
    }

    /// Whether `sample` is bad posture, short-circuiting on the first fault
    pub fn is_bad(&self, sample: &Sample) -> bool {
        Axis::ALL
            .iter()
            .any(|axis| !self.profile.range(*axis).contains(sample.axis(*axis)))
    }
}

impl Default for PostureClassifier {
    fn default() -> Self {
        Self::new(PostureProfile::default())
    }
}
