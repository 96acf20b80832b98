//! IMU sample types
//!
//! A [`Sample`] is one synchronized readout of the six motion channels:
//! three accelerometer axes (m/s²) and three gyroscope axes (°/s). Samples
//! carry no timestamp of their own; arrival order at the evaluation loop is
//! the timeline.

/// One motion channel of the IMU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum Axis {
    /// Accelerometer X
    AccelX = 0,
    /// Accelerometer Y
    AccelY = 1,
    /// Accelerometer Z
    AccelZ = 2,
    /// Gyroscope X
    GyroX = 3,
    /// Gyroscope Y
    GyroY = 4,
    /// Gyroscope Z
    GyroZ = 5,
}

impl Axis {
    /// All six channels, in readout order
    pub const ALL: [Axis; 6] = [
        Axis::AccelX,
        Axis::AccelY,
        Axis::AccelZ,
        Axis::GyroX,
        Axis::GyroY,
        Axis::GyroZ,
    ];

    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Axis::AccelX => "accel_x",
            Axis::AccelY => "accel_y",
            Axis::AccelZ => "accel_z",
            Axis::GyroX => "gyro_x",
            Axis::GyroY => "gyro_y",
            Axis::GyroZ => "gyro_z",
        }
    }

    /// Get unit of measurement
    pub const fn unit(&self) -> &'static str {
        match self {
            Axis::AccelX | Axis::AccelY | Axis::AccelZ => "m/s²",
            Axis::GyroX | Axis::GyroY | Axis::GyroZ => "°/s",
        }
    }
}

/// One synchronized six-channel IMU readout
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Accelerometer X/Y/Z in m/s²
    pub accel: [f32; 3],
    /// Gyroscope X/Y/Z in °/s
    pub gyro: [f32; 3],
}

impl Sample {
    /// Create a sample from accelerometer and gyroscope triples
    pub const fn new(accel: [f32; 3], gyro: [f32; 3]) -> Self {
        Self { accel, gyro }
    }

    /// Fetch the scalar reading for one channel
    pub const fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::AccelX => self.accel[0],
            Axis::AccelY => self.accel[1],
            Axis::AccelZ => self.accel[2],
            Axis::GyroX => self.gyro[0],
            Axis::GyroY => self.gyro[1],
            Axis::GyroZ => self.gyro[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_accessor_matches_layout() {
        let sample = Sample::new([1.0, 2.0, 3.0], [4.0, 5.0, 6.0]);

        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(sample.axis(*axis), (i + 1) as f32);
        }
    }

    #[test]
    fn axis_names_unique() {
        for a in Axis::ALL {
            for b in Axis::ALL {
                if a != b {
                    assert_ne!(a.name(), b.name());
                }
            }
        }
    }
}
