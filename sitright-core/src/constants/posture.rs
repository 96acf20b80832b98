//! Factory posture reference ranges
//!
//! Inclusive per-axis bounds for the mounted IMU in a good-posture pose.
//! A reading strictly outside any bound classifies the sample as bad
//! posture. Units: accelerometer m/s², gyroscope °/s.

/// Accelerometer X lower bound
pub const ACCEL_X_MIN: f32 = -2.46;
/// Accelerometer X upper bound
pub const ACCEL_X_MAX: f32 = 2.53;

/// Accelerometer Y lower bound
pub const ACCEL_Y_MIN: f32 = -2.32;
/// Accelerometer Y upper bound
pub const ACCEL_Y_MAX: f32 = 2.24;

/// Accelerometer Z lower bound
///
/// Asymmetric: gravity keeps Z positive while seated upright.
pub const ACCEL_Z_MIN: f32 = -2.83;
/// Accelerometer Z upper bound
pub const ACCEL_Z_MAX: f32 = 10.94;

/// Gyroscope X lower bound
pub const GYRO_X_MIN: f32 = -10.48;
/// Gyroscope X upper bound
pub const GYRO_X_MAX: f32 = 10.45;

/// Gyroscope Y lower bound
pub const GYRO_Y_MIN: f32 = -10.24;
/// Gyroscope Y upper bound
pub const GYRO_Y_MAX: f32 = 10.97;

/// Gyroscope Z lower bound
pub const GYRO_Z_MIN: f32 = -10.18;
/// Gyroscope Z upper bound
pub const GYRO_Z_MAX: f32 = 10.86;
