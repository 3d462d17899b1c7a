//! # Trajectory
//!
//! Dead-reckoned 2-D path: the step detector decides *when* to move, the
//! integrated yaw rate decides *which way*.
//!
//! Frame is x = East, y = North, headings in degrees counted from East, so
//! the default initial heading of 90° faces North. For every step:
//!
//! ```notrust
//! heading = initial_heading + cumulative_angle[step]
//! x += step_length * cos(heading)
//! y += step_length * sin(heading)
//! ```
//!
//! The heading is read from the continuous integrated angle at the step's
//! sample, not from the discrete turn events, so any drift between turns
//! ends up in the path as well.

use signal::{Error, Result};
use steps::{Accelerometer, StepConfig, StepDetection, StepDetector, StepEvent};
use turns::{Gyroscope, TurnConfig, TurnDetection, TurnDetector};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryPoint {
    /// Metres East of the start
    pub x: f64,
    /// Metres North of the start
    pub y: f64,
}

impl TrajectoryPoint {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn distance_from_origin(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrajectoryConfig {
    /// Fixed stride, metres
    pub step_length_m: f64,
    /// Facing direction at the first sample, degrees from East
    pub initial_heading_deg: f64,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            step_length_m: 1.0,
            initial_heading_deg: 90.0,
        }
    }
}

/// Accumulate one displacement per step, starting from the origin.
///
/// The result always holds `steps.len() + 1` points.
pub fn reconstruct(
    steps: &[StepEvent],
    cumulative_angle_deg: &[f64],
    config: &TrajectoryConfig,
) -> Result<Vec<TrajectoryPoint>> {
    let mut position = TrajectoryPoint::ORIGIN;
    let mut points = Vec::with_capacity(steps.len() + 1);
    points.push(position);

    for step in steps {
        let angle = cumulative_angle_deg
            .get(step.sample_index)
            .ok_or(Error::LengthMismatch {
                expected: step.sample_index + 1,
                actual: cumulative_angle_deg.len(),
            })?;

        let heading = (config.initial_heading_deg + angle).to_radians();

        position.x += config.step_length_m * heading.cos();
        position.y += config.step_length_m * heading.sin();

        points.push(position);
    }

    Ok(points)
}

/// One sample of a combined accelerometer and gyroscope recording.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImuSample {
    pub timestamp: i64,
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_z: f64,
}

impl From<ImuSample> for Accelerometer {
    fn from(
        ImuSample {
            timestamp,
            accel_x,
            accel_y,
            accel_z,
            ..
        }: ImuSample,
    ) -> Self {
        Self {
            timestamp,
            x: accel_x,
            y: accel_y,
            z: accel_z,
        }
    }
}

impl From<ImuSample> for Gyroscope {
    fn from(ImuSample { timestamp, gyro_z, .. }: ImuSample) -> Self {
        Self {
            timestamp,
            z: gyro_z,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WalkConfig {
    pub steps: StepConfig,
    pub turns: TurnConfig,
    pub trajectory: TrajectoryConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryReport {
    pub points: Vec<TrajectoryPoint>,
    pub steps: StepDetection,
    pub turns: TurnDetection,
}

impl TrajectoryReport {
    pub fn step_count(&self) -> usize {
        self.steps.step_count()
    }

    pub fn final_position(&self) -> TrajectoryPoint {
        self.points.last().copied().unwrap_or(TrajectoryPoint::ORIGIN)
    }

    pub fn distance_from_origin(&self) -> f64 {
        self.final_position().distance_from_origin()
    }
}

/// Full dead-reckoning run over a walking-and-turning recording.
pub fn walk(input: &[ImuSample], config: &WalkConfig) -> Result<TrajectoryReport> {
    let accelerometer = input.iter().copied().map(Accelerometer::from).collect::<Vec<_>>();
    let gyroscope = input.iter().copied().map(Gyroscope::from).collect::<Vec<_>>();

    let steps = StepDetector::new(config.steps.clone()).detect(&accelerometer)?;
    let turns = TurnDetector::new(config.turns.clone()).detect(&gyroscope)?;

    let points = reconstruct(&steps.events, &turns.cumulative_angle_deg, &config.trajectory)?;

    let report = TrajectoryReport {
        points,
        steps,
        turns,
    };

    let end = report.final_position();
    tracing::info!(
        steps = report.step_count(),
        x = end.x,
        y = end.y,
        "trajectory reconstructed"
    );

    Ok(report)
}
