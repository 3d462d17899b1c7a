//! Summaries and table rows of the four analyses.
//!
//! Summaries print the way the console report reads; rows are what the CSV
//! exports contain.

use std::fmt;

use acceleration::IntegrationReport;
use serde::Serialize;
use steps::StepDetection;
use trajectory::TrajectoryReport;
use turns::{TurnDetection, TurnDirection};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccelerationSummary {
    pub final_distance_m: f64,
    pub noisy_final_distance_m: f64,
    pub difference_m: f64,
    pub percentage_error: Option<f64>,
}

impl From<&IntegrationReport> for AccelerationSummary {
    fn from(report: &IntegrationReport) -> Self {
        Self {
            final_distance_m: report.final_distance(),
            noisy_final_distance_m: report.noisy_final_distance(),
            difference_m: report.difference(),
            percentage_error: report.percentage_error(),
        }
    }
}

impl fmt::Display for AccelerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Final distance using actual acceleration: {:.4} m",
            self.final_distance_m
        )?;
        writeln!(
            f,
            "Final distance using noisy acceleration: {:.4} m",
            self.noisy_final_distance_m
        )?;
        writeln!(f, "Difference between estimates: {:.4} m", self.difference_m)?;

        match self.percentage_error {
            Some(percentage) => write!(f, "Percentage error: {percentage:.2}%"),
            None => write!(f, "Percentage error: undefined (no distance travelled)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSummary {
    pub step_count: usize,
    pub sampling_rate_hz: f64,
    pub threshold: f64,
    pub min_distance_samples: usize,
}

impl From<&StepDetection> for StepSummary {
    fn from(detection: &StepDetection) -> Self {
        Self {
            step_count: detection.step_count(),
            sampling_rate_hz: detection.sampling_rate_hz,
            threshold: detection.threshold,
            min_distance_samples: detection.min_distance_samples,
        }
    }
}

impl fmt::Display for StepSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Detected {} steps", self.step_count)?;
        write!(f, "Sampling rate: {:.2} Hz", self.sampling_rate_hz)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnRow {
    pub turn: usize,
    pub sample_index: usize,
    pub elapsed_s: f64,
    pub direction: TurnDirection,
    pub angle_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnSummary {
    pub sampling_rate_hz: f64,
    pub clockwise: usize,
    pub counter_clockwise: usize,
    pub turns: Vec<TurnRow>,
}

impl TurnSummary {
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }
}

impl From<&TurnDetection> for TurnSummary {
    fn from(detection: &TurnDetection) -> Self {
        Self {
            sampling_rate_hz: detection.sampling_rate_hz,
            clockwise: detection.clockwise_count(),
            counter_clockwise: detection.counter_clockwise_count(),
            turns: turn_rows(detection),
        }
    }
}

impl fmt::Display for TurnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sampling rate: {:.2} Hz", self.sampling_rate_hz)?;
        write!(f, "Detected {} turns:", self.turn_count())?;

        for row in &self.turns {
            write!(
                f,
                "\n  Turn {}: {}, angle = {:.1}°, time = {:.2}s",
                row.turn, row.direction, row.angle_degrees, row.elapsed_s
            )?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectorySummary {
    pub step_count: usize,
    pub sampling_rate_hz: f64,
    pub final_x_m: f64,
    pub final_y_m: f64,
    pub distance_from_origin_m: f64,
}

impl From<&TrajectoryReport> for TrajectorySummary {
    fn from(report: &TrajectoryReport) -> Self {
        let end = report.final_position();

        Self {
            step_count: report.step_count(),
            sampling_rate_hz: report.steps.sampling_rate_hz,
            final_x_m: end.x,
            final_y_m: end.y,
            distance_from_origin_m: end.distance_from_origin(),
        }
    }
}

impl fmt::Display for TrajectorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Detected {} steps", self.step_count)?;
        writeln!(f, "Sampling rate: {:.2} Hz", self.sampling_rate_hz)?;
        write!(
            f,
            "Final position: ({:.2}, {:.2}) meters",
            self.final_x_m, self.final_y_m
        )
    }
}

/// All four summaries, as written to `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub acceleration: AccelerationSummary,
    pub steps: StepSummary,
    pub turns: TurnSummary,
    pub trajectory: TrajectorySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationRow {
    pub timestamp: f64,
    pub acceleration: f64,
    pub noisy_acceleration: f64,
    pub velocity: f64,
    pub noisy_velocity: f64,
    pub distance: f64,
    pub noisy_distance: f64,
}

pub fn integration_rows(report: &IntegrationReport) -> Vec<IntegrationRow> {
    (0..report.timestamps.len())
        .map(|i| IntegrationRow {
            timestamp: report.timestamps[i],
            acceleration: report.actual_acceleration[i],
            noisy_acceleration: report.noisy_acceleration[i],
            velocity: report.velocity[i],
            noisy_velocity: report.noisy_velocity[i],
            distance: report.distance[i],
            noisy_distance: report.noisy_distance[i],
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRow {
    pub step: usize,
    pub sample_index: usize,
    pub timestamp: i64,
    pub elapsed_s: f64,
    pub filtered_magnitude: f64,
}

pub fn step_rows(detection: &StepDetection) -> Vec<StepRow> {
    detection
        .events
        .iter()
        .enumerate()
        .map(|(i, event)| StepRow {
            step: i + 1,
            sample_index: event.sample_index,
            timestamp: event.timestamp,
            elapsed_s: event.elapsed.as_seconds_f64(),
            filtered_magnitude: detection.filtered_magnitude[event.sample_index],
        })
        .collect()
}

pub fn turn_rows(detection: &TurnDetection) -> Vec<TurnRow> {
    detection
        .events
        .iter()
        .enumerate()
        .map(|(i, event)| TurnRow {
            turn: i + 1,
            sample_index: event.sample_index,
            elapsed_s: event.elapsed.as_seconds_f64(),
            direction: event.direction,
            angle_degrees: event.angle_degrees,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointRow {
    /// 0 is the starting point
    pub step: usize,
    pub x: f64,
    pub y: f64,
}

pub fn point_rows(report: &TrajectoryReport) -> Vec<PointRow> {
    report
        .points
        .iter()
        .enumerate()
        .map(|(step, point)| PointRow {
            step,
            x: point.x,
            y: point.y,
        })
        .collect()
}
