//! # Turns
//!
//! Detection of right-angle turns from the yaw rate (`gyro_z`).
//!
//! Turning is much slower than stepping, so the angular velocity is smoothed
//! with a lower cutoff (1 Hz) than the step detector uses, then integrated
//! into a cumulative heading:
//!
//! ```notrust
//! heading[i] = heading[i - 1] + filtered[i - 1] * dt[i - 1]
//! ```
//!
//! A turn is reported whenever the heading has moved 85° or more away from
//! the heading at the previous turn (see [`scan`]). 85° rather than 90° leaves
//! room for sensor noise and filter residue.

pub mod scan;

use signal::{Error, Result};

pub use self::scan::{Crossing, TurnDirection, TurnScan, scan_turns};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gyroscope {
    /// Nanoseconds, non-decreasing over a trace
    pub timestamp: i64,
    /// Yaw rate in rad/s
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnEvent {
    pub sample_index: usize,
    /// Nanoseconds, as recorded
    pub timestamp: i64,
    /// Time since the first sample of the trace
    pub elapsed: time::Duration,
    /// Heading change since the previous turn
    pub angle_degrees: f64,
    pub direction: TurnDirection,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurnConfig {
    /// Low-pass cutoff applied to the yaw rate
    pub cutoff_hz: f64,
    pub order: usize,
    pub threshold_degrees: f64,
    /// Minimum time between two turns, in seconds
    pub min_turn_interval_s: f64,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            cutoff_hz: 1.0,
            order: 4,
            threshold_degrees: 85.0,
            min_turn_interval_s: 0.5,
        }
    }
}

impl TurnConfig {
    fn validate(&self) -> Result<()> {
        if !self.threshold_degrees.is_finite() || self.threshold_degrees <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "turn threshold must be positive, got {}°",
                self.threshold_degrees
            )));
        }

        if !self.min_turn_interval_s.is_finite() || self.min_turn_interval_s < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "minimum turn interval must not be negative, got {} s",
                self.min_turn_interval_s
            )));
        }

        Ok(())
    }
}

/// Smoothed yaw rate and the heading integrated from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub filtered_gyro: Vec<f64>,
    pub cumulative_angle_deg: Vec<f64>,
    pub sampling_rate_hz: f64,
}

/// Filter the yaw rate and integrate it into degrees of heading change since
/// the first sample.
pub fn heading(input: &[Gyroscope], config: &TurnConfig) -> Result<Heading> {
    let timestamps = input.iter().map(|this| this.timestamp).collect::<Vec<_>>();
    let raw = input.iter().map(|this| this.z).collect::<Vec<_>>();

    let sampling_rate_hz = signal::sampling_rate(&timestamps)?;

    let filtered_gyro =
        signal::zero_phase_low_pass(&raw, config.cutoff_hz, sampling_rate_hz, config.order)?;

    let cumulative_angle_deg = signal::integrate(&filtered_gyro, &timestamps)?
        .into_iter()
        .map(f64::to_degrees)
        .collect::<Vec<_>>();

    tracing::debug!(
        sampling_rate_hz,
        final_heading_deg = cumulative_angle_deg.last().copied().unwrap_or_default(),
        "integrated heading"
    );

    Ok(Heading {
        filtered_gyro,
        cumulative_angle_deg,
        sampling_rate_hz,
    })
}

/// Everything the turn analysis produced, for reporting and plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnDetection {
    pub events: Vec<TurnEvent>,
    pub raw_gyro: Vec<f64>,
    pub filtered_gyro: Vec<f64>,
    pub cumulative_angle_deg: Vec<f64>,
    pub sampling_rate_hz: f64,
}

impl TurnDetection {
    pub fn turn_count(&self) -> usize {
        self.events.len()
    }

    pub fn clockwise_count(&self) -> usize {
        self.count(TurnDirection::Clockwise)
    }

    pub fn counter_clockwise_count(&self) -> usize {
        self.count(TurnDirection::CounterClockwise)
    }

    fn count(&self, direction: TurnDirection) -> usize {
        self.events
            .iter()
            .filter(|this| this.direction == direction)
            .count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TurnDetector {
    config: TurnConfig,
}

impl TurnDetector {
    pub fn new(config: TurnConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TurnConfig {
        &self.config
    }

    pub fn detect(&self, input: &[Gyroscope]) -> Result<TurnDetection> {
        self.config.validate()?;

        let Heading {
            filtered_gyro,
            cumulative_angle_deg,
            sampling_rate_hz,
        } = heading(input, &self.config)?;

        let min_spacing_samples = self.config.min_turn_interval_s * sampling_rate_hz;

        let events = scan_turns(
            &cumulative_angle_deg,
            self.config.threshold_degrees,
            min_spacing_samples,
        )
        .into_iter()
        .map(
            |Crossing {
                 index,
                 angle_degrees,
                 direction,
             }| {
                tracing::trace!(index, angle_degrees, %direction, "turn");

                TurnEvent {
                    sample_index: index,
                    timestamp: input[index].timestamp,
                    elapsed: time::Duration::nanoseconds(
                        input[index].timestamp - input[0].timestamp,
                    ),
                    angle_degrees,
                    direction,
                }
            },
        )
        .collect::<Vec<_>>();

        if events.is_empty() {
            tracing::warn!(samples = input.len(), "heading never crossed the turn threshold");
        } else {
            tracing::info!(turns = events.len(), sampling_rate_hz, "turn detection finished");
        }

        Ok(TurnDetection {
            events,
            raw_gyro: input.iter().map(|this| this.z).collect(),
            filtered_gyro,
            cumulative_angle_deg,
            sampling_rate_hz,
        })
    }
}

/// Detect turns with the default configuration.
pub fn detect_turns(input: &[Gyroscope]) -> Result<TurnDetection> {
    TurnDetector::default().detect(input)
}
