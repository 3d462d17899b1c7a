//! # Steps
//!
//! Step detection on a recorded accelerometer trace.
//!
//! 1. Acceleration magnitude, so the phone's orientation does not matter.
//! 2. Zero-phase Butterworth low-pass (3 Hz, order 4 by default).
//! 3. Adaptive height: `mean + 0.5 * std` of the filtered trace.
//! 4. Local maxima above that height, at least 0.3 s apart; inside a cluster
//!    the tallest peak is the one kept.
//!
//! The threshold is a statistic over the complete trace, so this is an
//! offline detector: the whole recording has to be loaded first.

mod detection;
mod filtering;
mod time_threshold;

use signal::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Accelerometer {
    /// Nanoseconds, non-decreasing over a trace
    pub timestamp: i64,
    /// m/s²
    pub x: f64,
    /// m/s²
    pub y: f64,
    /// m/s²
    pub z: f64,
}

impl Accelerometer {
    #[inline]
    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepEvent {
    pub sample_index: usize,
    /// Nanoseconds, as recorded
    pub timestamp: i64,
    /// Time since the first sample of the trace
    pub elapsed: time::Duration,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StepConfig {
    /// Low-pass cutoff applied to the magnitude
    pub cutoff_hz: f64,
    pub order: usize,
    /// Multiplier of the standard deviation added to the mean for the peak height
    pub threshold_std_factor: f64,
    /// Refractory period between two steps, in seconds
    pub min_step_interval_s: f64,
    /// Samples in the moving average of [`StepDetection::smoothed_magnitude`]
    pub smoothing_window: usize,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            cutoff_hz: 3.0,
            order: 4,
            threshold_std_factor: 0.5,
            min_step_interval_s: 0.3,
            smoothing_window: 10,
        }
    }
}

impl StepConfig {
    /// Refractory period in whole samples, truncated.
    pub fn min_distance_samples(&self, sampling_rate_hz: f64) -> Result<usize> {
        if !self.min_step_interval_s.is_finite() || self.min_step_interval_s <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "minimum step interval must be positive, got {} s",
                self.min_step_interval_s
            )));
        }

        let samples = (self.min_step_interval_s * sampling_rate_hz) as usize;

        if samples < 1 {
            return Err(Error::InvalidConfig(format!(
                "minimum step interval of {} s is shorter than one sample at {sampling_rate_hz} Hz",
                self.min_step_interval_s
            )));
        }

        Ok(samples)
    }
}

/// Everything the step analysis produced, for reporting and plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDetection {
    pub events: Vec<StepEvent>,
    pub raw_magnitude: Vec<f64>,
    /// Moving average of the raw magnitude, for comparison only
    pub smoothed_magnitude: Vec<f64>,
    pub filtered_magnitude: Vec<f64>,
    pub sampling_rate_hz: f64,
    /// Peak height a step had to reach
    pub threshold: f64,
    pub min_distance_samples: usize,
}

impl StepDetection {
    pub fn step_count(&self) -> usize {
        self.events.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StepDetector {
    config: StepConfig,
}

impl StepDetector {
    pub fn new(config: StepConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StepConfig {
        &self.config
    }

    pub fn detect(&self, input: &[Accelerometer]) -> Result<StepDetection> {
        if !self.config.threshold_std_factor.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "threshold factor must be finite, got {}",
                self.config.threshold_std_factor
            )));
        }

        let timestamps = input.iter().map(|this| this.timestamp).collect::<Vec<_>>();

        let sampling_rate_hz = signal::sampling_rate(&timestamps)?;
        let min_distance_samples = self.config.min_distance_samples(sampling_rate_hz)?;

        let raw_magnitude = filtering::magnitude(input);
        let smoothed_magnitude = filtering::smoothing(&raw_magnitude, &self.config)?;
        let filtered_magnitude =
            filtering::filtering(&raw_magnitude, &self.config, sampling_rate_hz)?;

        let threshold = detection::threshold(&filtered_magnitude, self.config.threshold_std_factor);

        tracing::debug!(
            sampling_rate_hz,
            threshold,
            min_distance_samples,
            "step detection parameters"
        );

        let peaks = find_peaks(&filtered_magnitude, threshold, min_distance_samples);

        let events = peaks
            .into_iter()
            .map(|sample_index| {
                tracing::trace!(sample_index, "step");

                StepEvent {
                    sample_index,
                    timestamp: timestamps[sample_index],
                    elapsed: time::Duration::nanoseconds(
                        timestamps[sample_index] - timestamps[0],
                    ),
                }
            })
            .collect::<Vec<_>>();

        if events.is_empty() {
            tracing::warn!(samples = input.len(), "no step crossed the adaptive threshold");
        } else {
            tracing::info!(steps = events.len(), sampling_rate_hz, "step detection finished");
        }

        Ok(StepDetection {
            events,
            raw_magnitude,
            smoothed_magnitude,
            filtered_magnitude,
            sampling_rate_hz,
            threshold,
            min_distance_samples,
        })
    }
}

/// Local maxima of `input` reaching `min_height`, no two closer than
/// `min_distance` samples, in increasing index order.
pub fn find_peaks(input: &[f64], min_height: f64, min_distance: usize) -> Vec<usize> {
    let peaks = detection::detection(input, min_height);
    time_threshold::time_threshold(input, peaks, min_distance)
}

/// Detect steps with the default configuration.
pub fn detect_steps(input: &[Accelerometer]) -> Result<StepDetection> {
    StepDetector::default().detect(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE_HZ: f64 = 50.0;
    const PERIOD_NS: i64 = 20_000_000;

    /// Standing still with a bump of vertical acceleration every `spacing_s`.
    fn walking(steps: usize, spacing_s: f64) -> Vec<Accelerometer> {
        let duration_s = spacing_s * (steps + 1) as f64;
        let len = (duration_s * RATE_HZ) as usize;

        (0..len)
            .map(|i| {
                let t = i as f64 / RATE_HZ;
                let bumps = (1..=steps)
                    .map(|k| {
                        let centre = k as f64 * spacing_s;
                        3.0 * (-0.5 * ((t - centre) / 0.08).powi(2)).exp()
                    })
                    .sum::<f64>();

                Accelerometer {
                    timestamp: i as i64 * PERIOD_NS,
                    x: 0.2,
                    y: 0.1,
                    z: 9.81 + bumps,
                }
            })
            .collect()
    }

    #[test]
    fn magnitude() {
        let sample = Accelerometer {
            timestamp: 0,
            x: 3.0,
            y: 4.0,
            z: 12.0,
        };

        assert_eq!(sample.magnitude(), 13.0);
    }

    #[test]
    fn detects_every_step() {
        let detection = detect_steps(&walking(10, 1.0)).unwrap();

        assert_eq!(detection.step_count(), 10);
        assert_eq!(detection.min_distance_samples, 15);
        assert!((detection.sampling_rate_hz - RATE_HZ).abs() < 1e-9);

        for (k, event) in detection.events.iter().enumerate() {
            let expected = (k + 1) * 50;
            assert!(event.sample_index.abs_diff(expected) <= 1, "{event:?}");
            assert_eq!(event.timestamp, event.sample_index as i64 * PERIOD_NS);
            assert_eq!(
                event.elapsed,
                time::Duration::nanoseconds(event.sample_index as i64 * PERIOD_NS)
            );
        }
    }

    #[test]
    fn events_are_ordered_and_spaced() {
        let detection = detect_steps(&walking(12, 0.5)).unwrap();

        assert_eq!(detection.step_count(), 12);
        for pair in detection.events.windows(2) {
            assert!(pair[1].sample_index - pair[0].sample_index >= detection.min_distance_samples);
        }
    }

    #[test]
    fn traces_keep_sample_alignment() {
        let input = walking(3, 1.0);
        let detection = detect_steps(&input).unwrap();

        assert_eq!(detection.raw_magnitude.len(), input.len());
        assert_eq!(detection.smoothed_magnitude.len(), input.len());
        assert_eq!(detection.filtered_magnitude.len(), input.len());
    }

    #[test]
    fn stricter_threshold_keeps_only_tall_steps() {
        let mut input = walking(4, 1.0);
        // halve the first two bumps
        for sample in input.iter_mut().take(125) {
            sample.z = 9.81 + (sample.z - 9.81) * 0.5;
        }

        let relaxed = detect_steps(&input).unwrap();
        let strict = StepDetector::new(StepConfig {
            threshold_std_factor: 2.0,
            ..StepConfig::default()
        })
        .detect(&input)
        .unwrap();

        assert_eq!(relaxed.step_count(), 4);
        assert_eq!(strict.step_count(), 2);
        assert!(strict.events.iter().all(|event| event.sample_index > 125));
    }

    #[test]
    fn refractory_period_merges_close_bumps() {
        // two bumps 0.2 s apart are a single step under a 0.3 s refractory period
        let peaks = find_peaks(
            &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0],
            0.5,
            15,
        );

        assert_eq!(peaks, vec![11]);
    }

    #[test]
    fn smoothed_magnitude_does_not_change_steps() {
        let input = walking(5, 1.0);

        let default = detect_steps(&input).unwrap();
        let wide = StepDetector::new(StepConfig {
            smoothing_window: 25,
            ..StepConfig::default()
        })
        .detect(&input)
        .unwrap();

        assert_eq!(default.events, wide.events);
        assert_ne!(default.smoothed_magnitude, wide.smoothed_magnitude);

        // away from the edges a still phone averages to its own magnitude
        let still = input[10].magnitude();
        assert!((default.smoothed_magnitude[10] - still).abs() < 1e-9);
    }

    #[test]
    fn rejects_empty_smoothing_window() {
        let detector = StepDetector::new(StepConfig {
            smoothing_window: 0,
            ..StepConfig::default()
        });

        assert!(matches!(
            detector.detect(&walking(2, 1.0)),
            Err(Error::InvalidFilter { .. })
        ));
    }

    #[test]
    fn too_few_samples() {
        let err = detect_steps(&walking(1, 1.0)[..1]).unwrap_err();

        assert_eq!(
            err,
            Error::InsufficientSamples {
                required: 2,
                available: 1
            }
        );
    }

    #[test]
    fn too_short_for_filter() {
        let err = detect_steps(&walking(1, 1.0)[..10]).unwrap_err();

        assert!(matches!(err, Error::TooShort { .. }));
    }

    #[test]
    fn duplicate_timestamps() {
        let mut input = walking(2, 1.0);
        input[7].timestamp = input[6].timestamp;

        assert_eq!(
            detect_steps(&input).unwrap_err(),
            Error::DegenerateTiming { index: 7 }
        );
    }

    #[test]
    fn refractory_shorter_than_a_sample() {
        let input = (0..40)
            .map(|i| Accelerometer {
                timestamp: i * 500_000_000,
                x: 0.0,
                y: 0.0,
                z: 9.81,
            })
            .collect::<Vec<_>>();

        assert!(matches!(
            detect_steps(&input).unwrap_err(),
            Error::InvalidConfig(_)
        ));
    }
}
