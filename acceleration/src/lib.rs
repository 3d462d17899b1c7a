//! # Acceleration
//!
//! How far does sensor noise push a dead-reckoned distance?
//!
//! A clean and a noisy acceleration channel of the same motion are both
//! integrated twice with the left-rectangle rule and a fixed time step:
//!
//! ```notrust
//! v[i] = v[i - 1] + a[i - 1] * dt
//! d[i] = d[i - 1] + v[i - 1] * dt
//! ```
//!
//! and the final distances are compared. Noise integrated twice grows
//! quadratically, so even a small bias shows up as metres of error.

use signal::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub struct AccelerationSample {
    /// Seconds
    pub timestamp: f64,
    /// Clean acceleration, m/s²
    pub acceleration: f64,
    /// Same motion as measured by a noisy sensor, m/s²
    #[cfg_attr(feature = "serde", serde(rename = "noisyacceleration"))]
    pub noisy_acceleration: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationReport {
    pub timestamps: Vec<f64>,
    pub actual_acceleration: Vec<f64>,
    pub noisy_acceleration: Vec<f64>,
    pub velocity: Vec<f64>,
    pub noisy_velocity: Vec<f64>,
    pub distance: Vec<f64>,
    pub noisy_distance: Vec<f64>,
}

impl IntegrationReport {
    pub fn final_distance(&self) -> f64 {
        self.distance.last().copied().unwrap_or_default()
    }

    pub fn noisy_final_distance(&self) -> f64 {
        self.noisy_distance.last().copied().unwrap_or_default()
    }

    /// Absolute gap between the two final distances.
    pub fn difference(&self) -> f64 {
        (self.final_distance() - self.noisy_final_distance()).abs()
    }

    /// [`Self::difference`] relative to the clean distance, in percent.
    /// `None` when the clean distance is zero.
    pub fn percentage_error(&self) -> Option<f64> {
        let actual = self.final_distance();

        if actual == 0.0 {
            return None;
        }

        Some(self.difference() / actual * 100.0)
    }
}

/// Double-integrate both channels.
///
/// The time step is taken once, from the first two samples, and used for the
/// whole trace: the recording is assumed to be regularly sampled. Every
/// timestamp still has to be strictly after the previous one.
pub fn analyze(input: &[AccelerationSample]) -> Result<IntegrationReport> {
    if input.len() < 2 {
        return Err(Error::InsufficientSamples {
            required: 2,
            available: input.len(),
        });
    }

    if let Some(index) = input
        .windows(2)
        .position(|pair| pair[1].timestamp <= pair[0].timestamp)
    {
        return Err(Error::DegenerateTiming { index: index + 1 });
    }

    let dt = input[1].timestamp - input[0].timestamp;

    let timestamps = input.iter().map(|this| this.timestamp).collect::<Vec<_>>();
    let actual_acceleration = input.iter().map(|this| this.acceleration).collect::<Vec<_>>();
    let noisy_acceleration = input
        .iter()
        .map(|this| this.noisy_acceleration)
        .collect::<Vec<_>>();

    let velocity = signal::integrate_fixed(&actual_acceleration, dt)?;
    let noisy_velocity = signal::integrate_fixed(&noisy_acceleration, dt)?;
    let distance = signal::integrate_fixed(&velocity, dt)?;
    let noisy_distance = signal::integrate_fixed(&noisy_velocity, dt)?;

    let report = IntegrationReport {
        timestamps,
        actual_acceleration,
        noisy_acceleration,
        velocity,
        noisy_velocity,
        distance,
        noisy_distance,
    };

    tracing::info!(
        dt,
        final_distance = report.final_distance(),
        noisy_final_distance = report.noisy_final_distance(),
        "integrated acceleration"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    fn samples(clean: &[f64], noisy: &[f64], dt: f64) -> Vec<AccelerationSample> {
        clean
            .iter()
            .zip(noisy)
            .enumerate()
            .map(|(i, (&acceleration, &noisy_acceleration))| AccelerationSample {
                timestamp: i as f64 * dt,
                acceleration,
                noisy_acceleration,
            })
            .collect()
    }

    #[test]
    fn constant_acceleration_closed_form() {
        let n = 101;
        let dt = 0.1;
        let report = analyze(&samples(&vec![1.5; n], &vec![1.5; n], dt)).unwrap();

        for i in 0..n {
            let i_f = i as f64;
            assert_abs_diff_eq!(report.velocity[i], 1.5 * i_f * dt, epsilon = 1e-9);
            assert_abs_diff_eq!(
                report.distance[i],
                1.5 * dt * dt * i_f * (i_f - 1.0) / 2.0,
                epsilon = 1e-9
            );
        }

        assert_eq!(report.difference(), 0.0);
        assert_eq!(report.percentage_error(), Some(0.0));
    }

    #[test]
    fn constant_bias_grows_quadratically() {
        let n = 11;
        let report = analyze(&samples(&vec![1.0; n], &vec![1.2; n], 1.0)).unwrap();

        // d[10] = a * 10 * 9 / 2
        assert_abs_diff_eq!(report.final_distance(), 45.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.noisy_final_distance(), 54.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.difference(), 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.percentage_error().unwrap(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn traces_keep_sample_alignment() {
        let report = analyze(&samples(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], 0.5)).unwrap();

        assert_eq!(report.timestamps, vec![0.0, 0.5, 1.0]);
        assert_eq!(report.velocity.len(), 3);
        assert_eq!(report.noisy_distance.len(), 3);
    }

    #[test]
    fn standing_still_has_no_percentage() {
        let report = analyze(&samples(&[0.0; 5], &[0.1; 5], 0.1)).unwrap();

        assert_eq!(report.final_distance(), 0.0);
        assert_eq!(report.percentage_error(), None);
    }

    #[test]
    fn needs_two_samples() {
        assert_eq!(
            analyze(&samples(&[1.0], &[1.0], 0.1)).unwrap_err(),
            Error::InsufficientSamples {
                required: 2,
                available: 1
            }
        );
    }

    #[test]
    fn rejects_repeated_first_timestamp() {
        let mut input = samples(&[1.0; 4], &[1.0; 4], 0.1);
        input[1].timestamp = input[0].timestamp;

        assert!(matches!(
            analyze(&input).unwrap_err(),
            Error::DegenerateTiming { .. }
        ));
    }

    #[test]
    fn rejects_later_backwards_timestamp() {
        let mut input = samples(&[1.0; 6], &[1.0; 6], 0.1);
        input[3].timestamp = 0.05;

        assert_eq!(
            analyze(&input).unwrap_err(),
            Error::DegenerateTiming { index: 3 }
        );
    }

    #[test]
    fn rejects_later_repeated_timestamp() {
        let mut input = samples(&[1.0; 6], &[1.0; 6], 0.1);
        input[5].timestamp = input[4].timestamp;

        assert_eq!(
            analyze(&input).unwrap_err(),
            Error::DegenerateTiming { index: 5 }
        );
    }
}
