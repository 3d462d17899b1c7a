use crate::{Accelerometer, StepConfig};

/// Orientation independent acceleration: `sqrt(x² + y² + z²)` per sample.
pub(crate) fn magnitude(input: &[Accelerometer]) -> Vec<f64> {
    input.iter().map(Accelerometer::magnitude).collect()
}

pub(crate) fn filtering(
    magnitude: &[f64],
    config: &StepConfig,
    sampling_rate_hz: f64,
) -> signal::Result<Vec<f64>> {
    signal::zero_phase_low_pass(magnitude, config.cutoff_hz, sampling_rate_hz, config.order)
}

/// Moving-average view of the magnitude, kept for plotting next to the
/// low-pass output. Peaks are never searched in it.
pub(crate) fn smoothing(magnitude: &[f64], config: &StepConfig) -> signal::Result<Vec<f64>> {
    signal::moving_average(magnitude, config.smoothing_window)
}
