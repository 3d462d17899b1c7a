//! Cumulative left-rectangle (Euler) integration.
//!
//! ```notrust
//! out[0] = 0
//! out[i] = out[i - 1] + signal[i - 1] * dt[i - 1]
//! ```
//!
//! Each interval is weighted by the value at its left edge. This biases the
//! result (a rising signal is under-estimated) and downstream distances and
//! headings are calibrated against exactly this rule, so it must stay Euler.

use crate::{Error, NANOS_PER_SECOND, Result};

/// Integrate over per-sample time steps taken from nanosecond `timestamps`.
pub fn integrate(signal: &[f64], timestamps: &[i64]) -> Result<Vec<f64>> {
    if signal.len() != timestamps.len() {
        return Err(Error::LengthMismatch {
            expected: timestamps.len(),
            actual: signal.len(),
        });
    }

    if signal.is_empty() {
        return Ok(Vec::new());
    }

    let mut output = Vec::with_capacity(signal.len());
    output.push(0.0);

    for (index, pair) in timestamps.windows(2).enumerate() {
        let dt = time_step(pair[0], pair[1], index + 1)?;
        output.push(output[index] + signal[index] * dt);
    }

    Ok(output)
}

/// Integrate with a constant time step `dt` in seconds.
pub fn integrate_fixed(signal: &[f64], dt: f64) -> Result<Vec<f64>> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::DegenerateTiming { index: 1 });
    }

    if signal.is_empty() {
        return Ok(Vec::new());
    }

    let mut output = Vec::with_capacity(signal.len());
    output.push(0.0);

    for (index, value) in signal.iter().take(signal.len() - 1).enumerate() {
        output.push(output[index] + value * dt);
    }

    Ok(output)
}

/// Seconds between two nanosecond timestamps; `index` names the later one.
pub(crate) fn time_step(from: i64, to: i64, index: usize) -> Result<f64> {
    let dt = to - from;

    if dt <= 0 {
        return Err(Error::DegenerateTiming { index });
    }

    Ok(dt as f64 / NANOS_PER_SECOND)
}
