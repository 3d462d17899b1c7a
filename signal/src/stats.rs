use crate::{Error, NANOS_PER_SECOND, Result, integrate::time_step};

/// Arithmetic mean, `0.0` for an empty trace.
pub fn mean(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }

    signal.iter().sum::<f64>() / signal.len() as f64
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn std_dev(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }

    let mean = mean(signal);

    (signal.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / signal.len() as f64).sqrt()
}

/// Sampling rate in Hz from the mean interval between nanosecond timestamps.
///
/// Every interval has to be positive: a duplicated or out of order timestamp
/// is reported rather than averaged away.
pub fn sampling_rate(timestamps: &[i64]) -> Result<f64> {
    if timestamps.len() < 2 {
        return Err(Error::InsufficientSamples {
            required: 2,
            available: timestamps.len(),
        });
    }

    for (index, pair) in timestamps.windows(2).enumerate() {
        time_step(pair[0], pair[1], index + 1)?;
    }

    let (first, last) = (timestamps[0], timestamps[timestamps.len() - 1]);
    let mean_interval = (last - first) as f64 / (timestamps.len() - 1) as f64 / NANOS_PER_SECOND;

    Ok(1.0 / mean_interval)
}
