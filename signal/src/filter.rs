//! Butterworth low-pass filtering.
//!
//! The digital filter is obtained from the analog Butterworth prototype:
//!
//! ```notrust
//! p_k = -exp(j * PI * m / 2N),  m = -N+1, -N+3, ..., N-1
//! ```
//!
//! scaled to the pre-warped cutoff `4 * tan(PI * Wn / 2)` and mapped to the
//! z-plane with the bilinear transform (sampling frequency 2, so that the
//! Nyquist frequency is 1 and `Wn = cutoff / nyquist`). All N zeros land on
//! `z = -1`.
//!
//! [`Butterworth::filtfilt`] runs the filter forward and then backward over
//! the reversed output. The phase responses cancel, so peaks stay where they
//! are in time, at the price of squaring the magnitude response and needing
//! the complete trace up front.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::{Error, Result};

/// Transfer function `b(z) / a(z)` of a digital Butterworth low-pass filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Butterworth {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl Butterworth {
    /// Design a low-pass filter.
    ///
    /// # Params
    /// - `order` - filter order, at least 1
    /// - `cutoff_hz` - -3 dB frequency, strictly between 0 and Nyquist
    /// - `sampling_rate_hz` - sampling rate of the trace it will be applied to
    pub fn low_pass(order: usize, cutoff_hz: f64, sampling_rate_hz: f64) -> Result<Self> {
        if order == 0 {
            return Err(Error::InvalidFilter {
                reason: "order must be at least 1".to_owned(),
            });
        }

        if !sampling_rate_hz.is_finite() || sampling_rate_hz <= 0.0 {
            return Err(Error::InvalidFilter {
                reason: format!("sampling rate must be positive, got {sampling_rate_hz} Hz"),
            });
        }

        let nyquist = 0.5 * sampling_rate_hz;

        if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 || cutoff_hz >= nyquist {
            return Err(Error::InvalidFilter {
                reason: format!(
                    "cutoff must lie in (0, {nyquist}) Hz for a {sampling_rate_hz} Hz trace, got {cutoff_hz} Hz"
                ),
            });
        }

        let normal_cutoff = cutoff_hz / nyquist;
        let warped = 4.0 * (PI * normal_cutoff / 2.0).tan();

        let n = order as f64;
        let analog_poles = (0..order)
            .map(|k| {
                let m = 1.0 - n + 2.0 * k as f64;
                -Complex64::from_polar(1.0, PI * m / (2.0 * n)) * warped
            })
            .collect::<Vec<_>>();

        let fs2 = Complex64::new(4.0, 0.0);

        let digital_poles = analog_poles
            .iter()
            .map(|p| (fs2 + p) / (fs2 - p))
            .collect::<Vec<_>>();

        let gain = (Complex64::new(warped.powi(order as i32), 0.0)
            / analog_poles
                .iter()
                .fold(Complex64::new(1.0, 0.0), |acc, p| acc * (fs2 - p)))
        .re;

        let b = binomial_row(order)
            .into_iter()
            .map(|c| c * gain)
            .collect::<Vec<_>>();

        let a = poly(&digital_poles)
            .into_iter()
            .map(|c| c.re)
            .collect::<Vec<_>>();

        tracing::debug!(order, cutoff_hz, sampling_rate_hz, ?b, ?a, "designed Butterworth low-pass");

        Ok(Self { b, a })
    }

    /// Numerator coefficients, highest power of `z` first.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Denominator coefficients, `a[0] == 1`.
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    pub fn order(&self) -> usize {
        self.a.len() - 1
    }

    /// Number of samples mirrored onto each end of the trace before
    /// filtering. A trace must be strictly longer than this.
    pub fn padlen(&self) -> usize {
        3 * self.a.len().max(self.b.len())
    }

    /// Single causal pass (direct form II transposed) starting from state `zi`.
    pub fn lfilter(&self, input: &[f64], zi: &[f64]) -> Vec<f64> {
        let order = self.order();
        let mut z = zi.to_vec();
        z.resize(order, 0.0);

        input
            .iter()
            .map(|&x| {
                let y = self.b[0] * x + z[0];

                for i in 0..order - 1 {
                    z[i] = self.b[i + 1] * x - self.a[i + 1] * y + z[i + 1];
                }
                z[order - 1] = self.b[order] * x - self.a[order] * y;

                y
            })
            .collect()
    }

    /// Filter state of the step response once it has settled, i.e. the state
    /// that makes a constant unit input produce a constant output right away.
    pub fn steady_state(&self) -> Vec<f64> {
        let order = self.order();
        let dc_gain = self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>();

        let mut z = vec![0.0; order];
        z[order - 1] = self.b[order] - self.a[order] * dc_gain;
        for i in (0..order - 1).rev() {
            z[i] = self.b[i + 1] - self.a[i + 1] * dc_gain + z[i + 1];
        }

        z
    }

    /// Forward-backward application. Output has the length and time
    /// alignment of `signal`.
    pub fn filtfilt(&self, signal: &[f64]) -> Result<Vec<f64>> {
        let padlen = self.padlen();

        if signal.len() <= padlen {
            return Err(Error::TooShort {
                required: padlen + 1,
                available: signal.len(),
            });
        }

        let extended = odd_extension(signal, padlen);
        let zi = self.steady_state();
        let scaled = |start: f64| zi.iter().map(|z| z * start).collect::<Vec<_>>();

        let mut forward = self.lfilter(&extended, &scaled(extended[0]));
        forward.reverse();

        let mut backward = self.lfilter(&forward, &scaled(forward[0]));
        backward.reverse();

        Ok(backward[padlen..backward.len() - padlen].to_vec())
    }
}

/// Design a Butterworth low-pass and apply it forward and backward.
pub fn zero_phase_low_pass(
    signal: &[f64],
    cutoff_hz: f64,
    sampling_rate_hz: f64,
    order: usize,
) -> Result<Vec<f64>> {
    Butterworth::low_pass(order, cutoff_hz, sampling_rate_hz)?.filtfilt(signal)
}

/// Point-reflect `len` samples about each end of the trace.
fn odd_extension(signal: &[f64], len: usize) -> Vec<f64> {
    let n = signal.len();
    let first = signal[0];
    let last = signal[n - 1];

    let mut extended = Vec::with_capacity(n + 2 * len);
    extended.extend((1..=len).rev().map(|k| 2.0 * first - signal[k]));
    extended.extend_from_slice(signal);
    extended.extend((1..=len).map(|k| 2.0 * last - signal[n - 1 - k]));

    extended
}

/// Coefficients of `(z + 1)^n`.
fn binomial_row(n: usize) -> Vec<f64> {
    (0..n).fold(vec![1.0], |row, _| {
        let mut next = vec![0.0; row.len() + 1];
        for (i, c) in row.iter().enumerate() {
            next[i] += *c;
            next[i + 1] += *c;
        }
        next
    })
}

/// Monic polynomial with the given roots, highest power first.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    roots.iter().fold(vec![Complex64::new(1.0, 0.0)], |coef, root| {
        let mut next = vec![Complex64::new(0.0, 0.0); coef.len() + 1];
        for (i, c) in coef.iter().enumerate() {
            next[i] += *c;
            next[i + 1] -= *c * *root;
        }
        next
    })
}

/// Centred moving average over `window` samples, same length as the input.
///
/// Sample `i` averages `signal[i - window / 2 ..= i + (window - 1) / 2]`.
/// Samples past either end count as zero, so the edges are pulled towards 0.
pub fn moving_average(signal: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::InvalidFilter {
            reason: "moving average window must be at least one sample".to_owned(),
        });
    }

    let left = window / 2;
    let right = window - left - 1;

    Ok((0..signal.len())
        .map(|i| {
            let from = i.saturating_sub(left);
            let to = (i + right).min(signal.len() - 1);

            signal[from..=to].iter().sum::<f64>() / window as f64
        })
        .collect())
}
