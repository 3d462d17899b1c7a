//! # Signal
//!
//! Whole-trace building blocks used by the step, turn and trajectory
//! analyses:
//!
//! - [`filter`] - Butterworth low-pass design and forward-backward
//!   (zero-phase) application, centred moving average
//! - [`integrate`] - left-rectangle cumulative integration
//! - [`stats`] - sampling rate and trace statistics
//!
//! Everything here works on owned, fully loaded traces. None of it is usable
//! on a live stream: the zero-phase filter needs the end of the trace before
//! it can emit the start.

mod error;
pub mod filter;
pub mod integrate;
pub mod stats;

pub use self::error::*;
pub use self::filter::{Butterworth, moving_average, zero_phase_low_pass};
pub use self::integrate::{integrate, integrate_fixed};
pub use self::stats::{mean, sampling_rate, std_dev};

/// Timestamps in recorded traces are integer nanoseconds.
pub const NANOS_PER_SECOND: f64 = 1e9;
