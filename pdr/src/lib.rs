//! # PDR
//!
//! Pedestrian dead reckoning over the lab recordings: loading the CSV traces,
//! running the four analyses and reporting their results.
//!
//! | Recording                 | Analysis                                   |
//! |---------------------------|--------------------------------------------|
//! | `ACCELERATION.csv`        | double integration, clean vs noisy         |
//! | `WALKING.csv`             | step detection                             |
//! | `TURNING.csv`             | turn detection                             |
//! | `WALKING_AND_TURNING.csv` | steps and heading combined into a 2-D path |

pub mod analysis;
pub mod config;
mod error;
pub mod export;
pub mod load;
pub mod report;

pub use self::{
    analysis::Dataset,
    config::{PdrConfig, load_config},
    error::*,
};
