//! The four lab analyses, each reading its own recording from a dataset
//! directory.

use std::path::{Path, PathBuf};

use acceleration::IntegrationReport;
use steps::{StepDetection, StepDetector};
use trajectory::TrajectoryReport;
use turns::{TurnDetection, TurnDetector};

use crate::{PdrConfig, Result, load};

pub const ACCELERATION: &str = "ACCELERATION.csv";
pub const WALKING: &str = "WALKING.csv";
pub const TURNING: &str = "TURNING.csv";
pub const WALKING_AND_TURNING: &str = "WALKING_AND_TURNING.csv";

/// Location of the four recordings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    root: PathBuf,
}

impl Dataset {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Whether every recording is present.
    pub fn is_complete(&self) -> bool {
        [ACCELERATION, WALKING, TURNING, WALKING_AND_TURNING]
            .into_iter()
            .all(|name| self.file(name).is_file())
    }

    pub fn acceleration(&self) -> Result<IntegrationReport> {
        let _span = tracing::info_span!("acceleration").entered();

        let samples = load::acceleration(self.file(ACCELERATION))?;
        Ok(acceleration::analyze(&samples)?)
    }

    pub fn walking(&self, config: &PdrConfig) -> Result<StepDetection> {
        let _span = tracing::info_span!("walking").entered();

        let samples = load::accelerometer(self.file(WALKING))?;
        Ok(StepDetector::new(config.steps.clone()).detect(&samples)?)
    }

    pub fn turning(&self, config: &PdrConfig) -> Result<TurnDetection> {
        let _span = tracing::info_span!("turning").entered();

        let samples = load::gyroscope(self.file(TURNING))?;
        Ok(TurnDetector::new(config.turns.clone()).detect(&samples)?)
    }

    pub fn walking_and_turning(&self, config: &PdrConfig) -> Result<TrajectoryReport> {
        let _span = tracing::info_span!("walking_and_turning").entered();

        let samples = load::imu(self.file(WALKING_AND_TURNING))?;
        Ok(trajectory::walk(&samples, config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_recordings() {
        let dataset = Dataset::new("/definitely/not/here");

        assert!(!dataset.is_complete());
        assert!(matches!(dataset.acceleration(), Err(crate::Error::Io(_))));
        assert!(matches!(
            dataset.walking(&PdrConfig::default()),
            Err(crate::Error::Io(_))
        ));
    }

    #[test]
    fn file_names() {
        let dataset = Dataset::new("lab9-dataset");

        assert_eq!(dataset.file(TURNING), PathBuf::from("lab9-dataset/TURNING.csv"));
        assert_eq!(dataset.root(), Path::new("lab9-dataset"));
    }
}
