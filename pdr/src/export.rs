//! CSV and JSON files of an analysis run.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{Result, report::Summary};

pub const INTEGRATION: &str = "acceleration_integration.csv";
pub const STEPS: &str = "steps.csv";
pub const TURNS: &str = "turns.csv";
pub const TRAJECTORY: &str = "trajectory.csv";
pub const SUMMARY: &str = "summary.json";

/// Serialize `rows` as a CSV table with a header line.
pub fn write_rows<W: Write, T: Serialize>(output: W, rows: &[T]) -> Result<()> {
    let mut wrt = csv::Writer::from_writer(output);

    for row in rows {
        wrt.serialize(row)?;
    }

    wrt.flush()?;

    Ok(())
}

/// Writes export files into one directory, creating it when needed.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Truncates `name` if it exists. Returns the written path.
    pub fn csv<T: Serialize>(&self, name: &str, rows: &[T]) -> Result<PathBuf> {
        let path = self.dir.join(name);
        write_rows(File::create(&path)?, rows)?;

        tracing::debug!(path = %path.display(), rows = rows.len(), "exported");

        Ok(path)
    }

    pub fn summary(&self, summary: &Summary) -> Result<PathBuf> {
        let path = self.dir.join(SUMMARY);
        serde_json::to_writer_pretty(File::create(&path)?, summary)?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::PointRow;

    #[test]
    fn rows_with_header() {
        let rows = [
            PointRow {
                step: 0,
                x: 0.0,
                y: 0.0,
            },
            PointRow {
                step: 1,
                x: 0.5,
                y: 1.0,
            },
        ];

        let mut output = Vec::new();
        write_rows(&mut output, &rows).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "step,x,y\n0,0.0,0.0\n1,0.5,1.0\n"
        );
    }

    #[test]
    fn writes_into_new_directory() {
        let dir = std::env::temp_dir().join(format!("pdr-export-{}", std::process::id()));
        let exporter = Exporter::new(dir.join("nested")).unwrap();

        let path = exporter
            .csv(
                TRAJECTORY,
                &[PointRow {
                    step: 0,
                    x: 0.0,
                    y: 0.0,
                }],
            )
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "step,x,y\n0,0.0,0.0\n");

        fs::remove_dir_all(dir).unwrap();
    }
}
