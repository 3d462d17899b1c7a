use std::path::PathBuf;

use pdr::{
    Dataset, PdrConfig,
    export::{self, Exporter},
    report::{
        AccelerationSummary, StepSummary, Summary, TrajectorySummary, TurnSummary,
        integration_rows, point_rows, step_rows, turn_rows,
    },
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Directory holding ACCELERATION.csv, WALKING.csv, TURNING.csv and WALKING_AND_TURNING.csv
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("lab9-dataset"), required = false)]
    pub dataset: PathBuf,
    /// Output directory for the csv and json exports. _Note_: will truncate old files if exist
    #[arg(short, long, default_value_os_t = std::env::current_dir().unwrap_or_default().join("output"), required = false)]
    pub output: PathBuf,
    /// JSON file overriding the default tunables
    #[arg(short, long, required = false)]
    pub config: Option<PathBuf>,
    /// Stride length in metres
    #[arg(long, required = false)]
    pub step_length: Option<f64>,
    /// Heading at the start of the walk, degrees counter-clockwise from East
    #[arg(long, required = false, allow_negative_numbers = true)]
    pub initial_heading: Option<f64>,
    /// Don't save exports
    #[arg(short, long, default_value_t = false, required = false)]
    pub dry: bool,
    /// Print every step and trajectory point to stdout
    #[arg(short, long, default_value_t = false, required = false)]
    pub print: bool,
    /// Log filter, `RUST_LOG` syntax. Falls back to `RUST_LOG`, then `info`
    #[arg(long, required = false)]
    pub log_level: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Args {
        dataset,
        output,
        config,
        step_length,
        initial_heading,
        dry,
        print,
        log_level,
    } = <Args as clap::Parser>::parse();

    let filter = match log_level {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match config {
        Some(path) => pdr::load_config(path)?,
        None => PdrConfig::default(),
    };

    if let Some(step_length) = step_length {
        config.trajectory.step_length_m = step_length;
    }

    if let Some(initial_heading) = initial_heading {
        config.trajectory.initial_heading_deg = initial_heading;
    }

    let dataset = Dataset::new(dataset);

    tracing::info!(dataset = %dataset.root().display(), "running analyses");

    let ((integration, walking), (turning, trajectory)) = rayon::join(
        || rayon::join(|| dataset.acceleration(), || dataset.walking(&config)),
        || {
            rayon::join(
                || dataset.turning(&config),
                || dataset.walking_and_turning(&config),
            )
        },
    );

    let integration =
        integration.map_err(|e| format!("Acceleration analysis failed. Reason: {e}"))?;
    let walking = walking.map_err(|e| format!("Step detection failed. Reason: {e}"))?;
    let turning = turning.map_err(|e| format!("Turn detection failed. Reason: {e}"))?;
    let trajectory =
        trajectory.map_err(|e| format!("Trajectory reconstruction failed. Reason: {e}"))?;

    let summary = Summary {
        acceleration: AccelerationSummary::from(&integration),
        steps: StepSummary::from(&walking),
        turns: TurnSummary::from(&turning),
        trajectory: TrajectorySummary::from(&trajectory),
    };

    println!("== Acceleration ==\n{}\n", summary.acceleration);
    println!("== Walking ==\n{}\n", summary.steps);
    println!("== Turning ==\n{}\n", summary.turns);
    println!("== Walking and turning ==\n{}", summary.trajectory);

    if print {
        println!("\nstep,sample_index,elapsed_s");
        for row in step_rows(&walking) {
            println!("{},{},{:.3}", row.step, row.sample_index, row.elapsed_s);
        }

        println!("\nstep,x,y");
        for row in point_rows(&trajectory) {
            println!("{},{:.3},{:.3}", row.step, row.x, row.y);
        }
    }

    if dry {
        println!("\nDone!");
        return Ok(());
    }

    let exporter = Exporter::new(&output)?;

    exporter.csv(export::INTEGRATION, &integration_rows(&integration))?;
    exporter.csv(export::STEPS, &step_rows(&walking))?;
    exporter.csv(export::TURNS, &turn_rows(&turning))?;
    exporter.csv(export::TRAJECTORY, &point_rows(&trajectory))?;
    exporter.summary(&summary)?;

    println!("\nSaving to {}", exporter.dir().to_string_lossy());
    println!("Done!");

    Ok(())
}
