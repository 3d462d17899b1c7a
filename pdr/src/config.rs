use std::{fs::File, io::Read, path::Path};

use crate::Result;

/// Tunables of every analysis in one place. Any field missing from a config
/// file keeps its default.
pub use trajectory::WalkConfig as PdrConfig;

pub fn config_from_reader(input: impl Read) -> Result<PdrConfig> {
    Ok(serde_json::from_reader(input)?)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<PdrConfig> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open config {}. Reason: {e}", path.display()),
        )
    })?;

    let config = config_from_reader(file)?;
    tracing::debug!(?config, path = %path.display(), "loaded config");

    Ok(config)
}
