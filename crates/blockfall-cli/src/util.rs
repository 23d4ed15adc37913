use std::{fs::File, io, path::Path};

use anyhow::Context;
use blockfall_engine::EngineConfig;

/// Reads an engine config from a JSON file and validates it.
///
/// Fields missing from the file take their default values.
pub fn read_config_file<P>(path: P) -> anyhow::Result<EngineConfig>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file: {}", path.display()))?;

    let config: EngineConfig = serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}
