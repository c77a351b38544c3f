//! Configuration file loading.

use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load, parse, and validate an experiment configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path).wrap_err_with(|| {
        format!(
            "Failed to open configuration file '{}'",
            config_path.display()
        )
    })?;

    let config: Config =
        serde_yaml::from_reader(file).wrap_err("Failed to parse configuration YAML")?;

    config.validate()?;

    Ok(config)
}
