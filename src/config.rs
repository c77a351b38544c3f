//! Experiment configuration structures and validation.
//!
//! Configurations are loaded from YAML (see `config_loader`) or built
//! from defaults, optionally overridden from the command line, and
//! validated before any trial runs.

use serde::{Deserialize, Serialize};

use crate::ip::{AddressBlock, ADDRESS_WIDTH};

/// Errors found while validating a configuration
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid experiment configuration: {0}")]
    InvalidExperiment(String),

    #[error("Invalid generation configuration: {0}")]
    InvalidGeneration(String),
}

/// Top-level experiment configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub experiment: ExperimentConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Trial dimensions and reproducibility settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExperimentConfig {
    /// Number of independent trials to run
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Requesting ASes generated per trial
    #[serde(default = "default_side_size")]
    pub as_count: usize,
    /// Allocatable blocks generated per trial
    #[serde(default = "default_side_size")]
    pub block_count: usize,
    /// RNG seed; omit for a fresh seed on every run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Synthetic instance generation parameters
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Base networks that generated blocks are drawn from
    #[serde(default = "default_base_networks")]
    pub base_networks: Vec<String>,
    /// Shortest prefix length assigned to a generated block
    #[serde(default = "default_min_prefix_len")]
    pub min_prefix_len: u8,
    /// Longest prefix length assigned to a generated block
    #[serde(default = "default_max_prefix_len")]
    pub max_prefix_len: u8,
}

fn default_trials() -> usize {
    10
}

fn default_side_size() -> usize {
    10
}

fn default_base_networks() -> Vec<String> {
    [
        "10.0.0.0/16",
        "172.16.0.0/12",
        "192.168.0.0/16",
        "198.51.100.0/24",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_min_prefix_len() -> u8 {
    22
}

fn default_max_prefix_len() -> u8 {
    29
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            trials: default_trials(),
            as_count: default_side_size(),
            block_count: default_side_size(),
            seed: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            base_networks: default_base_networks(),
            min_prefix_len: default_min_prefix_len(),
            max_prefix_len: default_max_prefix_len(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.experiment.trials == 0 {
            return Err(ValidationError::InvalidExperiment(
                "trials must be at least 1".to_string(),
            ));
        }
        if self.experiment.as_count == 0 {
            return Err(ValidationError::InvalidExperiment(
                "as_count must be at least 1".to_string(),
            ));
        }
        if self.experiment.block_count == 0 {
            return Err(ValidationError::InvalidExperiment(
                "block_count must be at least 1".to_string(),
            ));
        }
        self.generation.validate()
    }
}

impl GenerationConfig {
    /// Validate the generation parameters
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_networks.is_empty() {
            return Err(ValidationError::InvalidGeneration(
                "base_networks cannot be an empty list".to_string(),
            ));
        }
        if self.min_prefix_len > self.max_prefix_len {
            return Err(ValidationError::InvalidGeneration(format!(
                "min_prefix_len /{} exceeds max_prefix_len /{}",
                self.min_prefix_len, self.max_prefix_len
            )));
        }
        if self.max_prefix_len > ADDRESS_WIDTH {
            return Err(ValidationError::InvalidGeneration(format!(
                "max_prefix_len /{} exceeds the address width",
                self.max_prefix_len
            )));
        }
        for net in &self.base_networks {
            let block: AddressBlock = net.parse().map_err(|e| {
                ValidationError::InvalidGeneration(format!("base network '{}': {}", net, e))
            })?;
            // Host addresses are drawn between network and broadcast,
            // so the base must leave at least two host bits.
            if block.prefix_len() > 30 {
                return Err(ValidationError::InvalidGeneration(format!(
                    "base network '{}' has no assignable host addresses",
                    net
                )));
            }
        }
        Ok(())
    }

    /// Parse the configured base networks into structured blocks.
    ///
    /// Parsing happens once here; generation consumes the structured
    /// form only.
    pub fn base_blocks(&self) -> Result<Vec<AddressBlock>, ValidationError> {
        self.base_networks
            .iter()
            .map(|net| {
                net.parse().map_err(|e| {
                    ValidationError::InvalidGeneration(format!("base network '{}': {}", net, e))
                })
            })
            .collect()
    }
}
