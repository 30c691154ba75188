//! Simulator configuration.
//!
//! Loaded from an optional TOML file; every key has a default, so an empty
//! file (or no file at all) yields [`Config::default`].

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::SimError;
use crate::core::memory::DEFAULT_MEMORY_SIZE;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub memory: MemoryConfig,
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    #[serde(default = "default_trace_instructions")]
    pub trace_instructions: bool,
    /// Cycle budget; 0 runs until the program terminates.
    #[serde(default)]
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: default_trace_instructions(),
            max_cycles: 0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct MemoryConfig {
    #[serde(default = "default_memory_size")]
    pub size: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: default_memory_size(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_print_stats")]
    pub print_stats: bool,
    #[serde(default)]
    pub stats_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            print_stats: default_print_stats(),
            stats_json: false,
        }
    }
}

impl Config {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SimError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks values serde cannot express as types.
    pub fn validate(&self) -> Result<(), SimError> {
        let size = self.memory.size;
        if size == 0 || size % 4 != 0 {
            return Err(SimError::Config(format!(
                "memory.size must be a positive multiple of 4, got {}",
                size
            )));
        }
        if u32::try_from(size).is_err() {
            return Err(SimError::Config(format!(
                "memory.size {} exceeds the 32-bit address space",
                size
            )));
        }
        Ok(())
    }
}

fn default_trace_instructions() -> bool {
    cfg!(feature = "always-trace")
}

fn default_memory_size() -> usize {
    DEFAULT_MEMORY_SIZE
}

fn default_print_stats() -> bool {
    true
}
