/// Engine configuration - retry budget, walk length and seeding.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::markov::DEFAULT_MAX_WORDS;

/// Generation attempts before falling back to the corpus.
pub const DEFAULT_MAX_RETRIES: u32 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    /// Fixed RNG seed; `None` seeds from system entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            max_words: DEFAULT_MAX_WORDS,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn parse_ron(input: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries == 0 {
            return Err(ConfigError::Invalid("max_retries must be at least 1".to_string()));
        }
        if self.max_words == 0 {
            return Err(ConfigError::Invalid("max_words must be at least 1".to_string()));
        }
        Ok(())
    }
}
