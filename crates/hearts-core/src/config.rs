use crate::model::card::Card;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_TARGET_SCORE: i32 = 100;

/// Rules and seeding for one game, loadable from YAML.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GameConfig {
    /// Starting countdown score for every seat.
    #[serde(default = "default_target_score")]
    pub target_score: i32,
    /// The single card worth thirteen points.
    #[serde(default = "default_high_penalty_card")]
    pub high_penalty_card: Card,
    /// Fixed RNG seed for reproducible deals; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Perform phase transitions as soon as their completion flag is raised.
    #[serde(default = "default_auto_advance")]
    pub auto_advance: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            high_penalty_card: default_high_penalty_card(),
            seed: None,
            auto_advance: default_auto_advance(),
        }
    }
}

impl GameConfig {
    pub fn with_target_score(target_score: i32) -> Self {
        Self {
            target_score,
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let cfg: GameConfig = serde_yaml::from_reader(BufReader::new(file)).map_err(|source| {
            ConfigError::Parse {
                source,
                path: path_buf.clone(),
            }
        })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.target_score <= 0 {
            return Err(ValidationError::InvalidField {
                field: "target_score".to_string(),
                message: "target score must be greater than zero".to_string(),
            });
        }

        if self.high_penalty_card == Card::TWO_OF_CLUBS {
            return Err(ValidationError::InvalidField {
                field: "high_penalty_card".to_string(),
                message: format!(
                    "{} opens every round and cannot carry the penalty",
                    Card::TWO_OF_CLUBS
                ),
            });
        }

        Ok(())
    }
}

fn default_target_score() -> i32 {
    DEFAULT_TARGET_SCORE
}

fn default_high_penalty_card() -> Card {
    Card::QUEEN_OF_SPADES
}

fn default_auto_advance() -> bool {
    true
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
