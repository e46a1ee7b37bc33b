use hearts_core::config::{
    ConfigError as RulesFileError, GameConfig, ValidationError as RulesError,
};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_MAX_ROUNDS: u32 = 250;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimConfig {
    pub run_id: String,
    pub games: usize,
    /// Master seed; every game's engine seed is drawn from it.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    #[serde(default)]
    pub game: GameConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;

        if self.games == 0 {
            return Err(ValidationError::InvalidField {
                field: "games".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }

        if self.max_rounds == 0 {
            return Err(ValidationError::InvalidField {
                field: "max_rounds".to_string(),
                message: "round cap must be greater than zero".to_string(),
            });
        }

        self.game.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Replace the embedded game rules with ones loaded from a separate YAML file.
    pub fn load_rules(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.game = GameConfig::from_path(path).map_err(|source| ConfigError::Rules {
            path: source.path().to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
        }
    }
}

fn default_max_rounds() -> u32 {
    DEFAULT_MAX_ROUNDS
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        if self.jsonl.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "outputs.jsonl".to_string(),
                message: "path must not be empty".to_string(),
            });
        }

        if resolve_template(run_id, &self.jsonl).file_name().is_none() {
            return Err(ValidationError::InvalidField {
                field: "outputs.jsonl".to_string(),
                message: "resolved path does not name a file".to_string(),
            });
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
}

impl ResolvedOutputs {
    /// Directory holding the run's artifacts.
    pub fn run_dir(&self) -> PathBuf {
        self.jsonl
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
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
    #[error("failed to load game rules: {source}")]
    Rules {
        path: PathBuf,
        #[source]
        source: RulesFileError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. }
            | ConfigError::Rules { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
    #[error("game.{0}")]
    Rules(#[from] RulesError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearts_core::model::card::Card;

    const BASIC_YAML: &str = r#"
run_id: "sim_smoke"
games: 8
seed: 123
game:
  target_score: 50
  high_penalty_card: 51
outputs:
  jsonl: "sim/out/{run_id}/games.jsonl"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: SimConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.games, 8);
        assert_eq!(cfg.max_rounds, DEFAULT_MAX_ROUNDS);
        assert_eq!(cfg.game.target_score, 50);
        assert_eq!(cfg.game.high_penalty_card, Card::from_ordinal(51).unwrap());
        assert!(cfg.game.auto_advance);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("sim/out/sim_smoke/games.jsonl")
        );
        assert_eq!(outputs.run_dir(), PathBuf::from("sim/out/sim_smoke"));
    }

    #[test]
    fn rejects_bad_run_id() {
        let mut cfg: SimConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.run_id = "bad id".into();
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(err, ValidationError::InvalidField { field, .. } if field == "run_id"));
    }

    #[test]
    fn rejects_zero_games() {
        let mut cfg: SimConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.games = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn game_rules_are_validated() {
        let mut cfg: SimConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.game.target_score = 0;
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(err, ValidationError::Rules(_)));
        assert!(err.to_string().starts_with("game.target_score"));
    }

    #[test]
    fn rules_file_replaces_embedded_game() {
        let dir = tempfile::tempdir().expect("temp dir");
        let rules = dir.path().join("rules.yaml");
        std::fs::write(&rules, "target_score: 40\nauto_advance: false\n").expect("write rules");

        let mut cfg: SimConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.load_rules(&rules).expect("rules load");
        assert_eq!(cfg.game.target_score, 40);
        assert!(!cfg.game.auto_advance);
        assert_eq!(cfg.game.high_penalty_card, Card::QUEEN_OF_SPADES);
        cfg.validate().expect("validate");
    }

    #[test]
    fn bad_rules_file_reports_its_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let rules = dir.path().join("rules.yaml");
        std::fs::write(&rules, "high_penalty_card: 13\n").expect("write rules");

        let mut cfg: SimConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        let err = cfg.load_rules(&rules).expect_err("opener rejected");
        assert!(matches!(err, ConfigError::Rules { .. }));
        assert_eq!(err.path(), rules.as_path());
        assert_eq!(cfg.game.target_score, 50);

        let missing = dir.path().join("missing.yaml");
        let err = cfg.load_rules(&missing).expect_err("missing file");
        assert_eq!(err.path(), missing.as_path());
    }

    #[test]
    fn blank_level_falls_back_to_info() {
        let mut cfg: SimConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.logging.tracing_level = "  ".into();
        cfg.validate().expect("validate");
        assert_eq!(cfg.logging.level(), Some(Level::INFO));
    }
}
