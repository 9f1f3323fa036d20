use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

const DEFAULT_NOTICE_SECONDS: u64 = 3;
const DEFAULT_LOG_FILE: &str = "callbreak.jsonl";

/// Session configuration loaded from YAML. Every field is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default = "default_notice_seconds")]
    pub notice_seconds: u64,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            notice_seconds: DEFAULT_NOTICE_SECONDS,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: AppConfig =
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
        if self.notice_seconds == 0 {
            return Err(ValidationError::InvalidField {
                field: "notice_seconds".to_string(),
                message: "leader notice must stay up for at least one second".to_string(),
            });
        }
        // Blank names are allowed here; the roster reports them before play.
        for name in self.players.iter_mut() {
            *name = name.trim().to_string();
        }
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.logging.tracing_level),
            });
        }
        Ok(())
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }
}

fn default_notice_seconds() -> u64 {
    DEFAULT_NOTICE_SECONDS
}

/// Logging configuration defaults to human-readable warnings on stderr.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            file: default_log_file(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self.file.as_os_str().is_empty() {
            self.file = default_log_file();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
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
    "warn".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BASIC_YAML: &str = r#"
players:
  - "Asha"
  - " Bikash "
notice_seconds: 5
logging:
  enable_structured: true
  tracing_level: "debug"
  file: "logs/session.jsonl"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: AppConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.players, vec!["Asha".to_string(), "Bikash".to_string()]);
        assert_eq!(cfg.notice_duration(), Duration::from_secs(5));
        assert!(cfg.logging.enable_structured);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(cfg.logging.file, PathBuf::from("logs/session.jsonl"));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: AppConfig = serde_yaml::from_str("{}").expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.notice_duration(), Duration::from_secs(3));
    }

    #[test]
    fn rejects_zero_notice_seconds() {
        let yaml = BASIC_YAML.replace("notice_seconds: 5", "notice_seconds: 0");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "notice_seconds"
        ));
    }

    #[test]
    fn rejects_unknown_level() {
        let yaml = BASIC_YAML.replace("\"debug\"", "\"loud\"");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("unknown level");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "logging.tracing_level"
        ));
    }

    #[test]
    fn blank_level_falls_back_to_default() {
        let yaml = BASIC_YAML.replace("\"debug\"", "\"  \"");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(cfg.logging.level(), Some(Level::WARN));
    }

    #[test]
    fn from_path_reports_path_on_parse_failure() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "players: [unterminated").expect("write");
        let err = AppConfig::from_path(file.path()).expect_err("bad yaml");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), file.path());
    }

    #[test]
    fn from_path_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(BASIC_YAML.as_bytes()).expect("write");
        let cfg = AppConfig::from_path(file.path()).expect("loads");
        assert_eq!(cfg.players.len(), 2);
    }
}
