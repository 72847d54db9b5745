//! Configuration module for anonbbs.

use serde::Deserialize;
use std::path::Path;

use crate::{BbsError, Result};

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the HTTP API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds (0 disables the timeout).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Directory holding the board and thread pages.
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_static_path() -> String {
    "public".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            request_timeout_secs: default_request_timeout(),
            static_path: default_static_path(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds to wait for a free pooled connection.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// Seconds SQLite waits on a locked database before failing.
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

fn default_db_path() -> String {
    "data/anonbbs.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_busy_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            busy_timeout_secs: default_busy_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional path to a log file. Console only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// How `replycount` is computed in the thread list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyCountMode {
    /// Number of replies included in the preview.
    #[default]
    Preview,
    /// Number of replies in the whole thread.
    Total,
}

/// Board behaviour configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Maximum number of threads returned by a board listing.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Maximum number of replies attached to each listed thread.
    #[serde(default = "default_preview_replies")]
    pub preview_replies: usize,
    /// Text that replaces a redacted reply.
    #[serde(default = "default_redaction_text")]
    pub redaction_text: String,
    /// Meaning of `replycount` in board listings.
    #[serde(default)]
    pub reply_count: ReplyCountMode,
    /// Report a missing thread with a JSON 404 error instead of the
    /// plain "reported" body.
    #[serde(default)]
    pub strict_report_not_found: bool,
}

fn default_page_size() -> u32 {
    10
}

fn default_preview_replies() -> usize {
    3
}

fn default_redaction_text() -> String {
    "[deleted]".to_string()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            preview_replies: default_preview_replies(),
            redaction_text: default_redaction_text(),
            reply_count: ReplyCountMode::default(),
            strict_report_not_found: false,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Board configuration.
    #[serde(default)]
    pub board: BoardConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BbsError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BbsError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ANONBBS_DATABASE_PATH` or `DB`: database file path
    /// - `ANONBBS_PORT`: HTTP port
    /// - `ANONBBS_LOG_LEVEL`: log level
    ///
    /// An `ANONBBS_PORT` that is not a valid port number is a configuration
    /// error.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        let db_path = std::env::var("ANONBBS_DATABASE_PATH").or_else(|_| std::env::var("DB"));
        if let Ok(path) = db_path {
            if !path.is_empty() {
                self.database.path = path;
            }
        }

        if let Ok(port) = std::env::var("ANONBBS_PORT") {
            self.web.port = port
                .parse()
                .map_err(|_| BbsError::Config(format!("invalid ANONBBS_PORT: {port:?}")))?;
        }

        if let Ok(level) = std::env::var("ANONBBS_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }

        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.board.page_size == 0 {
            return Err(BbsError::Config(
                "board.page_size must be greater than 0".to_string(),
            ));
        }
        if self.board.preview_replies == 0 {
            return Err(BbsError::Config(
                "board.preview_replies must be greater than 0".to_string(),
            ));
        }
        if self.board.redaction_text.is_empty() {
            return Err(BbsError::Config(
                "board.redaction_text must not be empty".to_string(),
            ));
        }
        if self.database.path.is_empty() {
            return Err(BbsError::Config(
                "database.path must not be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(BbsError::Config(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
