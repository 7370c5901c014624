//! Configuration management for workflow-gen
//!
//! Settings are read from environment variables with defaults; command-line
//! flags override them in the CLI handlers.
//!
//! # Environment Variables
//!
//! - `WORKFLOW_GEN_LOG_LEVEL`: Logging level - default: "warn"
//! - `WORKFLOW_GEN_LOG_JSON`: JSON log output (true|false) - default: "false"
//! - `WORKFLOW_GEN_PROVIDERS_DIR`: Directory of declarative provider files - optional
//! - `WORKFLOW_GEN_MESSAGES`: YAML message file replacing the built-in messages - optional
//!
//! # Example
//!
//! ```no_run
//! use workflow_gen::WorkflowGenConfig;
//!
//! let config = WorkflowGenConfig::default();
//! config.validate().expect("Invalid configuration");
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowGenConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON
    pub log_json: bool,

    /// Directory scanned for declarative provider definitions
    pub providers_dir: Option<PathBuf>,

    /// Message file replacing the built-in message table
    pub messages_path: Option<PathBuf>,
}

impl Default for WorkflowGenConfig {
    /// Loads configuration from `WORKFLOW_GEN_*` environment variables.
    fn default() -> Self {
        let log_level = env::var("WORKFLOW_GEN_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("WORKFLOW_GEN_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let providers_dir = env::var("WORKFLOW_GEN_PROVIDERS_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let messages_path = env::var("WORKFLOW_GEN_MESSAGES")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            log_level,
            log_json,
            providers_dir,
            messages_path,
        }
    }
}

impl WorkflowGenConfig {
    /// Replaces the environment's log level with one given on the command line.
    pub fn override_log_level(&mut self, level: Option<&str>) {
        if let Some(level) = level {
            self.log_level = level.to_lowercase();
        }
    }

    /// Validates the configuration
    ///
    /// Only the log level is checked here. A provider directory or message
    /// file that cannot be read is reported by its loader, which carries on
    /// without it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            ))),
        }
    }
}

impl fmt::Display for WorkflowGenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "workflow-gen configuration:")?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        if let Some(dir) = &self.providers_dir {
            writeln!(f, "  Providers Dir: {}", dir.display())?;
        }
        if let Some(path) = &self.messages_path {
            writeln!(f, "  Messages: {}", path.display())?;
        }
        Ok(())
    }
}
