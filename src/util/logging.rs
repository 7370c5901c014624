//! Structured logging setup for workflow-gen
//!
//! Diagnostics go through the `tracing` ecosystem and are always written to
//! stderr, so a workflow printed with `--dry-run` on stdout stays clean.
//!
//! # Example
//!
//! ```no_run
//! use workflow_gen::util::logging;
//!
//! logging::init_from_env();
//!
//! use tracing::{debug, warn};
//! debug!(project = "demo", "Probing providers");
//! warn!("Provider file skipped");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    /// Defaults to WARN with plain console output: a CLI run that succeeds
    /// prints nothing but its own result line.
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Debug and trace output also carry file and line.
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            include_location: matches!(level, Level::DEBUG | Level::TRACE),
            ..Default::default()
        }
    }
}

/// Parses a log level from a string
///
/// Returns `None` for anything other than trace, debug, info, warn or error
/// (case-insensitive).
///
/// ```
/// use workflow_gen::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Some(Level::DEBUG));
/// assert_eq!(parse_level("WARN"), Some(Level::WARN));
/// assert_eq!(parse_level("loud"), None);
/// ```
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Parses a log level, falling back to WARN with a notice on stderr.
pub fn parse_level_or_default(level_str: &str) -> Level {
    parse_level(level_str).unwrap_or_else(|| {
        eprintln!(
            "Invalid log level '{}', defaulting to WARN. Valid levels: trace, debug, info, warn, error",
            level_str
        );
        Level::WARN
    })
}

fn build_filter(level: Level) -> EnvFilter {
    // RUST_LOG wins when set; otherwise only our own crate logs at `level`.
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    let mut filter = EnvFilter::new("warn");
    if let Ok(directive) = format!("workflow_gen={}", level).parse() {
        filter = filter.add_directive(directive);
    }
    filter
}

/// Initializes the logging system. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

/// Initializes logging from `WORKFLOW_GEN_LOG_LEVEL` and
/// `WORKFLOW_GEN_LOG_JSON`.
pub fn init_from_env() {
    let level = env::var("WORKFLOW_GEN_LOG_LEVEL")
        .map(|s| parse_level_or_default(&s))
        .unwrap_or(Level::WARN);

    let use_json = env::var("WORKFLOW_GEN_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..Default::default()
    });
}
