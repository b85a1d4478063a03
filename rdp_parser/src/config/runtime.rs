// RUNTIME PREFERENCES (User Experience)
//
// Every preference defaults from an `RDP_*` environment variable and can be
// overridden by a TOML file passed with `--config`.

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Read a boolean preference, falling back when unset or unparseable
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Reject inputs without a `.tok`/`.txt` extension
    pub require_token_extension: bool,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_token_extension: env_flag(env_vars::REQUIRE_TOKEN_EXTENSION, false),
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserPreferences {
    /// Emit a debug event on every rule entry with the current rule path
    pub trace_rules: bool,

    /// Emit a debug event for every matched token
    pub trace_matches: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            trace_rules: env_flag(env_vars::PARSER_TRACE_RULES, false),
            trace_matches: env_flag(env_vars::PARSER_TRACE_MATCHES, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// User preferred minimum log level (within security constraints)
    pub min_log_level: LogLevel,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            enable_cargo_style_output: env_flag(env_vars::LOGGING_CARGO_STYLE, true),
            include_file_context: env_flag(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Errors loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    #[error("Cannot read runtime configuration {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid runtime configuration {path}: {message}")]
    Parse { path: String, message: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub parser: ParserPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; omitted tables and keys keep their env-derived defaults
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a TOML runtime configuration file
    pub fn load(path: &Path) -> Result<Self, RuntimeConfigError> {
        let content = fs::read_to_string(path).map_err(|e| RuntimeConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| RuntimeConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File processor
    pub const REQUIRE_TOKEN_EXTENSION: &str = "RDP_REQUIRE_TOKEN_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "RDP_ENABLE_PERFORMANCE_LOGGING";

    // Parser
    pub const PARSER_TRACE_RULES: &str = "RDP_PARSER_TRACE_RULES";
    pub const PARSER_TRACE_MATCHES: &str = "RDP_PARSER_TRACE_MATCHES";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "RDP_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "RDP_LOGGING_MIN_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "RDP_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "RDP_LOGGING_INCLUDE_FILE_CONTEXT";
}
