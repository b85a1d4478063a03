//! Logging configuration
//!
//! Buffer sizes and the security floor come from compile-time constants;
//! everything else is a runtime preference.

use super::events::LogLevel;
use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences; must run before the first log call, once per process
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Installed preferences, or the environment defaults resolved once
fn get_runtime_preferences() -> &'static LoggingPreferences {
    RUNTIME_PREFERENCES.get_or_init(LoggingPreferences::default)
}

/// Lowest level that may never be filtered out
pub fn get_security_log_level() -> LogLevel {
    LogLevel::from_u8(SECURITY_MIN_LOG_LEVEL)
}

/// User preference, promoted so it is never stricter than the security floor
pub fn get_min_log_level() -> LogLevel {
    let user_level = get_runtime_preferences().min_log_level;
    user_level.max(get_security_log_level())
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

pub fn use_cargo_style_output() -> bool {
    get_runtime_preferences().enable_cargo_style_output
}

pub fn include_file_context() -> bool {
    get_runtime_preferences().include_file_context
}

pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Sanity-check the compile-time logging limits
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }

    if LOG_BUFFER_SIZE > 100_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_EVENTS_PER_FILE > LOG_BUFFER_SIZE {
        return Err("Max log events per file exceeds total buffer size".to_string());
    }

    Ok(())
}

pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         === Compile-time ===\n\
         - Log buffer size: {}\n\
         - Max events per file: {}\n\
         - Security min level: {}\n\
         === Runtime ===\n\
         - Min log level: {:?} (effective {:?})\n\
         - Structured logging: {}\n\
         - Cargo-style output: {}\n\
         - Include file context: {}",
        LOG_BUFFER_SIZE,
        MAX_LOG_EVENTS_PER_FILE,
        SECURITY_MIN_LOG_LEVEL,
        preferences.min_log_level,
        get_min_log_level(),
        preferences.use_structured_logging,
        preferences.enable_cargo_style_output,
        preferences.include_file_context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_effective_level_respects_security_floor() {
        assert!(get_min_log_level() >= get_security_log_level());
        assert!(get_security_log_level() <= LogLevel::Info);
    }

    #[test]
    fn test_preferences_resolved_once() {
        let first = get_runtime_preferences();
        let second = get_runtime_preferences();
        assert!(std::ptr::eq(first, second));
        assert!(init_runtime_preferences(LoggingPreferences::default()).is_err());
    }

    #[test]
    fn test_summary_mentions_limits() {
        let summary = get_config_summary();
        assert!(summary.contains(&LOG_BUFFER_SIZE.to_string()));
        assert!(summary.contains("Security min level"));
    }
}
