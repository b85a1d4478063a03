//! Error codes and classification
//!
//! Single source of truth for every code the parser emits and the behavioral
//! metadata attached to it.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Token listing error codes
pub mod token_loading {
    use super::Code;

    pub const MISSING_LINE_NUMBER: Code = Code::new("E020");
    pub const INVALID_LINE_NUMBER: Code = Code::new("E021");
    pub const TOO_MANY_FIELDS: Code = Code::new("E022");
    pub const UNKNOWN_TOKEN_KIND: Code = Code::new("E023");
    pub const TOKEN_TEXT_TOO_LONG: Code = Code::new("E024");
    pub const TOO_MANY_TOKENS: Code = Code::new("E025");
    pub const EMPTY_LISTING: Code = Code::new("E026");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E040");
    pub const TRAILING_TOKENS: Code = Code::new("E043");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const NESTING_TOO_DEEP: Code = Code::new("E087");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKEN_LOADING_COMPLETE: Code = Code::new("I020");
    pub const PROGRAM_ACCEPTED: Code = Code::new("I040");
    pub const SYNTAX_VALIDATION_PASSED: Code = Code::new("I041");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

type Row = (
    &'static str,
    &'static str,
    Severity,
    bool,
    bool,
    &'static str,
    &'static str,
);

// (code, category, severity, recoverable, requires_halt, description, action)
const REGISTRY_ROWS: &[Row] = &[
    ("ERR001", "System", Severity::Critical, false, true,
        "Critical internal system error",
        "File a bug report with the token listing that triggered it"),
    ("ERR002", "System", Severity::Critical, false, true,
        "System initialization failure",
        "Check build profile and runtime configuration"),
    ("E005", "FileProcessing", Severity::Medium, false, true,
        "File not found at specified path",
        "Check file path and ensure file exists"),
    ("E006", "FileProcessing", Severity::Low, true, false,
        "Token listing does not have a .tok or .txt extension",
        "Rename the file or disable RDP_REQUIRE_TOKEN_EXTENSION"),
    ("E007", "FileProcessing", Severity::High, false, true,
        "File exceeds the compile-time size or line limit",
        "Split the listing or rebuild with a larger profile limit"),
    ("E008", "FileProcessing", Severity::Low, false, true,
        "File is empty",
        "Provide a token listing with at least one token"),
    ("E009", "FileProcessing", Severity::Medium, false, true,
        "Permission denied reading file",
        "Check file permissions"),
    ("E010", "FileProcessing", Severity::Medium, false, true,
        "File is not valid UTF-8",
        "Re-encode the listing as UTF-8"),
    ("E011", "FileProcessing", Severity::Medium, false, true,
        "I/O error reading file",
        "Check disk and file system state"),
    ("E012", "FileProcessing", Severity::Medium, false, true,
        "Invalid file path",
        "Pass a path to a regular file"),
    ("E020", "TokenLoading", Severity::High, false, true,
        "Token listing line has no line number field",
        "Write each token as `<text> <line>`"),
    ("E021", "TokenLoading", Severity::High, false, true,
        "Token listing line number is not a positive integer",
        "Use 1-based source line numbers"),
    ("E022", "TokenLoading", Severity::High, false, true,
        "Token listing line has too many fields",
        "Use `<text> <line>` or `<KIND> <text> <line>`"),
    ("E023", "TokenLoading", Severity::High, false, true,
        "Unknown token kind label",
        "Use one of the lexer category labels such as ID, NUM or RELOP"),
    ("E024", "TokenLoading", Severity::High, false, true,
        "Token text exceeds the compile-time length limit",
        "Check the lexer output for runaway tokens"),
    ("E025", "TokenLoading", Severity::High, false, true,
        "Token listing exceeds the compile-time token count",
        "Split the program or rebuild with a larger profile limit"),
    ("E026", "TokenLoading", Severity::Low, false, true,
        "Token listing contains no tokens",
        "Provide a non-empty listing"),
    ("E040", "Syntax", Severity::High, false, true,
        "Input ended while the grammar still required tokens",
        "Complete the program; check for a missing closing brace"),
    ("E043", "Syntax", Severity::High, false, true,
        "Tokens remain after the program's closing brace",
        "Remove the trailing tokens"),
    ("E050", "Syntax", Severity::High, false, true,
        "Token does not match any token the grammar allows here",
        "Insert or replace the token with one of the expected tokens"),
    ("E087", "Syntax", Severity::Critical, false, true,
        "Rule nesting exceeds the compile-time depth limit",
        "Flatten deeply nested blocks or expressions"),
    ("I001", "Success", Severity::Low, true, false,
        "Operation completed successfully", "Continue"),
    ("I004", "Success", Severity::Low, true, false,
        "System initialization completed", "Continue"),
    ("I006", "Success", Severity::Low, true, false,
        "File read and validated", "Continue to token loading"),
    ("I020", "Success", Severity::Low, true, false,
        "Token listing loaded", "Continue to syntax analysis"),
    ("I040", "Success", Severity::Low, true, false,
        "Program accepted by the grammar", "No action required"),
    ("I041", "Success", Severity::Low, true, false,
        "Syntax module self-check passed", "Continue"),
];

/// Metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ROWS
            .iter()
            .map(
                |&(code, category, severity, recoverable, requires_halt, description, action)| {
                    (
                        code,
                        ErrorMetadata {
                            code,
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                            recommended_action: action,
                        },
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

/// Verify that every code in `codes` has registry metadata
pub fn ensure_registered(module: &str, codes: &[Code]) -> Result<(), String> {
    for code in codes {
        if get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "{} code {} not found in metadata registry",
                module,
                code.as_str()
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_no_duplicate_rows() {
        assert_eq!(get_error_registry().len(), REGISTRY_ROWS.len());
    }

    #[test]
    fn test_syntax_code_metadata() {
        let code = syntax::UNEXPECTED_TOKEN;
        assert_eq!(code.as_str(), "E050");
        assert_eq!(get_category(code.as_str()), "Syntax");
        assert_eq!(get_severity(code.as_str()), Severity::High);
        assert!(requires_halt(code.as_str()));
        assert!(!is_recoverable(code.as_str()));
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_action("X999"), "No specific action available");
        assert_eq!(get_category("X999"), "Unknown");
        assert!(!requires_halt("X999"));
    }

    #[test]
    fn test_ensure_registered() {
        assert!(ensure_registered("syntax", &[syntax::NESTING_TOO_DEEP]).is_ok());
        let err = ensure_registered("test", &[Code::new("Z001")]).unwrap_err();
        assert!(err.contains("Z001"));
    }
}
