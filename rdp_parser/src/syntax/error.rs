//! Syntax errors with error code mapping and line-accurate reporting
//!
//! The `Display` form of [`SyntaxError::UnexpectedToken`] is the user-facing
//! diagnostic: `Line: <line> Expected: <e1>, <e2>, ... But got: <found>`.

use crate::grammar::terminals::END_OF_INPUT;
use crate::logging::{codes, Code};
use crate::tokens::Token;
use std::fmt;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// What stood where the expected terminal should have been
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    Token(String),
    EndOfInput,
}

impl Found {
    pub fn from_token(token: Option<&Token>) -> Self {
        match token {
            Some(token) => Found::Token(token.text.clone()),
            None => Found::EndOfInput,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(text) => f.write_str(text),
            Found::EndOfInput => f.write_str(END_OF_INPUT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Line: {line} Expected: {} But got: {found}", .expected.join(", "))]
    UnexpectedToken {
        expected: Vec<String>,
        found: Found,
        line: u32,
    },

    #[error("Line: {line} Maximum nesting depth {limit} exceeded")]
    NestingTooDeep { limit: usize, line: u32 },
}

impl SyntaxError {
    pub fn unexpected_token(expected: &[&str], found: Option<&Token>, line: u32) -> Self {
        Self::UnexpectedToken {
            expected: expected.iter().map(|e| e.to_string()).collect(),
            found: Found::from_token(found),
            line,
        }
    }

    /// Tokens left over after a complete program
    pub fn trailing_tokens(found: &Token) -> Self {
        Self::UnexpectedToken {
            expected: vec![END_OF_INPUT.to_string()],
            found: Found::Token(found.text.clone()),
            line: found.line,
        }
    }

    pub fn nesting_too_deep(limit: usize, line: u32) -> Self {
        Self::NestingTooDeep { limit, line }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken {
                found: Found::EndOfInput,
                ..
            } => codes::syntax::UNEXPECTED_END_OF_INPUT,
            Self::UnexpectedToken { expected, .. }
                if expected.len() == 1 && expected[0] == END_OF_INPUT =>
            {
                codes::syntax::TRAILING_TOKENS
            }
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::NestingTooDeep { .. } => codes::syntax::NESTING_TOO_DEEP,
        }
    }

    /// The message without its `Line: <line>` prefix
    pub fn detail(&self) -> String {
        match self {
            Self::UnexpectedToken {
                expected, found, ..
            } => format!("Expected: {} But got: {}", expected.join(", "), found),
            Self::NestingTooDeep { limit, .. } => {
                format!("Maximum nesting depth {} exceeded", limit)
            }
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            Self::UnexpectedToken { line, .. } | Self::NestingTooDeep { line, .. } => *line,
        }
    }

    /// Expected terminals in report order, empty for depth failures
    pub fn expected(&self) -> &[String] {
        match self {
            Self::UnexpectedToken { expected, .. } => expected,
            Self::NestingTooDeep { .. } => &[],
        }
    }

    pub fn found(&self) -> Option<&Found> {
        match self {
            Self::UnexpectedToken { found, .. } => Some(found),
            Self::NestingTooDeep { .. } => None,
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self.found(), Some(Found::EndOfInput))
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

/// Where in the derivation a failure happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Active rules, outermost first
    pub rule_path: Vec<String>,
    pub surrounding_tokens: Vec<String>,
    pub line: Option<u32>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule_path(mut self, rule_path: Vec<String>) -> Self {
        self.rule_path = rule_path;
        self
    }

    pub fn with_tokens(mut self, tokens: Vec<String>) -> Self {
        self.surrounding_tokens = tokens;
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Innermost active rule
    pub fn failing_rule(&self) -> Option<&str> {
        self.rule_path.last().map(String::as_str)
    }

    pub fn format_context(&self) -> String {
        let mut context = String::new();

        if !self.rule_path.is_empty() {
            context.push_str(&format!("Context: {}\n", self.rule_path.join(" -> ")));
        }

        if !self.surrounding_tokens.is_empty() {
            context.push_str(&format!("Near: {}\n", self.surrounding_tokens.join(" ")));
        }

        if let Some(line) = self.line {
            context.push_str(&format!("Position: line {}\n", line));
        }

        context
    }
}

/// Syntax error paired with the derivation context it was raised in
#[derive(Debug, Clone)]
pub struct ContextualSyntaxError {
    pub error: SyntaxError,
    pub context: ErrorContext,
}

impl ContextualSyntaxError {
    pub fn new(error: SyntaxError) -> Self {
        Self {
            error,
            context: ErrorContext::new(),
        }
    }

    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = context;
        self
    }

    pub fn format_full_error(&self) -> String {
        format!(
            "{}\n{}Help: {} (Severity: {})",
            self.error,
            self.context.format_context(),
            self.error.recommended_action(),
            self.error.severity()
        )
    }
}

impl fmt::Display for ContextualSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_full_error())
    }
}

impl std::error::Error for ContextualSyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
