//! Syntax analysis: token sequence in, accept or first syntax error out

mod error;
mod parser;

pub use error::{ContextualSyntaxError, ErrorContext, Found, SyntaxError, SyntaxResult};
pub use parser::{DescentParser, ParseSummary};

use crate::config::runtime::ParserPreferences;
use crate::grammar::terminals;
use crate::logging::codes;
use crate::tokens::{Token, TokenCursor};
use crate::{log_debug, log_error, log_info, log_success};

/// Parse an owned token sequence as one program
pub fn parse_tokens(tokens: Vec<Token>) -> SyntaxResult<ParseSummary> {
    parse_token_cursor(TokenCursor::new(tokens))
}

pub fn parse_token_cursor(cursor: TokenCursor) -> SyntaxResult<ParseSummary> {
    parse_with_preferences(cursor, ParserPreferences::default())
}

pub fn parse_with_preferences(
    cursor: TokenCursor,
    preferences: ParserPreferences,
) -> SyntaxResult<ParseSummary> {
    log_debug!("Starting syntax analysis", "tokens" => cursor.len());

    let result = DescentParser::from_cursor(cursor)
        .with_preferences(preferences)
        .parse_program();

    if let Ok(summary) = &result {
        log_success!(codes::success::PROGRAM_ACCEPTED, "Program accepted",
            "tokens" => summary.tokens_consumed,
            "max_depth" => summary.max_depth
        );
    }

    result
}

/// Check that every terminal a classified token can carry reaches the grammar unchanged
pub fn validate_grammar_integration() -> Result<(), String> {
    log_debug!("Validating grammar integration");

    let mismatched: Vec<&str> = terminals::all_terminals()
        .into_iter()
        .filter(|terminal| Token::classified(*terminal, 1).grammar_symbol() != *terminal)
        .collect();

    if mismatched.is_empty() {
        log_success!(
            codes::success::SYNTAX_VALIDATION_PASSED,
            "Grammar integration validation passed"
        );
        Ok(())
    } else {
        log_error!(codes::system::INTERNAL_ERROR,
            "Grammar integration validation failed",
            "terminals" => mismatched.join(", ")
        );
        Err(format!("Terminals lost by classification: {}", mismatched.join(", ")))
    }
}

/// Initialize syntax module logging validation
pub fn init_syntax_logging() -> Result<(), String> {
    codes::ensure_registered(
        "Syntax",
        &[
            codes::syntax::UNEXPECTED_END_OF_INPUT,
            codes::syntax::TRAILING_TOKENS,
            codes::syntax::UNEXPECTED_TOKEN,
            codes::syntax::NESTING_TOO_DEEP,
            codes::success::PROGRAM_ACCEPTED,
            codes::success::SYNTAX_VALIDATION_PASSED,
        ],
    )?;

    validate_grammar_integration()?;

    log_info!("Syntax module logging validation completed");
    Ok(())
}
