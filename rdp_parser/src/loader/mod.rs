//! Token listing loader
//!
//! Reads the interchange format produced by the upstream lexer: one token per
//! line, either `<text> <line>` or `<KIND> <text> <line>`. Blank lines are
//! ignored. Every token must carry its source line; nothing defaults to 0.

mod error;

pub use error::{LoaderError, LoaderResult};

use crate::config::compile_time::tokens::{MAX_TOKEN_COUNT, MAX_TOKEN_TEXT_LENGTH};
use crate::logging::codes;
use crate::tokens::{Token, TokenKind};
use crate::{log_debug, log_error, log_success};

/// Parse a whole listing into tokens
pub fn parse_token_listing(content: &str) -> LoaderResult<Vec<Token>> {
    let mut tokens = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let listing_line = index + 1;

        if raw_line.trim().is_empty() {
            continue;
        }

        if tokens.len() >= MAX_TOKEN_COUNT {
            let error = LoaderError::TooManyTokens {
                max_tokens: MAX_TOKEN_COUNT,
            };
            log_error!(error.error_code(), "Token listing exceeds maximum token count",
                "max_tokens" => MAX_TOKEN_COUNT,
                "listing_line" => listing_line
            );
            return Err(error);
        }

        match parse_listing_line(raw_line, listing_line) {
            Ok(token) => tokens.push(token),
            Err(error) => {
                log_error!(error.error_code(), &error.to_string(),
                    "listing_line" => listing_line,
                    "content" => raw_line.trim()
                );
                return Err(error);
            }
        }
    }

    if tokens.is_empty() {
        let error = LoaderError::EmptyListing;
        log_error!(error.error_code(), "Token listing contains no tokens");
        return Err(error);
    }

    log_success!(codes::success::TOKEN_LOADING_COMPLETE, "Token listing loaded",
        "tokens" => tokens.len(),
        "last_line" => tokens.last().map(|t| t.line).unwrap_or(0)
    );

    Ok(tokens)
}

/// Parse one non-blank listing line
pub fn parse_listing_line(raw_line: &str, listing_line: usize) -> LoaderResult<Token> {
    let fields: Vec<&str> = raw_line.split_whitespace().collect();

    let token = match fields.as_slice() {
        [text] => {
            return Err(LoaderError::MissingLineNumber {
                listing_line,
                text: text.to_string(),
            })
        }
        [text, line] => {
            let line = parse_line_number(line, listing_line)?;
            check_text_length(text, listing_line)?;
            Token::classified(*text, line)
        }
        [label, text, line] => {
            let kind =
                TokenKind::from_label(label).ok_or_else(|| LoaderError::UnknownTokenKind {
                    listing_line,
                    label: label.to_string(),
                })?;
            let line = parse_line_number(line, listing_line)?;
            check_text_length(text, listing_line)?;
            Token::with_kind(kind, *text, line)
        }
        _ => {
            return Err(LoaderError::TooManyFields {
                listing_line,
                count: fields.len(),
            })
        }
    };

    log_debug!("Loaded token",
        "listing_line" => listing_line,
        "text" => token.text.as_str(),
        "line" => token.line
    );

    Ok(token)
}

fn parse_line_number(value: &str, listing_line: usize) -> LoaderResult<u32> {
    match value.parse::<u32>() {
        Ok(line) if line > 0 => Ok(line),
        _ => Err(LoaderError::InvalidLineNumber {
            listing_line,
            value: value.to_string(),
        }),
    }
}

fn check_text_length(text: &str, listing_line: usize) -> LoaderResult<()> {
    let length = text.chars().count();
    if length > MAX_TOKEN_TEXT_LENGTH {
        return Err(LoaderError::TokenTextTooLong {
            listing_line,
            length,
            max_length: MAX_TOKEN_TEXT_LENGTH,
        });
    }
    Ok(())
}

/// Startup check that every token loading code is registered
pub fn init_loader_logging() -> Result<(), String> {
    codes::ensure_registered(
        "Token loader",
        &[
            codes::token_loading::MISSING_LINE_NUMBER,
            codes::token_loading::INVALID_LINE_NUMBER,
            codes::token_loading::TOO_MANY_FIELDS,
            codes::token_loading::UNKNOWN_TOKEN_KIND,
            codes::token_loading::TOKEN_TEXT_TOO_LONG,
            codes::token_loading::TOO_MANY_TOKENS,
            codes::token_loading::EMPTY_LISTING,
            codes::success::TOKEN_LOADING_COMPLETE,
        ],
    )?;

    log_debug!("Token loader limits loaded",
        "max_token_count" => MAX_TOKEN_COUNT,
        "max_token_text_length" => MAX_TOKEN_TEXT_LENGTH
    );

    Ok(())
}

/// Render tokens back into the two-field listing format
pub fn render_token_listing(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| format!("{} {}\n", token.text, token.line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_two_field_listing() {
        let tokens = parse_token_listing("Program 1\nID 1\n{ 1\n\n} 3\n").unwrap();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].text, "Program");
        assert_eq!(tokens[0].kind, Some(TokenKind::Program));
        assert_eq!(tokens[1].grammar_symbol(), "ID");
        assert_eq!(tokens[3].line, 3);
    }

    #[test]
    fn test_three_field_listing() {
        let tokens = parse_token_listing("PROGRAM Program 1\nID total 2\nNUM 10 2").unwrap();

        assert_eq!(tokens[1], Token::with_kind(TokenKind::Identifier, "total", 2));
        assert_eq!(tokens[1].grammar_symbol(), "ID");
        assert_eq!(tokens[2].grammar_symbol(), "NUM");
    }

    #[test]
    fn test_missing_line_number_is_rejected() {
        let result = parse_token_listing("Program 1\nID\n");
        assert_matches!(
            result,
            Err(LoaderError::MissingLineNumber { listing_line: 2, ref text }) if text == "ID"
        );
    }

    #[test]
    fn test_line_zero_is_rejected() {
        assert_matches!(
            parse_token_listing("Program 0"),
            Err(LoaderError::InvalidLineNumber { listing_line: 1, .. })
        );
        assert_matches!(
            parse_token_listing("Program x"),
            Err(LoaderError::InvalidLineNumber { .. })
        );
        assert_matches!(
            parse_token_listing("Program -4"),
            Err(LoaderError::InvalidLineNumber { .. })
        );
    }

    #[test]
    fn test_too_many_fields() {
        assert_matches!(
            parse_token_listing("ID a b 1"),
            Err(LoaderError::TooManyFields { listing_line: 1, count: 4 })
        );
    }

    #[test]
    fn test_unknown_kind_label() {
        let error = parse_token_listing("STRING abc 1").unwrap_err();
        assert_matches!(error, LoaderError::UnknownTokenKind { ref label, .. } if label == "STRING");
        assert_eq!(error.error_code(), codes::token_loading::UNKNOWN_TOKEN_KIND);
        assert_eq!(error.listing_line(), Some(1));
    }

    #[test]
    fn test_text_length_limit() {
        let listing = format!("{} 1", "x".repeat(MAX_TOKEN_TEXT_LENGTH + 1));
        assert_matches!(
            parse_token_listing(&listing),
            Err(LoaderError::TokenTextTooLong { length, .. }) if length == MAX_TOKEN_TEXT_LENGTH + 1
        );
    }

    #[test]
    fn test_empty_listing() {
        let error = parse_token_listing("\n   \n").unwrap_err();
        assert_eq!(error, LoaderError::EmptyListing);
        assert_eq!(error.listing_line(), None);
        assert_eq!(error.category(), "TokenLoading");
    }

    #[test]
    fn test_init_logging_validation() {
        assert!(init_loader_logging().is_ok());
    }

    #[test]
    fn test_render_listing() {
        let tokens = vec![Token::new("Program", 1), Token::new("ID", 1)];
        let rendered = render_token_listing(&tokens);
        assert_eq!(rendered, "Program 1\nID 1\n");
        assert_eq!(parse_token_listing(&rendered).unwrap().len(), 2);
    }
}
