//! Descent parser driving the grammar rules over a token cursor
//!
//! The parser owns the cursor for the whole run, keeps the stack of active
//! rules for diagnostics, and stops at the first syntax error.

use crate::config::compile_time::syntax::{
    CONTEXT_SNIPPET_RADIUS, MAX_PARSE_DEPTH, MAX_RULE_TRACE_DEPTH,
};
use crate::config::runtime::ParserPreferences;
use crate::grammar::rules::{self, GrammarParser};
use crate::grammar::Rule;
use crate::syntax::error::{ContextualSyntaxError, ErrorContext, SyntaxError, SyntaxResult};
use crate::tokens::{Token, TokenCursor};
use crate::{log_debug, log_error, log_info};
use serde::Serialize;

/// Outcome of an accepted program
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub tokens_consumed: usize,
    pub max_depth: usize,
    pub last_line: u32,
}

pub struct DescentParser {
    cursor: TokenCursor,
    rule_stack: Vec<Rule>,
    max_depth: usize,
    preferences: ParserPreferences,
    failure: Option<ErrorContext>,
}

impl DescentParser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::from_cursor(TokenCursor::new(tokens))
    }

    pub fn from_cursor(cursor: TokenCursor) -> Self {
        log_debug!("Creating descent parser", "tokens" => cursor.len());

        Self {
            cursor,
            rule_stack: Vec::new(),
            max_depth: 0,
            preferences: ParserPreferences::default(),
            failure: None,
        }
    }

    pub fn with_preferences(mut self, preferences: ParserPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn cursor(&self) -> &TokenCursor {
        &self.cursor
    }

    /// Number of currently active rules
    pub fn depth(&self) -> usize {
        self.rule_stack.len()
    }

    pub fn max_depth_reached(&self) -> usize {
        self.max_depth
    }

    /// Parse a complete program and require the input to end right after it
    pub fn parse_program(&mut self) -> SyntaxResult<ParseSummary> {
        log_info!("Starting descent parse", "tokens" => self.cursor.len());

        let result = rules::program(self).and_then(|()| self.expect_end_of_input());

        match result {
            Ok(()) => {
                let summary = ParseSummary {
                    tokens_consumed: self.cursor.position(),
                    max_depth: self.max_depth,
                    last_line: self.cursor.diagnostic_line(),
                };
                log_debug!("Descent parse finished",
                    "tokens_consumed" => summary.tokens_consumed,
                    "max_depth" => summary.max_depth
                );
                Ok(summary)
            }
            Err(error) => {
                let context = self.failure.clone().unwrap_or_default();
                log_error!(error.error_code(), &error.detail(),
                    line = error.line(),
                    "rule" => context.failing_rule().unwrap_or("program"),
                    "rule_path" => context.rule_path.join(" -> "),
                    "position" => self.cursor.position()
                );
                Err(error)
            }
        }
    }

    fn expect_end_of_input(&mut self) -> SyntaxResult<()> {
        let error = match self.cursor.current() {
            None => return Ok(()),
            Some(token) => SyntaxError::trailing_tokens(token),
        };
        self.record_failure();
        Err(error)
    }

    /// Active rules, outermost first, trimmed to the innermost trace window
    pub fn rule_path(&self) -> Vec<String> {
        let skipped = self.rule_stack.len().saturating_sub(MAX_RULE_TRACE_DEPTH);
        let mut path = Vec::with_capacity(self.rule_stack.len() - skipped + 1);
        if skipped > 0 {
            path.push(format!("... {} more", skipped));
        }
        path.extend(self.rule_stack[skipped..].iter().map(|rule| rule.name().to_string()));
        path
    }

    pub fn current_context(&self) -> String {
        match self.rule_stack.last() {
            Some(rule) => rule.name().to_string(),
            None => "top level".to_string(),
        }
    }

    /// Context captured when the first error was raised
    pub fn failure_context(&self) -> Option<&ErrorContext> {
        self.failure.as_ref()
    }

    /// Attach derivation context to an error from this parser
    pub fn create_contextual_error(&self, error: SyntaxError) -> ContextualSyntaxError {
        let context = self
            .failure
            .clone()
            .unwrap_or_else(|| self.snapshot_context());
        ContextualSyntaxError::new(error).with_context(context)
    }

    fn snapshot_context(&self) -> ErrorContext {
        ErrorContext::new()
            .with_rule_path(self.rule_path())
            .with_tokens(self.surrounding_tokens())
            .with_line(self.cursor.diagnostic_line())
    }

    fn surrounding_tokens(&self) -> Vec<String> {
        self.cursor
            .context_snippet(CONTEXT_SNIPPET_RADIUS)
            .iter()
            .map(|token| token.text.clone())
            .collect()
    }

    fn record_failure(&mut self) {
        if self.failure.is_none() {
            self.failure = Some(self.snapshot_context());
        }
    }

    pub fn diagnostic_info(&self) -> String {
        format!(
            "Parser State:\n{}\nContext: {}\nDepth: {}/{}",
            self.cursor.diagnostic(),
            self.current_context(),
            self.rule_stack.len(),
            MAX_PARSE_DEPTH
        )
    }
}

impl GrammarParser for DescentParser {
    fn current_token(&self) -> Option<&Token> {
        self.cursor.current()
    }

    fn match_token(&mut self, expected: &[&str]) -> SyntaxResult<Token> {
        let matches = self.cursor.current().is_some_and(|token| {
            let symbol = token.grammar_symbol();
            expected.iter().any(|candidate| *candidate == symbol)
        });

        if !matches {
            return Err(self.unexpected(expected));
        }

        let token = match self.cursor.advance().cloned() {
            Some(token) => token,
            None => return Err(self.unexpected(expected)),
        };

        if self.preferences.trace_matches {
            log_debug!("Matched token",
                "text" => token.text,
                "line" => token.line,
                "rule" => self.current_context()
            );
        }

        Ok(token)
    }

    fn unexpected(&mut self, expected: &[&str]) -> SyntaxError {
        let error = SyntaxError::unexpected_token(
            expected,
            self.cursor.current(),
            self.cursor.diagnostic_line(),
        );
        self.record_failure();
        error
    }

    fn enter(&mut self, rule: Rule) -> SyntaxResult<()> {
        if self.rule_stack.len() >= MAX_PARSE_DEPTH {
            let error = SyntaxError::nesting_too_deep(MAX_PARSE_DEPTH, self.cursor.diagnostic_line());
            self.record_failure();
            return Err(error);
        }

        self.rule_stack.push(rule);
        self.max_depth = self.max_depth.max(self.rule_stack.len());

        if self.preferences.trace_rules {
            log_debug!("Entering rule",
                "rule" => rule.name(),
                "depth" => self.rule_stack.len(),
                "position" => self.cursor.position()
            );
        }

        Ok(())
    }

    fn leave(&mut self, rule: Rule) {
        debug_assert_eq!(self.rule_stack.last(), Some(&rule));
        self.rule_stack.pop();
    }
}
