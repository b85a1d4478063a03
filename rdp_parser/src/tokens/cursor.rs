//! Cursor over an immutable token sequence with one-step pushback

use super::token::Token;

/// Owns the token sequence for one parse and a position in `[0, len]`.
///
/// Position `len` means there is no current token. The cursor never mutates
/// tokens; only the position moves.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    // === CORE NAVIGATION ===

    /// The token at the current position, without consuming it
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Return the token at the current position and move past it.
    ///
    /// At the end of the sequence this returns `None` and does not move.
    pub fn advance(&mut self) -> Option<&Token> {
        if self.position >= self.tokens.len() {
            return None;
        }
        self.position += 1;
        self.tokens.get(self.position - 1)
    }

    /// Step back one token. Returns `false` (and does nothing) at position 0.
    pub fn push_back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    // === STATE ===

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.tokens.len().saturating_sub(self.position)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Line for diagnostics: the current token's line, else the last token's,
    /// else 1 for an empty sequence
    pub fn diagnostic_line(&self) -> u32 {
        self.current()
            .or_else(|| self.tokens.last())
            .map(|token| token.line)
            .unwrap_or(1)
    }

    // === DIAGNOSTICS ===

    pub fn diagnostic(&self) -> String {
        let current = match self.current() {
            Some(token) => token.to_string(),
            None => "<EOF>".to_string(),
        };

        format!(
            "TokenCursor(pos: {}/{}, current: {})",
            self.position,
            self.tokens.len(),
            current
        )
    }

    /// Tokens within `radius` of the current position
    pub fn context_snippet(&self, radius: usize) -> &[Token] {
        let start = self.position.saturating_sub(radius);
        let end = (self.position + radius + 1).min(self.tokens.len());
        if start >= end {
            return &[];
        }
        &self.tokens[start..end]
    }
}

impl From<Vec<Token>> for TokenCursor {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(texts: &[&str]) -> TokenCursor {
        TokenCursor::new(
            texts
                .iter()
                .enumerate()
                .map(|(i, text)| Token::new(*text, i as u32 + 1))
                .collect(),
        )
    }

    #[test]
    fn test_current_does_not_consume() {
        let c = cursor(&["Program", "ID"]);
        assert_eq!(c.current().map(|t| t.text.as_str()), Some("Program"));
        assert_eq!(c.current().map(|t| t.text.as_str()), Some("Program"));
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_advance_returns_token_then_moves() {
        let mut c = cursor(&["Program", "ID"]);
        assert_eq!(c.advance().map(|t| t.text.clone()), Some("Program".to_string()));
        assert_eq!(c.current().map(|t| t.text.as_str()), Some("ID"));
        assert_eq!(c.advance().map(|t| t.text.clone()), Some("ID".to_string()));
        assert!(c.is_at_end());
        assert!(c.advance().is_none());
        assert_eq!(c.position(), 2);
    }

    #[test]
    fn test_pushback_symmetry() {
        let mut c = cursor(&["a", "b", "c"]);
        c.advance();
        let before = c.current().cloned();
        let position = c.position();

        c.advance();
        assert!(c.push_back());

        assert_eq!(c.position(), position);
        assert_eq!(c.current().cloned(), before);
    }

    #[test]
    fn test_pushback_at_start_is_noop() {
        let mut c = cursor(&["a"]);
        assert!(!c.push_back());
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_pushback_from_end() {
        let mut c = cursor(&["a"]);
        c.advance();
        assert!(c.current().is_none());
        assert!(c.push_back());
        assert_eq!(c.current().map(|t| t.text.as_str()), Some("a"));
    }

    #[test]
    fn test_empty_sequence() {
        let mut c = TokenCursor::new(Vec::new());
        assert!(c.is_empty());
        assert!(c.current().is_none());
        assert!(c.advance().is_none());
        assert_eq!(c.diagnostic_line(), 1);
        assert!(c.context_snippet(3).is_empty());
    }

    #[test]
    fn test_diagnostic_line_at_end_uses_last_token() {
        let mut c = cursor(&["a", "b"]);
        c.advance();
        c.advance();
        assert_eq!(c.diagnostic_line(), 2);
        assert!(c.diagnostic().contains("<EOF>"));
    }

    #[test]
    fn test_context_snippet() {
        let mut c = cursor(&["a", "b", "c", "d", "e"]);
        c.advance();
        c.advance();
        let texts: Vec<_> = c.context_snippet(1).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c", "d"]);
        assert_eq!(c.remaining_count(), 3);
    }
}
