//! Token model for the syntax analyzer
//!
//! Tokens arrive already lexed: each carries an optional lexical category,
//! the literal text and the 1-based source line. The [`TokenCursor`] owns
//! the sequence for one parse and exposes the one-token lookahead the
//! grammar rules work against.

pub mod cursor;
pub mod token;

pub use cursor::TokenCursor;
pub use token::{Token, TokenKind};
