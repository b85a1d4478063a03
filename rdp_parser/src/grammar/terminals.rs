//! Terminal symbols and the lookahead sets the rules dispatch on
//!
//! Expected-sets are kept in the order they are reported to the user.

pub const PROGRAM: &str = "Program";
pub const ID: &str = "ID";
pub const NUM: &str = "NUM";

pub const INT: &str = "int";
pub const FLOAT: &str = "float";
pub const VOID: &str = "void";

pub const IF: &str = "if";
pub const ELSE: &str = "else";
pub const WHILE: &str = "while";

pub const ASSIGN: &str = "=";
pub const SEMICOLON: &str = ";";
pub const COMMA: &str = ",";
pub const LPAREN: &str = "(";
pub const RPAREN: &str = ")";
pub const LBRACE: &str = "{";
pub const RBRACE: &str = "}";
pub const LBRACKET: &str = "[";
pub const RBRACKET: &str = "]";

/// Placeholder reported when input ends, or is expected to end
pub const END_OF_INPUT: &str = "<EOF>";

pub const TYPE_SPECIFIERS: [&str; 2] = [INT, FLOAT];
pub const PARAMS_FIRST: [&str; 3] = [VOID, INT, FLOAT];
pub const VAR_DECLARATION_TAIL: [&str; 2] = [SEMICOLON, LBRACKET];
pub const STATEMENT_FIRST: [&str; 4] = [IF, WHILE, ID, LBRACE];
pub const FACTOR_FIRST: [&str; 3] = [LPAREN, ID, NUM];

pub const RELOPS: [&str; 6] = ["<=", "<", ">", ">=", "==", "!="];
pub const ADDOPS: [&str; 2] = ["+", "-"];
pub const MULOPS: [&str; 2] = ["*", "/"];

/// Every terminal the grammar can consume
pub fn all_terminals() -> Vec<&'static str> {
    let mut terminals = vec![
        PROGRAM, ID, NUM, INT, FLOAT, VOID, IF, ELSE, WHILE, ASSIGN, SEMICOLON, COMMA, LPAREN,
        RPAREN, LBRACE, RBRACE, LBRACKET, RBRACKET,
    ];
    terminals.extend(RELOPS);
    terminals.extend(ADDOPS);
    terminals.extend(MULOPS);
    terminals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Token, TokenKind};
    use std::collections::HashSet;

    #[test]
    fn test_terminals_are_distinct() {
        let terminals = all_terminals();
        let unique: HashSet<_> = terminals.iter().collect();
        assert_eq!(unique.len(), terminals.len());
        assert!(!terminals.contains(&END_OF_INPUT));
    }

    #[test]
    fn test_classified_terminals_keep_their_symbol() {
        // A classified token must present the symbol the grammar expects
        for terminal in all_terminals() {
            let token = Token::classified(terminal, 1);
            assert_eq!(token.grammar_symbol(), terminal, "terminal {}", terminal);
            assert_ne!(token.kind, Some(TokenKind::Unknown));
        }
    }

    #[test]
    fn test_statement_first_set_excludes_return() {
        assert!(!STATEMENT_FIRST.contains(&"return"));
        assert_eq!(STATEMENT_FIRST, ["if", "while", "ID", "{"]);
    }
}
