//! Token values handed to the parser by the upstream lexer or loader

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical category of a token, using the upstream lexer's labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Program,
    Identifier,
    Number,
    /// `int` or `float`
    TypeName,
    Void,
    If,
    Else,
    While,
    AddOp,
    MulOp,
    RelOp,
    Assign,
    Semicolon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    /// Text that fits no category; it can still be matched literally
    Unknown,
}

impl TokenKind {
    /// Every label a token listing may use, in lexer precedence order
    pub const LABELS: [&'static str; 20] = [
        "PROGRAM", "ID", "NUM", "TYPE", "VOID", "IF", "ELSE", "WHILE", "ADDOP", "MULOP",
        "RELOP", "ASSIGN", "SEMI", "COMMA", "LPAREN", "RPAREN", "LBRACE", "RBRACE",
        "LBRACKET", "RBRACKET",
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        let kind = match label {
            "PROGRAM" => Self::Program,
            "ID" => Self::Identifier,
            "NUM" => Self::Number,
            "TYPE" => Self::TypeName,
            "VOID" => Self::Void,
            "IF" => Self::If,
            "ELSE" => Self::Else,
            "WHILE" => Self::While,
            "ADDOP" => Self::AddOp,
            "MULOP" => Self::MulOp,
            "RELOP" => Self::RelOp,
            "ASSIGN" => Self::Assign,
            "SEMI" => Self::Semicolon,
            "COMMA" => Self::Comma,
            "LPAREN" => Self::LParen,
            "RPAREN" => Self::RParen,
            "LBRACE" => Self::LBrace,
            "RBRACE" => Self::RBrace,
            "LBRACKET" => Self::LBracket,
            "RBRACKET" => Self::RBracket,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Program => "PROGRAM",
            Self::Identifier => "ID",
            Self::Number => "NUM",
            Self::TypeName => "TYPE",
            Self::Void => "VOID",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::While => "WHILE",
            Self::AddOp => "ADDOP",
            Self::MulOp => "MULOP",
            Self::RelOp => "RELOP",
            Self::Assign => "ASSIGN",
            Self::Semicolon => "SEMI",
            Self::Comma => "COMMA",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::LBracket => "LBRACKET",
            Self::RBracket => "RBRACKET",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Classify a lexeme. Keywords win over identifiers, and the lexer's
    /// placeholder texts `ID` and `NUM` classify as their own category.
    pub fn classify(text: &str) -> Self {
        match text {
            "Program" => return Self::Program,
            "int" | "float" => return Self::TypeName,
            "void" => return Self::Void,
            "if" => return Self::If,
            "else" => return Self::Else,
            "while" => return Self::While,
            "ID" => return Self::Identifier,
            "NUM" => return Self::Number,
            "+" | "-" => return Self::AddOp,
            "*" | "/" => return Self::MulOp,
            "<=" | "<" | ">" | ">=" | "==" | "!=" => return Self::RelOp,
            "=" => return Self::Assign,
            ";" => return Self::Semicolon,
            "," => return Self::Comma,
            "(" => return Self::LParen,
            ")" => return Self::RParen,
            "{" => return Self::LBrace,
            "}" => return Self::RBrace,
            "[" => return Self::LBracket,
            "]" => return Self::RBracket,
            _ => {}
        }

        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Number;
        }

        if is_identifier(text) {
            return Self::Identifier;
        }

        Self::Unknown
    }

    /// Placeholder category name the grammar uses for this kind, if any
    pub fn grammar_category(&self) -> Option<&'static str> {
        match self {
            Self::Identifier => Some("ID"),
            Self::Number => Some("NUM"),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// One lexical token: optional category, literal text and 1-based source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: Option<TokenKind>,
    pub text: String,
    pub line: u32,
}

impl Token {
    /// Unclassified token; the grammar compares its text literally
    pub fn new(text: impl Into<String>, line: u32) -> Self {
        Self {
            kind: None,
            text: text.into(),
            line,
        }
    }

    /// Token classified from its own text
    pub fn classified(text: impl Into<String>, line: u32) -> Self {
        let text = text.into();
        Self {
            kind: Some(TokenKind::classify(&text)),
            text,
            line,
        }
    }

    pub fn with_kind(kind: TokenKind, text: impl Into<String>, line: u32) -> Self {
        Self {
            kind: Some(kind),
            text: text.into(),
            line,
        }
    }

    /// The symbol compared against grammar expectations.
    ///
    /// Identifiers and numbers stand for their category (`ID`, `NUM`); every
    /// other token, and every unclassified token, is its literal text.
    pub fn grammar_symbol(&self) -> &str {
        self.kind
            .and_then(|kind| kind.grammar_category())
            .unwrap_or(self.text.as_str())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{}({}) at line {}", kind, self.text, self.line),
            None => write!(f, "'{}' at line {}", self.text, self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_from_label() {
        for label in TokenKind::LABELS {
            let kind = TokenKind::from_label(label).unwrap();
            assert_eq!(kind.as_label(), label);
        }
        assert_eq!(TokenKind::from_label("STRING"), None);
    }

    #[test]
    fn test_classify_keywords_before_identifiers() {
        assert_eq!(TokenKind::classify("Program"), TokenKind::Program);
        assert_eq!(TokenKind::classify("while"), TokenKind::While);
        assert_eq!(TokenKind::classify("float"), TokenKind::TypeName);
        assert_eq!(TokenKind::classify("whilex"), TokenKind::Identifier);
        assert_eq!(TokenKind::classify("_tmp1"), TokenKind::Identifier);
    }

    #[test]
    fn test_classify_operators_and_literals() {
        assert_eq!(TokenKind::classify("<="), TokenKind::RelOp);
        assert_eq!(TokenKind::classify("="), TokenKind::Assign);
        assert_eq!(TokenKind::classify("-"), TokenKind::AddOp);
        assert_eq!(TokenKind::classify("007"), TokenKind::Number);
        assert_eq!(TokenKind::classify("1x"), TokenKind::Unknown);
        assert_eq!(TokenKind::classify("@"), TokenKind::Unknown);
    }

    #[test]
    fn test_grammar_symbol() {
        assert_eq!(Token::new("count", 1).grammar_symbol(), "count");
        assert_eq!(Token::classified("count", 1).grammar_symbol(), "ID");
        assert_eq!(Token::classified("42", 1).grammar_symbol(), "NUM");
        assert_eq!(Token::classified("ID", 1).grammar_symbol(), "ID");
        assert_eq!(Token::classified("while", 1).grammar_symbol(), "while");
        assert_eq!(
            Token::with_kind(TokenKind::TypeName, "void", 1).grammar_symbol(),
            "void"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::new("{", 2).to_string(), "'{' at line 2");
        assert_eq!(Token::classified("x", 3).to_string(), "ID(x) at line 3");
    }
}
