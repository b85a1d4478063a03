use crate::logging::codes;
use crate::logging::Code;

/// Errors turning a textual token listing into tokens.
///
/// `listing_line` is the 1-based line of the listing itself, not the source
/// line a token claims to come from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoaderError {
    #[error("Listing line {listing_line}: token '{text}' has no line number")]
    MissingLineNumber { listing_line: usize, text: String },

    #[error("Listing line {listing_line}: invalid line number '{value}' (expected a positive integer)")]
    InvalidLineNumber { listing_line: usize, value: String },

    #[error("Listing line {listing_line}: expected 2 or 3 fields, found {count}")]
    TooManyFields { listing_line: usize, count: usize },

    #[error("Listing line {listing_line}: unknown token kind '{label}'")]
    UnknownTokenKind { listing_line: usize, label: String },

    #[error("Listing line {listing_line}: token text is {length} characters (max: {max_length})")]
    TokenTextTooLong {
        listing_line: usize,
        length: usize,
        max_length: usize,
    },

    #[error("Listing has more than {max_tokens} tokens")]
    TooManyTokens { max_tokens: usize },

    #[error("Listing contains no tokens")]
    EmptyListing,
}

impl LoaderError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::MissingLineNumber { .. } => codes::token_loading::MISSING_LINE_NUMBER,
            Self::InvalidLineNumber { .. } => codes::token_loading::INVALID_LINE_NUMBER,
            Self::TooManyFields { .. } => codes::token_loading::TOO_MANY_FIELDS,
            Self::UnknownTokenKind { .. } => codes::token_loading::UNKNOWN_TOKEN_KIND,
            Self::TokenTextTooLong { .. } => codes::token_loading::TOKEN_TEXT_TOO_LONG,
            Self::TooManyTokens { .. } => codes::token_loading::TOO_MANY_TOKENS,
            Self::EmptyListing => codes::token_loading::EMPTY_LISTING,
        }
    }

    /// Listing line the error refers to, when it concerns a single line
    pub fn listing_line(&self) -> Option<usize> {
        match self {
            Self::MissingLineNumber { listing_line, .. }
            | Self::InvalidLineNumber { listing_line, .. }
            | Self::TooManyFields { listing_line, .. }
            | Self::UnknownTokenKind { listing_line, .. }
            | Self::TokenTextTooLong { listing_line, .. } => Some(*listing_line),
            Self::TooManyTokens { .. } | Self::EmptyListing => None,
        }
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
}

pub type LoaderResult<T> = Result<T, LoaderError>;
