// Internal modules
pub mod batch;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod loader;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod syntax;
pub mod tokens;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use pipeline::{PipelineError, PipelineOutput, PipelineResult};
pub use syntax::{parse_token_cursor, parse_tokens, ParseSummary, SyntaxError};
pub use tokens::{Token, TokenCursor, TokenKind};
