use crate::pipeline::{PipelineError, PipelineResult};
use crate::syntax::ParseSummary;
use serde::{Deserialize, Serialize};

/// Serializable outcome of one parse run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub accepted: bool,
    pub message: String,
    pub code: Option<String>,
    pub line: Option<u32>,
    pub expected: Vec<String>,
    pub tokens_consumed: Option<usize>,
    pub max_depth: Option<usize>,
}

impl PipelineOutput {
    pub fn from_outcome(outcome: &Result<PipelineResult, PipelineError>) -> Self {
        match outcome {
            Ok(result) => Self::accepted(result.report_line(), &result.summary),
            Err(error) => Self::rejected(error),
        }
    }

    fn accepted(message: String, summary: &ParseSummary) -> Self {
        Self {
            accepted: true,
            message,
            code: None,
            line: None,
            expected: Vec::new(),
            tokens_consumed: Some(summary.tokens_consumed),
            max_depth: Some(summary.max_depth),
        }
    }

    fn rejected(error: &PipelineError) -> Self {
        let syntax = error.syntax_error();
        Self {
            accepted: false,
            message: error.to_string(),
            code: Some(error.error_code().to_string()),
            line: syntax.map(|e| e.line()),
            expected: syntax.map(|e| e.expected().to_vec()).unwrap_or_default(),
            tokens_consumed: None,
            max_depth: None,
        }
    }
}
