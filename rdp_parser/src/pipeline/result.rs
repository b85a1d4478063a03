use crate::file_processor::FileMetadata;
use crate::syntax::ParseSummary;
use std::time::Duration;

/// Accepted program with the measurements taken on the way
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub summary: ParseSummary,
    /// Present when the tokens came from a file
    pub file_metadata: Option<FileMetadata>,
    pub token_count: usize,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        summary: ParseSummary,
        file_metadata: Option<FileMetadata>,
        token_count: usize,
        processing_duration: Duration,
    ) -> Self {
        Self {
            summary,
            file_metadata,
            token_count,
            processing_duration,
        }
    }

    /// One-line outcome written to reports
    pub fn report_line(&self) -> String {
        format!(
            "ACCEPTED tokens={} max_depth={} last_line={}",
            self.token_count, self.summary.max_depth, self.summary.last_line
        )
    }

    pub fn log_success(&self, source: &str) {
        let seconds = self.processing_duration.as_secs_f64();
        let tokens_per_sec = if seconds > 0.0 {
            self.token_count as f64 / seconds
        } else {
            0.0
        };

        crate::log_success!(
            crate::logging::codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "Token file parsing pipeline succeeded",
            "source" => source,
            "tokens" => self.token_count,
            "duration_ms" => format!("{:.2}", seconds * 1000.0),
            "processing_rate_tokens_per_sec" => format!("{:.0}", tokens_per_sec)
        );
    }
}
