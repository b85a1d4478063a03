use crate::file_processor::FileProcessorError;
use crate::loader::LoaderError;
use crate::logging::{codes, Code};
use crate::syntax::SyntaxError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Token loading failed: {0}")]
    TokenLoading(#[from] LoaderError),

    #[error("{0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Cannot write report {path}: {message}")]
    Report { path: String, message: String },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(error) => error.error_code(),
            Self::TokenLoading(error) => error.error_code(),
            Self::SyntaxAnalysis(error) => error.error_code(),
            Self::Report { .. } => codes::file_processing::IO_ERROR,
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// The syntax error, when the input got as far as the parser
    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        match self {
            Self::SyntaxAnalysis(error) => Some(error),
            _ => None,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }
}
