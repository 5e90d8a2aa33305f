use crate::config::ConfigError;
use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};
use crate::tokens::EncodingError;

/// Failures that stop a file from being analyzed at all.
///
/// A syntax rejection is not one of them: it is a verdict and travels inside
/// the analysis.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Token decoding failed: {0}")]
    TokenDecoding(#[from] EncodingError),

    #[error("Configuration failed: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Cannot write '{path}': {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

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
            Self::FileProcessing(err) => err.error_code(),
            Self::TokenDecoding(err) => err.error_code(),
            Self::Configuration(_) => codes::system::CONFIGURATION_ERROR,
            Self::Output { .. } => codes::file_processing::IO_ERROR,
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// Short stage name for summaries
    pub fn stage(&self) -> &'static str {
        match self {
            Self::FileProcessing(_) => "file processing",
            Self::TokenDecoding(_) => "token decoding",
            Self::Configuration(_) => "configuration",
            Self::Output { .. } => "output",
            Self::Pipeline { .. } => "pipeline",
        }
    }
}
