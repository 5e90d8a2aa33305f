use crate::classification::{Classification, Label};
use crate::file_processor::{FileMetadata, FileProcessingResult};
use crate::lexical::ScanOutput;
use crate::logging::codes;
use crate::syntax::SyntaxError;
use crate::tokens::Token;
use serde::Serialize;
use std::time::Duration;

/// Label on acceptance, structured rejection otherwise
pub type Verdict = Result<Classification, SyntaxError>;

/// Scan plus verdict for one source text
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub scan: ScanOutput,
    pub verdict: Verdict,
}

impl Analysis {
    pub fn label(&self) -> Option<Label> {
        self.verdict.as_ref().ok().map(|c| c.label)
    }

    pub fn rejection(&self) -> Option<&SyntaxError> {
        self.verdict.as_ref().err()
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict.is_ok()
    }
}

/// A source file taken through the whole pipeline
#[derive(Debug)]
pub struct PipelineResult {
    pub file_metadata: FileMetadata,
    /// Source text, kept for diagnostics with line context
    pub source: String,
    pub analysis: Analysis,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        file_result: FileProcessingResult,
        analysis: Analysis,
        processing_duration: Duration,
    ) -> Self {
        Self {
            file_metadata: file_result.metadata,
            source: file_result.source,
            analysis,
            processing_duration,
        }
    }

    pub fn token_count(&self) -> usize {
        self.analysis.scan.tokens.len()
    }

    pub fn label(&self) -> Option<Label> {
        self.analysis.label()
    }

    pub fn log_success(&self, file_path: &str) {
        let label = self
            .label()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "rejected".to_string());
        crate::log_success!(
            codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "Source file analyzed",
            "file" => file_path,
            "tokens" => self.token_count(),
            "lexical_errors" => self.analysis.scan.errors.len(),
            "verdict" => label,
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}

/// A token interchange file parsed and classified
#[derive(Debug)]
pub struct TokenFileResult {
    pub file_metadata: FileMetadata,
    /// Decoded tokens, excluding the end marker
    pub tokens: Vec<Token>,
    pub verdict: Verdict,
    pub processing_duration: Duration,
}

impl TokenFileResult {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn label(&self) -> Option<Label> {
        self.verdict.as_ref().ok().map(|c| c.label)
    }
}
