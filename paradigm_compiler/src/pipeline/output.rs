//! Machine-readable reports and token interchange files

use super::error::PipelineError;
use super::result::{Analysis, Verdict};
use crate::classification::Label;
use crate::grammar::ProductionId;
use crate::lexical::LexerError;
use crate::symbols::SymbolTable;
use crate::syntax::SyntaxError;
use crate::tokens::{encode_tokens, Token};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LexicalErrorReport {
    pub code: String,
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl From<&LexerError> for LexicalErrorReport {
    fn from(error: &LexerError) -> Self {
        let start = error.span().start();
        Self {
            code: error.error_code().as_str().to_string(),
            message: error.to_string(),
            line: start.line,
            column: start.column,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RejectionReport {
    pub code: String,
    pub message: String,
    pub expected: Option<String>,
    pub found: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl From<&SyntaxError> for RejectionReport {
    fn from(error: &SyntaxError) -> Self {
        let start = error.span().start();
        Self {
            code: error.error_code().as_str().to_string(),
            message: error.to_string(),
            expected: error.expected().map(|s| s.to_string()),
            found: error.found().map(|l| l.to_string()),
            line: start.line,
            column: start.column,
        }
    }
}

/// JSON report for `--json`
#[derive(Debug, Serialize)]
pub struct PipelineOutput {
    pub file: String,
    pub generated_at: DateTime<Utc>,
    /// Interchange records without the sentinel
    pub tokens: Vec<String>,
    pub symbols: SymbolTable,
    pub lexical_errors: Vec<LexicalErrorReport>,
    pub label: Option<Label>,
    pub applied_productions: Vec<ProductionId>,
    pub rejection: Option<RejectionReport>,
}

impl PipelineOutput {
    pub fn from_analysis(file: &str, analysis: &Analysis) -> Self {
        let tokens: Vec<Token> = analysis.scan.token_values();
        let mut output = Self::from_verdict(file, &tokens, &analysis.verdict);
        output.symbols = analysis.scan.symbols.clone();
        output.lexical_errors = analysis.scan.errors.iter().map(Into::into).collect();
        output
    }

    /// Report for decoded token files, which carry no lexemes
    pub fn from_verdict(file: &str, tokens: &[Token], verdict: &Verdict) -> Self {
        let (label, applied_productions, rejection): (
            Option<Label>,
            Vec<ProductionId>,
            Option<RejectionReport>,
        ) = match verdict {
            Ok(classification) => (
                Some(classification.label),
                classification.acceptance.applied_productions.clone(),
                None,
            ),
            Err(error) => (None, Vec::new(), Some(error.into())),
        };

        Self {
            file: file.to_string(),
            generated_at: Utc::now(),
            tokens: tokens
                .iter()
                .filter(|t| !t.is_end())
                .map(crate::tokens::encoding::encode_token)
                .collect(),
            symbols: SymbolTable::new(),
            lexical_errors: Vec::new(),
            label,
            applied_productions,
            rejection,
        }
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::pipeline_error(&format!("JSON serialization failed: {}", e)))
    }
}

/// Write the interchange encoding of `tokens` to `path`
pub fn write_token_file(path: &Path, tokens: &[Token]) -> Result<(), PipelineError> {
    fs::write(path, encode_tokens(tokens)).map_err(|source| PipelineError::Output {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{analyze_source, Context};
    use crate::tokens::decode_tokens;
    use tempfile::tempdir;

    #[test]
    fn test_json_report_for_accepted_source() {
        let analysis = analyze_source("class Engine { }", &Context::standard());
        let output = PipelineOutput::from_analysis("engine.cpp", &analysis);

        assert_eq!(output.tokens, vec!["<1>", "<26,1>", "<17>", "<18>"]);
        assert_eq!(output.label, Some(Label::ObjectOriented));
        assert!(output.rejection.is_none());

        let json: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(json["label"], "ObjectOriented");
        assert_eq!(json["symbols"][0], "Engine");
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_json_report_for_rejection() {
        let analysis = analyze_source("x ; #", &Context::standard());
        let output = PipelineOutput::from_analysis("bad.cpp", &analysis);

        assert!(output.label.is_none());
        assert_eq!(output.lexical_errors.len(), 1);
        let rejection = output.rejection.unwrap();
        assert_eq!(rejection.code, "E051");
        assert_eq!(rejection.found.as_deref(), Some("';'"));
    }

    #[test]
    fn test_written_token_file_decodes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tok");
        let analysis = analyze_source("main ( ) { }", &Context::standard());

        write_token_file(&path, &analysis.scan.token_values()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("$\n"));
        let decoded: Vec<Token> = decode_tokens(&text)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .filter(|t| !t.is_end())
            .collect();
        assert_eq!(decoded, analysis.scan.token_values());
    }
}
