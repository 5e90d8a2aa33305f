//! End-to-end processing: file, scan, parse, classify

mod context;
mod error;
mod info;
pub mod output;
mod result;
mod validation;

pub use context::Context;
pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::{write_token_file, PipelineOutput};
pub use result::{Analysis, PipelineResult, TokenFileResult, Verdict};
pub use validation::validate_pipeline;

use crate::classification;
use crate::logging::{self, codes};
use crate::tokens::{decode_tokens, TokenStream};
use std::path::PathBuf;
use std::time::Instant;

/// Scan `source` and classify the resulting tokens.
///
/// Lexical errors never stop the parse; the scanner skips the offending
/// characters and the parser sees whatever tokens remain.
pub fn analyze_source(source: &str, context: &Context) -> Analysis {
    let scan = context.scanner().scan(source);
    let verdict = classification::classify_tokens_with_preferences(
        &scan.token_stream(),
        &context.parsing_table,
        context.syntax.clone(),
    );
    Analysis { scan, verdict }
}

/// Process one source file with the standard configuration
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    process_file_with_context(file_path, &Context::standard(), 0)
}

pub fn process_file_with_context(
    file_path: &str,
    context: &Context,
    file_id: usize,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), file_id, || {
        crate::log_info!("Starting paradigm classification pipeline", "file" => file_path);

        let file_result = context.file_processor().process_file(file_path)?;
        let analysis = analyze_source(&file_result.source, context);

        let result = PipelineResult::new(file_result, analysis, start_time.elapsed());
        result.log_success(file_path);

        Ok(result)
    })
}

/// Decode a token interchange file and classify it
pub fn process_token_file(
    file_path: &str,
    context: &Context,
) -> Result<TokenFileResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), 0, || {
        let file_result = context.file_processor().process_file(file_path)?;

        let tokens = decode_tokens(&file_result.source).map_err(|error| {
            crate::log_error!(error.error_code(), &error.to_string(),
                "file" => file_path,
                "line" => error.line());
            error
        })?;

        let stream = TokenStream::new(tokens);
        crate::log_success!(
            codes::success::TOKEN_DECODING_COMPLETE,
            "Token file decoded",
            "file" => file_path,
            "tokens" => stream.len()
        );

        let verdict = classification::classify_tokens_with_preferences(
            &stream,
            &context.parsing_table,
            context.syntax.clone(),
        );

        Ok(TokenFileResult {
            file_metadata: file_result.metadata,
            tokens: stream.iter().copied().filter(|t| !t.is_end()).collect(),
            verdict,
            processing_duration: start_time.elapsed(),
        })
    })
}
