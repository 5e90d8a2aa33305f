use paradigm_compiler::logging::{self, codes};
use paradigm_compiler::pipeline::{self, Analysis, Context, PipelineOutput, Verdict};
use paradigm_compiler::tokens::render_token_listing;
use paradigm_compiler::utils::SourceMap;
use paradigm_compiler::{batch, RuntimeConfig};
use std::env;
use std::path::Path;

#[derive(Debug, Default)]
struct CliOptions {
    input: Option<String>,
    token_input: bool,
    emit_tokens: Option<String>,
    json: bool,
    config_path: Option<String>,
    verbose: bool,
    help: bool,
    batch: batch::BatchConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("paradigm_compiler");

    let options = match parse_args(&args[1.min(args.len())..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} <file|directory> [options]", program);
            std::process::exit(2);
        }
    };

    if options.help {
        print_help(program);
        return Ok(());
    }

    let Some(input) = options.input.clone() else {
        eprintln!("Usage: {} <file|directory> [options]", program);
        eprintln!("       {} --tokens <file>", program);
        eprintln!("       {} --help", program);
        std::process::exit(1);
    };

    let mut config = match &options.config_path {
        Some(path) => match RuntimeConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(error) => {
                logging::safe_log_error(codes::system::CONFIGURATION_ERROR, &error.to_string());
                std::process::exit(1);
            }
        },
        None => RuntimeConfig::default(),
    };
    if options.verbose {
        config.logging = logging::config::verbose_preferences();
    }

    paradigm_compiler::init_logging(&config)?;
    pipeline::validate_pipeline()?;

    let context = Context::from_config(&config);
    let input_path = Path::new(&input);

    let ok = if options.token_input {
        process_token_file(&input, &context, &options)
    } else if input_path.is_file() {
        process_single_file(&input, &context, &options)?
    } else if input_path.is_dir() {
        process_directory_batch(input_path, context, &options)
    } else {
        eprintln!("Error: Input must be a source file or a directory");
        eprintln!("  Path: {}", input_path.display());
        false
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("Paradigm Compiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Table-driven scanner, LL(1) parser and paradigm classifier");
    println!();
    println!("USAGE:");
    println!("    {} <file> [options]               # Scan, parse and classify a file", program_name);
    println!("    {} --tokens <file> [options]      # Classify a token interchange file", program_name);
    println!("    {} <directory> [options]          # Classify every source file", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --tokens            Treat the input as a token interchange file");
    println!("    --emit-tokens PATH  Write the scanned tokens in interchange form");
    println!("    --json              Print a JSON report instead of the listing");
    println!("    --config PATH       Load runtime preferences from a TOML file");
    println!("    --verbose           Debug-level console logging");
    println!();
    println!("BATCH OPTIONS:");
    println!("    --sequential        Process files one at a time");
    println!("    --threads N         Set maximum number of worker threads");
    println!("    --no-recursive      Don't search subdirectories");
    println!("    --max-files N       Limit maximum files to process");
    println!("    --fail-fast         Stop on the first file that cannot be processed");
    println!("    --quiet             Suppress progress reporting");
    println!("    --ext EXT           Only consider files with EXT (repeatable)");
    println!();
    println!("EXIT STATUS:");
    println!("    0 when every input was classified, 1 on any rejection or failure");
    println!();

    let pipeline_info = pipeline::get_pipeline_info();
    println!("PIPELINE CONFIGURATION:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut extensions: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        let mut value = |name: &str| -> Result<String, String> {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("{} requires a value", name))
        };

        match arg {
            "--help" | "-h" => options.help = true,
            "--tokens" => options.token_input = true,
            "--json" => options.json = true,
            "--verbose" => options.verbose = true,
            "--emit-tokens" => options.emit_tokens = Some(value(arg)?),
            "--config" => options.config_path = Some(value(arg)?),
            "--sequential" => options.batch.max_threads = 1,
            "--parallel" => {}
            "--threads" => {
                let raw = value(arg)?;
                match raw.parse::<usize>() {
                    Ok(threads) => options.batch = options.batch.clone().with_threads(threads),
                    Err(_) => eprintln!("Warning: Invalid thread count '{}', using default", raw),
                }
            }
            "--no-recursive" => options.batch.recursive = false,
            "--max-files" => {
                let raw = value(arg)?;
                match raw.parse::<usize>() {
                    Ok(max_files) => options.batch.max_files = Some(max_files),
                    Err(_) => eprintln!("Warning: Invalid max files '{}', ignoring", raw),
                }
            }
            "--fail-fast" => options.batch.fail_fast = true,
            "--quiet" => options.batch.progress_reporting = false,
            "--ext" => extensions.push(value(arg)?),
            other if other.starts_with("--") => {
                eprintln!("Warning: Unknown option '{}'", other);
            }
            other => {
                if options.input.is_some() {
                    return Err(format!("Unexpected extra argument '{}'", other));
                }
                options.input = Some(other.to_string());
            }
        }
        i += 1;
    }

    if !extensions.is_empty() {
        options.batch = options.batch.clone().with_extensions(extensions);
    }

    Ok(options)
}

/// Returns whether the file was classified
fn process_single_file(
    file_path: &str,
    context: &Context,
    options: &CliOptions,
) -> Result<bool, Box<dyn std::error::Error>> {
    let result = match pipeline::process_file_with_context(file_path, context, 0) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("\nFAILED ({}): {}", error.stage(), error);
            logging::print_cargo_style_summary();
            return Ok(false);
        }
    };

    if let Some(out) = &options.emit_tokens {
        pipeline::write_token_file(Path::new(out), &result.analysis.scan.token_values())?;
    }

    if options.json {
        println!(
            "{}",
            PipelineOutput::from_analysis(file_path, &result.analysis).to_json()?
        );
    } else {
        println!("Processing file: {}\n", file_path);
        print_analysis(&result.analysis, &result.source, context);
        logging::print_cargo_style_summary();
    }

    Ok(result.analysis.is_accepted())
}

fn print_analysis(analysis: &Analysis, source: &str, context: &Context) {
    print!(
        "{}",
        render_token_listing(&analysis.scan.tokens, &analysis.scan.symbols)
    );

    if analysis.scan.has_errors() {
        println!("\nLexical errors ({}):", analysis.scan.errors.len());
        let source_map = SourceMap::new(source.to_string());
        for error in &analysis.scan.errors {
            if context.lexical.include_position_in_errors {
                print!("{}", source_map.format_error(&error.span(), &error.to_string()));
            } else {
                println!("error: {}", error);
            }
        }
    }

    println!();
    print_verdict(&analysis.verdict);
}

fn print_verdict(verdict: &Verdict) {
    match verdict {
        Ok(classification) => {
            println!("ACCEPTED: {}", classification.label);
            println!("  {}", classification.label.description());
        }
        Err(error) => {
            println!("REJECTED [{}]: {}", error.error_code(), error);
            if let (Some(expected), Some(found)) = (error.expected(), error.found()) {
                println!("  expected {}, found {}", expected, found);
            }
            println!("  help: {}", error.recommended_action());
        }
    }
}

fn process_token_file(file_path: &str, context: &Context, options: &CliOptions) -> bool {
    match pipeline::process_token_file(file_path, context) {
        Ok(result) => {
            if options.json {
                let output = PipelineOutput::from_verdict(file_path, &result.tokens, &result.verdict);
                match output.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(error) => {
                        eprintln!("{}", error);
                        return false;
                    }
                }
            } else {
                println!("Decoded {} tokens from {}\n", result.token_count(), file_path);
                print_verdict(&result.verdict);
            }
            result.verdict.is_ok()
        }
        Err(error) => {
            eprintln!("\nFAILED ({}): {}", error.stage(), error);
            logging::print_cargo_style_summary();
            false
        }
    }
}

fn process_directory_batch(dir_path: &Path, context: Context, options: &CliOptions) -> bool {
    let config = &options.batch;
    if config.progress_reporting {
        println!("Starting batch processing: {}", dir_path.display());
        println!(
            "Configuration: {} threads, recursive={}, fail_fast={}",
            config.max_threads, config.recursive, config.fail_fast
        );
    }

    match batch::process_directory_with_config(dir_path, config, context) {
        Ok(results) => {
            print_batch_results(&results);
            logging::print_cargo_style_summary();
            !results.has_problems()
        }
        Err(error) => {
            eprintln!("Batch processing failed: {}", error);
            logging::print_cargo_style_summary();
            false
        }
    }
}

fn print_batch_results(results: &batch::BatchResults) {
    println!("\nBatch Processing Summary:");
    println!("  Files discovered: {}", results.files_discovered);
    println!("  Files processed: {}", results.files_processed);
    println!("  Rejected: {}", results.rejection_count());
    println!("  Failed: {}", results.failure_count());
    println!("  Lexical errors: {}", results.lexical_error_total());
    println!(
        "  Total time: {:.2}s",
        results.processing_duration.as_secs_f64()
    );

    let counts = results.label_counts();
    if !counts.is_empty() {
        println!("\nLabels:");
        for (label, count) in &counts {
            println!("  {:<18} {}", label.to_string(), count);
        }
    }

    if results.rejection_count() > 0 {
        println!("\nRejected Files:");
        for (file_path, error) in results.rejections() {
            println!("  {}: {}", file_path.display(), error);
        }
    }

    if results.failure_count() > 0 {
        println!("\nFailed Files:");
        for (file_path, error) in &results.failed_files {
            println!("  {} ({}): {}", file_path.display(), error.stage(), error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_batch_options() {
        let options = parse_args(&args(&[
            "src/",
            "--threads",
            "4",
            "--fail-fast",
            "--no-recursive",
            "--ext",
            ".cpp",
            "--ext",
            "java",
        ]))
        .unwrap();

        assert_eq!(options.input.as_deref(), Some("src/"));
        assert_eq!(options.batch.max_threads, 4);
        assert!(options.batch.fail_fast);
        assert!(!options.batch.recursive);
        assert_eq!(options.batch.extensions, vec!["cpp", "java"]);
    }

    #[test]
    fn test_parse_global_options() {
        let options = parse_args(&args(&[
            "--tokens",
            "in.tok",
            "--json",
            "--emit-tokens",
            "out.tok",
            "--config",
            "prefs.toml",
            "--verbose",
        ]))
        .unwrap();

        assert!(options.token_input);
        assert_eq!(options.input.as_deref(), Some("in.tok"));
        assert!(options.json);
        assert_eq!(options.emit_tokens.as_deref(), Some("out.tok"));
        assert_eq!(options.config_path.as_deref(), Some("prefs.toml"));
        assert!(options.verbose);
    }

    #[test]
    fn test_parse_invalid_options() {
        let options = parse_args(&args(&["dir", "--threads", "many", "--unknown-option"])).unwrap();
        assert_ne!(options.batch.max_threads, 0);

        assert!(parse_args(&args(&["--config"])).is_err());
        assert!(parse_args(&args(&["a.cpp", "b.cpp"])).is_err());
    }

    #[test]
    fn test_sequential_flag() {
        let options = parse_args(&args(&["dir", "--sequential", "--quiet"])).unwrap();
        assert_eq!(options.batch.max_threads, 1);
        assert!(!options.batch.progress_reporting);
    }
}
