// build.rs - TOML-driven compile-time limits for the scanner/parser pipeline
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    syntax: SyntaxLimits,
    batch_processing: BatchProcessingLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
    max_line_count: usize,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_identifier_length: usize,
    max_lexical_errors: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_parse_steps: usize,
    max_stack_depth: usize,
}

#[derive(serde::Deserialize)]
struct BatchProcessingLimits {
    max_worker_threads: usize,
    max_files_per_batch: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_events_per_file: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PARADIGM_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=PARADIGM_CONFIG_DIR");

    let profile = env::var("PARADIGM_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("PARADIGM_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Config lives next to the workspace manifest, one level above this crate
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;

    let non_zero = [
        ("file_processing.max_file_size", config.file_processing.max_file_size as usize),
        ("file_processing.max_line_count", config.file_processing.max_line_count),
        ("lexical.max_identifier_length", config.lexical.max_identifier_length),
        ("lexical.max_lexical_errors", config.lexical.max_lexical_errors),
        ("syntax.max_parse_steps", config.syntax.max_parse_steps),
        ("syntax.max_stack_depth", config.syntax.max_stack_depth),
        ("batch_processing.max_worker_threads", config.batch_processing.max_worker_threads),
        ("batch_processing.max_files_per_batch", config.batch_processing.max_files_per_batch),
        ("logging.log_buffer_size", config.logging.log_buffer_size),
        ("logging.max_log_events_per_file", config.logging.max_log_events_per_file),
        ("logging.max_log_message_length", config.logging.max_log_message_length),
    ];
    for (name, value) in non_zero {
        if value == 0 {
            panic!("CONFIG: {} must be greater than zero", name);
        }
    }

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("CONFIG: max_file_size exceeds absolute maximum");
    }

    if config.file_processing.large_file_threshold > config.file_processing.max_file_size {
        panic!("CONFIG: large_file_threshold cannot exceed max_file_size");
    }

    if config.logging.max_log_events_per_file > config.logging.log_buffer_size {
        panic!("CONFIG: max_log_events_per_file cannot exceed log_buffer_size");
    }

    if profile == "production" && config.file_processing.max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const LARGE_FILE_THRESHOLD: u64 = {};
        pub const MAX_LINE_COUNT: usize = {};
    }}

    pub mod lexical {{
        pub const MAX_IDENTIFIER_LENGTH: usize = {};
        pub const MAX_LEXICAL_ERRORS: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_PARSE_STEPS: usize = {};
        pub const MAX_STACK_DEPTH: usize = {};
    }}

    pub mod batch_processing {{
        pub const MAX_WORKER_THREADS: usize = {};
        pub const MAX_FILES_PER_BATCH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        // File Processing
        config.file_processing.max_file_size,
        config.file_processing.large_file_threshold,
        config.file_processing.max_line_count,
        // Lexical
        config.lexical.max_identifier_length,
        config.lexical.max_lexical_errors,
        // Syntax
        config.syntax.max_parse_steps,
        config.syntax.max_stack_depth,
        // Batch Processing
        config.batch_processing.max_worker_threads,
        config.batch_processing.max_files_per_batch,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_events_per_file,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
