//! Consolidated error codes and classification system
//!
//! Single source of truth for every code the front end emits, together with
//! the behavioral metadata used by collectors and reporters.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Code {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR004");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const INVALID_LEXEME: Code = Code::new("E021");
}

/// Token interchange decoding error codes
pub mod token_encoding {
    use super::Code;

    pub const MALFORMED_TOKEN_LINE: Code = Code::new("E030");
    pub const INVALID_KIND_NUMBER: Code = Code::new("E031");
    pub const UNKNOWN_TOKEN_KIND: Code = Code::new("E032");
    pub const MISSING_SYMBOL_INDEX: Code = Code::new("E033");
    pub const UNEXPECTED_SYMBOL_INDEX: Code = Code::new("E034");
    pub const INVALID_SYMBOL_INDEX: Code = Code::new("E035");
    pub const CONTENT_AFTER_SENTINEL: Code = Code::new("E036");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const NO_PARSING_RULE: Code = Code::new("E051");
    pub const TRAILING_INPUT: Code = Code::new("E052");
    pub const INVALID_GRAMMAR: Code = Code::new("E086");
    pub const STEP_LIMIT_EXCEEDED: Code = Code::new("E087");
    pub const STACK_DEPTH_EXCEEDED: Code = Code::new("E088");
}

/// Batch processing error codes
pub mod batch {
    use super::Code;

    pub const DIRECTORY_NOT_FOUND: Code = Code::new("E100");
    pub const NO_SOURCE_FILES: Code = Code::new("E101");
    pub const TOO_MANY_FILES: Code = Code::new("E102");
    pub const WORKER_FAILURE: Code = Code::new("E103");
}

// ============================================================================
// WARNING AND SUCCESS CODE CONSTANTS
// ============================================================================

pub mod warnings {
    use super::Code;

    pub const LARGE_FILE: Code = Code::new("W005");
    pub const FILE_EVENT_LIMIT: Code = Code::new("W010");
    pub const LEXICAL_ERROR_LIMIT: Code = Code::new("W020");
    pub const LONG_IDENTIFIER: Code = Code::new("W023");
    pub const MISSING_SENTINEL: Code = Code::new("W030");
    pub const FILE_LIMIT_REACHED: Code = Code::new("W100");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const FILE_DISCOVERY_COMPLETE: Code = Code::new("I007");

    // Scanning and decoding
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const TOKEN_DECODING_COMPLETE: Code = Code::new("I030");

    // Parsing and classification
    pub const PARSE_ACCEPTED: Code = Code::new("I040");
    pub const CLASSIFICATION_COMPLETE: Code = Code::new("I060");

    pub const BATCH_PROCESSING_COMPLETE: Code = Code::new("I090");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

const REGISTERED_CODES: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal system error",
        "File a bug report with the input that triggered it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "System initialization failure",
        "Check the logging configuration and restart",
    ),
    ErrorMetadata::new(
        "ERR004",
        "System",
        Severity::High,
        false,
        true,
        "Runtime configuration could not be loaded",
        "Fix the configuration file or remove the --config option",
    ),
    // File processing
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Source file not found",
        "Verify the file path exists and is accessible",
    ),
    ErrorMetadata::new(
        "E006",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "File extension does not match the required extension",
        "Rename the file or change the required_extension preference",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "File exceeds the configured size limit",
        "Split the input or raise max_file_size in the build profile",
    ),
    ErrorMetadata::new(
        "E009",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Permission denied reading file",
        "Check file permissions",
    ),
    ErrorMetadata::new(
        "E010",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "File is not valid UTF-8",
        "Re-encode the file as UTF-8",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "I/O error while reading file",
        "Check disk health and retry",
    ),
    ErrorMetadata::new(
        "E012",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Path is not a regular file",
        "Pass a file path, or a directory for batch mode",
    ),
    ErrorMetadata::new(
        "E013",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File exceeds the configured line limit",
        "Split the input or raise max_line_count in the build profile",
    ),
    // Lexical
    ErrorMetadata::new(
        "E020",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Character cannot start any token",
        "Remove the character; scanning continues after it",
    ),
    ErrorMetadata::new(
        "E021",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Lexeme is not a valid identifier or keyword",
        "Identifiers must start with a letter or underscore",
    ),
    // Token encoding
    ErrorMetadata::new(
        "E030",
        "TokenEncoding",
        Severity::High,
        false,
        true,
        "Line is not a <kind> or <kind,index> token record",
        "Regenerate the token file with --emit-tokens",
    ),
    ErrorMetadata::new(
        "E031",
        "TokenEncoding",
        Severity::High,
        false,
        true,
        "Token kind or index is not a number",
        "Use decimal kind codes",
    ),
    ErrorMetadata::new(
        "E032",
        "TokenEncoding",
        Severity::High,
        false,
        true,
        "Token kind code is not part of the vocabulary",
        "Use codes 1-26 as listed by --help",
    ),
    ErrorMetadata::new(
        "E033",
        "TokenEncoding",
        Severity::High,
        false,
        true,
        "Identifier record is missing its symbol index",
        "Write identifiers as <26,index>",
    ),
    ErrorMetadata::new(
        "E034",
        "TokenEncoding",
        Severity::High,
        false,
        true,
        "Keyword or symbol record carries a symbol index",
        "Only identifiers take an index",
    ),
    ErrorMetadata::new(
        "E035",
        "TokenEncoding",
        Severity::High,
        false,
        true,
        "Symbol index must be 1 or greater",
        "Symbol table indices start at 1",
    ),
    ErrorMetadata::new(
        "E036",
        "TokenEncoding",
        Severity::High,
        false,
        true,
        "Token records found after the $ sentinel",
        "Remove everything after the sentinel line",
    ),
    // Syntax
    ErrorMetadata::new(
        "E050",
        "Syntax",
        Severity::High,
        false,
        true,
        "Lookahead token does not match the expected terminal",
        "Check the token at the reported position",
    ),
    ErrorMetadata::new(
        "E051",
        "Syntax",
        Severity::High,
        false,
        true,
        "Parsing table has no production for this nonterminal and lookahead",
        "The token is outside the structural grammar",
    ),
    ErrorMetadata::new(
        "E052",
        "Syntax",
        Severity::High,
        false,
        true,
        "Tokens remain after the parse stack emptied",
        "Remove the trailing tokens",
    ),
    ErrorMetadata::new(
        "E086",
        "Syntax",
        Severity::Critical,
        false,
        true,
        "Parsing table is inconsistent",
        "Fix the grammar definition",
    ),
    ErrorMetadata::new(
        "E087",
        "Syntax",
        Severity::High,
        false,
        true,
        "Parser exceeded the maximum number of steps",
        "Check the grammar for non-consuming cycles",
    ),
    ErrorMetadata::new(
        "E088",
        "Syntax",
        Severity::High,
        false,
        true,
        "Parse stack exceeded the maximum depth",
        "Reduce nesting or raise max_stack_depth",
    ),
    // Batch
    ErrorMetadata::new(
        "E100",
        "Batch",
        Severity::High,
        false,
        true,
        "Batch directory not found",
        "Verify the directory path",
    ),
    ErrorMetadata::new(
        "E101",
        "Batch",
        Severity::Medium,
        false,
        true,
        "No matching source files in directory",
        "Check the --ext filter",
    ),
    ErrorMetadata::new(
        "E102",
        "Batch",
        Severity::Medium,
        false,
        true,
        "Too many files for one batch",
        "Use --max-files or split the directory",
    ),
    ErrorMetadata::new(
        "E103",
        "Batch",
        Severity::Critical,
        false,
        true,
        "Batch worker thread failed",
        "Re-run with --sequential to isolate the file",
    ),
    // Warnings
    ErrorMetadata::new(
        "W005",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "File is larger than the large-file threshold",
        "No action required",
    ),
    ErrorMetadata::new(
        "W010",
        "Logging",
        Severity::Low,
        true,
        false,
        "Per-file event limit reached; later events for the file are dropped",
        "Fix the reported problems and re-run",
    ),
    ErrorMetadata::new(
        "W020",
        "Lexical",
        Severity::Medium,
        true,
        false,
        "Lexical error log limit reached; further errors are only counted",
        "Inspect the input encoding",
    ),
    ErrorMetadata::new(
        "W023",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Identifier is longer than the configured maximum; it is still tokenized",
        "Shorten the identifier",
    ),
    ErrorMetadata::new(
        "W030",
        "TokenEncoding",
        Severity::Low,
        true,
        false,
        "Token file has no $ sentinel; end of input assumed",
        "Terminate token files with a $ line",
    ),
    ErrorMetadata::new(
        "W100",
        "Batch",
        Severity::Low,
        true,
        false,
        "File discovery stopped at the --max-files limit",
        "Raise --max-files to include the remaining files",
    ),
    // Success
    ErrorMetadata::new("I001", "Success", Severity::Low, true, false, "Operation completed", "None"),
    ErrorMetadata::new("I004", "Success", Severity::Low, true, false, "System initialized", "None"),
    ErrorMetadata::new("I006", "Success", Severity::Low, true, false, "File read and validated", "None"),
    ErrorMetadata::new("I007", "Success", Severity::Low, true, false, "Source files discovered", "None"),
    ErrorMetadata::new("I020", "Success", Severity::Low, true, false, "Scanning completed", "None"),
    ErrorMetadata::new("I030", "Success", Severity::Low, true, false, "Token file decoded", "None"),
    ErrorMetadata::new("I040", "Success", Severity::Low, true, false, "Token stream accepted by the parser", "None"),
    ErrorMetadata::new("I060", "Success", Severity::Low, true, false, "Paradigm label assigned", "None"),
    ErrorMetadata::new("I090", "Success", Severity::Low, true, false, "Batch completed", "None"),
];

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTERED_CODES
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// LOOKUP FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// All registered code strings, sorted
pub fn registered_codes() -> Vec<&'static str> {
    let mut codes: Vec<_> = get_error_registry().keys().copied().collect();
    codes.sort_unstable();
    codes
}

pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
