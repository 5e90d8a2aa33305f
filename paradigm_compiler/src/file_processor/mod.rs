//! Source file loading

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::log_debug;
pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Check file processing codes and limits at startup
pub fn init_file_processor_logging() -> Result<(), String> {
    let required = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::INVALID_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
        codes::file_processing::TOO_MANY_LINES,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if LARGE_FILE_THRESHOLD > MAX_FILE_SIZE {
        return Err("LARGE_FILE_THRESHOLD exceeds MAX_FILE_SIZE".to_string());
    }

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("main.c");
        fs::write(&file_path, "main ( ) { }\n").unwrap();

        let result = process_file(file_path.to_str().unwrap()).unwrap();
        assert_eq!(result.metadata.line_count, 1);
    }

    #[test]
    fn test_init_logging() {
        assert!(init_file_processor_logging().is_ok());
    }

    #[test]
    fn test_processor_from_preferences() {
        let prefs = FileProcessorPreferences {
            required_extension: None,
            enable_performance_logging: true,
        };
        let processor = create_processor_from_preferences(&prefs);
        assert!(processor.required_extension.is_none());
        assert_eq!(FileProcessor::max_file_size(), MAX_FILE_SIZE);
    }
}
