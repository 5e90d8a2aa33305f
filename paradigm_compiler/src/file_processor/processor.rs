//! Source file loading with compile-time limits and global logging integration

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::path::{Path, PathBuf};

/// File processor specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .{expected}, found {found:?}")]
    InvalidExtension {
        expected: String,
        found: Option<String>,
    },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    /// Lower-cased extension, if any
    pub extension: Option<String>,
    pub line_count: usize,
    pub modified: Option<std::time::SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_readable_bytes(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Source text plus what was learned while loading it
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: std::time::Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Characters per millisecond
    pub fn processing_rate(&self) -> f64 {
        let duration_ms = self.processing_duration.as_secs_f64() * 1000.0;
        if duration_ms > 0.0 {
            self.char_count() as f64 / duration_ms
        } else {
            0.0
        }
    }
}

/// Loads source files under the compile-time size and line limits
pub struct FileProcessor {
    /// Extension every input must carry (no leading dot)
    pub required_extension: Option<String>,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            required_extension: None,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            required_extension: prefs
                .required_extension
                .as_ref()
                .map(|ext| ext.trim_start_matches('.').to_lowercase()),
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_required_extension(mut self, extension: Option<&str>) -> Self {
        self.required_extension = extension.map(|ext| ext.trim_start_matches('.').to_lowercase());
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a source file; empty files are valid input
    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = std::time::Instant::now();

        log_debug!("Starting file processing", "file" => file_path);

        let path = self.validate_path(file_path)?;
        let metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata, file_path)?;
        let source = self.read_file(&path, file_path)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => file_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT);
            return Err(error);
        }

        let mut final_metadata = metadata;
        final_metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata: final_metadata,
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result, file_path);

        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        let duration_str = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            let rate_str = format!("{:.2}", result.processing_rate());
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_str,
                "chars_per_ms" => rate_str
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "lines" => result.metadata.line_count
            );
        }
    }

    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(file_path);

        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path);
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path);
            return Err(error);
        }

        path.canonicalize().map_err(|e| {
            let error = FileProcessorError::IoError {
                message: format!("Failed to resolve path '{}': {}", file_path, e),
            };
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => file_path,
                "io_error" => e);
            error
        })
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let path_str = path.display().to_string();
            let error = match e.kind() {
                std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                    path: path_str.clone(),
                },
                _ => FileProcessorError::IoError {
                    message: format!("Failed to read metadata for '{}': {}", path_str, e),
                },
            };
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path_str,
                "io_error" => e);
            error
        })?;

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension: path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|s| s.to_lowercase()),
            line_count: 0,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_bytes" => file_metadata.size,
            "size_human" => file_metadata.human_readable_size(),
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "is_large_file" => file_metadata.is_large_file());

        Ok(file_metadata)
    }

    fn validate_file(
        &self,
        metadata: &FileMetadata,
        file_path: &str,
    ) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_readable_bytes(MAX_FILE_SIZE));
            return Err(error);
        }

        if let Some(expected) = &self.required_extension {
            if metadata.extension.as_deref() != Some(expected.as_str()) {
                let error = FileProcessorError::InvalidExtension {
                    expected: expected.clone(),
                    found: metadata.extension.clone(),
                };
                log_error!(error.error_code(), "File does not have the required extension",
                    "file" => file_path,
                    "extension" => metadata.extension.as_deref().unwrap_or("none"),
                    "required" => expected);
                return Err(error);
            }
        }

        if metadata.is_large_file() {
            log_warning!(codes::warnings::LARGE_FILE, "Large source file",
                "file" => file_path,
                "size_human" => metadata.human_readable_size());
        }

        Ok(())
    }

    fn read_file(&self, path: &Path, file_path: &str) -> Result<String, FileProcessorError> {
        fs::read_to_string(path).map_err(|e| {
            let error = match e.kind() {
                std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                    path: path.display().to_string(),
                },
                std::io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                    path: path.display().to_string(),
                },
                _ => FileProcessorError::IoError {
                    message: format!("Failed to read file '{}': {}", path.display(), e),
                },
            };
            log_error!(error.error_code(), "Failed to read source file",
                "file" => file_path,
                "io_error" => e);
            error
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}
