//! Batch classification of source directories
//!
//! Files are discovered, sorted, and run through the pipeline either one at a
//! time or across worker threads. Workers share a single read-only
//! [`Context`], so the only lock is the one around the collected results.

use crate::classification::Label;
use crate::config::compile_time::batch_processing::{MAX_FILES_PER_BATCH, MAX_WORKER_THREADS};
use crate::logging::{codes, Code};
use crate::pipeline::{self, Context, PipelineError, PipelineResult};
use crate::syntax::SyntaxError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Worker threads; 1 means sequential
    pub max_threads: usize,
    pub recursive: bool,
    pub max_files: Option<usize>,
    pub progress_reporting: bool,
    /// Stop at the first file the pipeline cannot process
    pub fail_fast: bool,
    /// Lower-case extensions, without the dot
    pub extensions: Vec<String>,
}

impl BatchConfig {
    pub fn sequential(mut self) -> Self {
        self.max_threads = 1;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.max_threads = threads.clamp(1, MAX_WORKER_THREADS);
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| self.extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
                .unwrap_or(false)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(8))
                .unwrap_or(4)
                .min(MAX_WORKER_THREADS),
            recursive: true,
            max_files: None,
            progress_reporting: true,
            fail_fast: false,
            extensions: ["txt", "c", "cc", "cpp", "h", "hpp", "java"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Outcome of a batch. Rejected parses count as processed files; only
/// pipeline errors are failures.
#[derive(Debug, Default)]
pub struct BatchResults {
    pub processed_files: Vec<(PathBuf, PipelineResult)>,
    pub failed_files: Vec<(PathBuf, PipelineError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_count(&self) -> usize {
        self.processed_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.processed_files.len() as f64 / self.files_processed as f64
        }
    }

    /// Accepted files per label, in label order
    pub fn label_counts(&self) -> BTreeMap<Label, usize> {
        let mut counts = BTreeMap::new();
        for label in self.processed_files.iter().filter_map(|(_, r)| r.label()) {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    pub fn rejections(&self) -> impl Iterator<Item = (&PathBuf, &SyntaxError)> {
        self.processed_files
            .iter()
            .filter_map(|(path, result)| result.analysis.rejection().map(|err| (path, err)))
    }

    pub fn rejection_count(&self) -> usize {
        self.rejections().count()
    }

    pub fn lexical_error_total(&self) -> usize {
        self.processed_files
            .iter()
            .map(|(_, result)| result.analysis.scan.errors.len())
            .sum()
    }

    pub fn has_problems(&self) -> bool {
        self.failure_count() > 0 || self.rejection_count() > 0
    }

    pub fn add_success(&mut self, file_path: PathBuf, result: PipelineResult) {
        self.processed_files.push((file_path, result));
        self.files_processed += 1;
    }

    pub fn add_failure(&mut self, file_path: PathBuf, error: PipelineError) {
        self.failed_files.push((file_path, error));
        self.files_processed += 1;
    }

    pub fn merge(&mut self, other: BatchResults) {
        self.processed_files.extend(other.processed_files);
        self.failed_files.extend(other.failed_files);
        self.files_processed += other.files_processed;
    }

    /// Restore discovery order after parallel runs
    fn sort_by_path(&mut self) {
        self.processed_files.sort_by(|a, b| a.0.cmp(&b.0));
        self.failed_files.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch processing completed: {} files processed, {} classified, {} rejected, {} failed, {:.2}s total",
            self.files_processed,
            self.success_count() - self.rejection_count(),
            self.rejection_count(),
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No source files found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("Too many files found: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("IO error during directory traversal: {error}")]
    IoError { error: String },

    #[error("Worker thread error: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> Code {
        match self {
            BatchError::DirectoryNotFound { .. } => codes::batch::DIRECTORY_NOT_FOUND,
            BatchError::NoFilesFound { .. } => codes::batch::NO_SOURCE_FILES,
            BatchError::TooManyFiles { .. } => codes::batch::TOO_MANY_FILES,
            BatchError::IoError { .. } => codes::file_processing::IO_ERROR,
            BatchError::ThreadError { .. } => codes::batch::WORKER_FAILURE,
        }
    }

    fn logged(self) -> Self {
        crate::log_error!(self.error_code(), &self.to_string());
        self
    }
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Find source files under `dir_path`, sorted by path
pub fn discover_source_files(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    crate::log_info!("Starting file discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive,
        "extensions" => config.extensions.join(",")
    );

    if !dir_path.is_dir() {
        return Err(BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        }
        .logged());
    }

    let mut files = Vec::new();
    visit_directory(dir_path, &mut files, config)?;

    if files.is_empty() {
        return Err(BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        }
        .logged());
    }

    // Deterministic order; the limit applies after sorting
    files.sort();

    if let Some(max_files) = config.max_files {
        if files.len() > max_files {
            crate::log_warning!(
                codes::warnings::FILE_LIMIT_REACHED,
                "Reached maximum file limit",
                "files_found" => files.len(),
                "limit" => max_files
            );
            files.truncate(max_files);
        }
    }

    if files.len() > MAX_FILES_PER_BATCH {
        return Err(BatchError::TooManyFiles {
            count: files.len(),
            max: MAX_FILES_PER_BATCH,
        }
        .logged());
    }

    crate::log_success!(
        codes::success::FILE_DISCOVERY_COMPLETE,
        "File discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

fn visit_directory(
    dir_path: &Path,
    files: &mut Vec<PathBuf>,
    config: &BatchConfig,
) -> Result<(), BatchError> {
    let entries = fs::read_dir(dir_path).map_err(|e| BatchError::IoError {
        error: format!("{}: {}", dir_path.display(), e),
    })?;

    for entry in entries {
        let path = entry
            .map_err(|e| BatchError::IoError {
                error: e.to_string(),
            })?
            .path();

        if path.is_dir() {
            if config.recursive {
                visit_directory(&path, files, config)?;
            }
        } else if config.accepts(&path) {
            files.push(path);
        }
    }

    Ok(())
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

pub fn process_directory_sequential(
    dir_path: &Path,
    config: &BatchConfig,
    context: &Context,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    crate::log_info!("Starting sequential batch processing",
        "directory" => dir_path.display()
    );

    let files = discover_source_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, file_path) in files.iter().enumerate() {
        if config.progress_reporting {
            println!(
                "Processing file {} of {}: {}",
                file_id + 1,
                files.len(),
                file_path.display()
            );
        }

        match run_file(file_path, context, file_id) {
            Ok(pipeline_result) => results.add_success(file_path.clone(), pipeline_result),
            Err(pipeline_error) => {
                results.add_failure(file_path.clone(), pipeline_error);
                if config.fail_fast {
                    crate::log_info!("Fail-fast mode enabled, stopping batch processing");
                    break;
                }
            }
        }
    }

    results.processing_duration = start_time.elapsed();
    log_completion(&results, 1);

    Ok(results)
}

pub fn process_directory_parallel(
    dir_path: &Path,
    config: &BatchConfig,
    context: Arc<Context>,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let threads = config.max_threads.clamp(1, MAX_WORKER_THREADS);

    crate::log_info!("Starting parallel batch processing",
        "directory" => dir_path.display(),
        "max_threads" => threads
    );

    let files = discover_source_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    let chunk_size = calculate_chunk_size(files.len(), threads);

    crate::log_debug!("Parallel processing configuration",
        "total_files" => files.len(),
        "chunk_size" => chunk_size,
        "threads" => threads
    );

    for (chunk_index, chunk) in files.chunks(chunk_size).enumerate() {
        let first_id = chunk_index * chunk_size;
        let chunk_results = process_chunk_parallel(chunk, first_id, threads, &context)?;
        results.merge(chunk_results);

        if config.fail_fast && results.failure_count() > 0 {
            crate::log_info!("Fail-fast mode enabled, stopping batch processing");
            break;
        }
    }

    results.sort_by_path();
    results.processing_duration = start_time.elapsed();
    log_completion(&results, threads);

    Ok(results)
}

fn process_chunk_parallel(
    files: &[PathBuf],
    first_id: usize,
    threads: usize,
    context: &Arc<Context>,
) -> Result<BatchResults, BatchError> {
    let results = Arc::new(Mutex::new(BatchResults::new()));
    let files_per_thread = files.len().div_ceil(threads).max(1);

    let handles: Vec<_> = files
        .chunks(files_per_thread)
        .enumerate()
        .map(|(thread_id, thread_files)| {
            let thread_files = thread_files.to_vec();
            let results = Arc::clone(&results);
            let context = Arc::clone(context);
            let base_id = first_id + thread_id * files_per_thread;

            thread::spawn(move || {
                for (offset, file_path) in thread_files.into_iter().enumerate() {
                    let outcome = run_file(&file_path, &context, base_id + offset);
                    let mut guard = results.lock().unwrap();
                    match outcome {
                        Ok(pipeline_result) => guard.add_success(file_path, pipeline_result),
                        Err(pipeline_error) => guard.add_failure(file_path, pipeline_error),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().map_err(|_| {
            BatchError::ThreadError {
                message: "Worker thread panicked during processing".to_string(),
            }
            .logged()
        })?;
    }

    let final_results = Arc::try_unwrap(results)
        .map_err(|_| BatchError::ThreadError {
            message: "Failed to collect worker results".to_string(),
        })?
        .into_inner()
        .unwrap();

    Ok(final_results)
}

fn run_file(
    file_path: &Path,
    context: &Context,
    file_id: usize,
) -> Result<PipelineResult, PipelineError> {
    pipeline::process_file_with_context(&file_path.to_string_lossy(), context, file_id)
}

fn calculate_chunk_size(file_count: usize, max_threads: usize) -> usize {
    const MIN_CHUNK_SIZE: usize = 1;
    const MAX_CHUNK_SIZE: usize = 50;

    file_count
        .div_ceil(max_threads.max(1))
        .clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

fn log_completion(results: &BatchResults, threads: usize) {
    crate::log_success!(
        codes::success::BATCH_PROCESSING_COMPLETE,
        "Batch processing completed",
        "files_processed" => results.files_processed,
        "rejected" => results.rejection_count(),
        "failed" => results.failure_count(),
        "lexical_errors" => results.lexical_error_total(),
        "threads_used" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );
}

// ============================================================================
// PUBLIC API
// ============================================================================

pub fn process_directory(dir_path: &Path) -> Result<BatchResults, BatchError> {
    process_directory_with_config(dir_path, &BatchConfig::default(), Context::standard())
}

/// Sequential when `max_threads` is 1, parallel otherwise
pub fn process_directory_with_config(
    dir_path: &Path,
    config: &BatchConfig,
    context: Context,
) -> Result<BatchResults, BatchError> {
    if config.max_threads <= 1 {
        process_directory_sequential(dir_path, config, &context)
    } else {
        process_directory_parallel(dir_path, config, Arc::new(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn quiet() -> BatchConfig {
        BatchConfig {
            progress_reporting: false,
            ..BatchConfig::default()
        }
    }

    fn write_corpus(dir: &Path) {
        fs::write(dir.join("engine.cpp"), "class Engine { }").unwrap();
        fs::write(dir.join("main.c"), "main ( ) { }").unwrap();
        fs::write(dir.join("decls.txt"), "alpha beta").unwrap();
        fs::write(dir.join("broken.java"), "class ;").unwrap();
        fs::write(dir.join("README.md"), "class Ignored { }").unwrap();
    }

    #[test]
    fn test_file_discovery() {
        let dir = tempdir().unwrap();
        write_corpus(dir.path());
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("inner.hpp"), "x").unwrap();

        let files = discover_source_files(dir.path(), &quiet()).unwrap();
        assert_eq!(files.len(), 5);
        assert!(files.windows(2).all(|w| w[0] <= w[1]));
        assert!(files.iter().all(|f| f.extension().unwrap() != "md"));

        let flat = BatchConfig {
            recursive: false,
            ..quiet()
        };
        assert_eq!(discover_source_files(dir.path(), &flat).unwrap().len(), 4);
    }

    #[test]
    fn test_discovery_errors() {
        let dir = tempdir().unwrap();
        assert_matches!(
            discover_source_files(&dir.path().join("missing"), &quiet()),
            Err(BatchError::DirectoryNotFound { .. })
        );

        fs::write(dir.path().join("notes.md"), "nothing").unwrap();
        let err = discover_source_files(dir.path(), &quiet()).unwrap_err();
        assert_matches!(err, BatchError::NoFilesFound { .. });
        assert_eq!(err.error_code(), codes::batch::NO_SOURCE_FILES);
    }

    #[test]
    fn test_max_files_and_extensions() {
        let dir = tempdir().unwrap();
        write_corpus(dir.path());

        let limited = BatchConfig {
            max_files: Some(2),
            ..quiet()
        };
        assert_eq!(discover_source_files(dir.path(), &limited).unwrap().len(), 2);

        let java_only = quiet().with_extensions([".JAVA"]);
        let files = discover_source_files(dir.path(), &java_only).unwrap();
        assert_eq!(files, vec![dir.path().join("broken.java")]);
    }

    #[test]
    fn test_sequential_batch() {
        let dir = tempdir().unwrap();
        write_corpus(dir.path());

        let results =
            process_directory_with_config(dir.path(), &quiet().sequential(), Context::standard())
                .unwrap();

        assert_eq!(results.files_discovered, 4);
        assert_eq!(results.files_processed, 4);
        assert_eq!(results.failure_count(), 0);
        assert_eq!(results.rejection_count(), 1);

        let counts = results.label_counts();
        assert_eq!(counts.get(&Label::ObjectOriented), Some(&1));
        assert_eq!(counts.get(&Label::Procedural), Some(&1));
        assert_eq!(counts.get(&Label::BareDeclarations), Some(&1));
        assert!(results.has_problems());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = tempdir().unwrap();
        write_corpus(dir.path());
        for i in 0..12 {
            fs::write(dir.path().join(format!("extra{:02}.cpp", i)), "x # y").unwrap();
        }

        let sequential =
            process_directory_with_config(dir.path(), &quiet().sequential(), Context::standard())
                .unwrap();
        let parallel = process_directory_with_config(
            dir.path(),
            &quiet().with_threads(3),
            Context::standard(),
        )
        .unwrap();

        assert_eq!(parallel.files_processed, sequential.files_processed);
        assert_eq!(parallel.label_counts(), sequential.label_counts());
        assert_eq!(parallel.lexical_error_total(), 12);
        let order: Vec<_> = parallel.processed_files.iter().map(|(p, _)| p).collect();
        let expected: Vec<_> = sequential.processed_files.iter().map(|(p, _)| p).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_fail_fast_stops_on_pipeline_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), [0xff, 0xfe]).unwrap();
        fs::write(dir.path().join("b.txt"), "class A { }").unwrap();

        let config = BatchConfig {
            fail_fast: true,
            ..quiet().sequential()
        };
        let results =
            process_directory_with_config(dir.path(), &config, Context::standard()).unwrap();

        assert_eq!(results.failure_count(), 1);
        assert_eq!(results.files_processed, 1);
        assert_matches!(results.failed_files[0].1, PipelineError::FileProcessing(_));
    }

    #[test]
    fn test_chunk_size_calculation() {
        assert_eq!(calculate_chunk_size(100, 4), 25);
        assert_eq!(calculate_chunk_size(10, 4), 3);
        assert_eq!(calculate_chunk_size(1, 4), 1);
        assert_eq!(calculate_chunk_size(200, 4), 50);
        assert_eq!(calculate_chunk_size(0, 4), 1);
    }

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert!(config.max_threads >= 1 && config.max_threads <= MAX_WORKER_THREADS);
        assert!(config.recursive);
        assert!(!config.fail_fast);
        assert!(config.extensions.iter().any(|e| e == "cpp"));
        assert_eq!(config.with_threads(0).max_threads, 1);
    }
}
