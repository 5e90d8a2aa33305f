//! Per-file diagnostics for batch runs
//!
//! Errors and warnings emitted under a file context are grouped by path so
//! the CLI can print one cargo-style block per input file.

use super::codes;
use super::events::LogEvent;
use crate::config::compile_time::logging::MAX_LOG_EVENTS_PER_FILE;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The file a thread is currently working on
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self { file_path, file_id }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticTotals {
    pub files: usize,
    pub files_with_errors: usize,
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Default)]
pub struct ErrorCollector {
    events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
    files: Mutex<BTreeMap<PathBuf, usize>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `MAX_LOG_EVENTS_PER_FILE` events per file, then one W010
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = self.events.lock().unwrap();
        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < MAX_LOG_EVENTS_PER_FILE {
            file_events.push(event);
        } else if file_events.len() == MAX_LOG_EVENTS_PER_FILE {
            file_events.push(
                LogEvent::warning(
                    codes::warnings::FILE_EVENT_LIMIT,
                    "Further diagnostics for this file were dropped",
                )
                .with_context("limit", MAX_LOG_EVENTS_PER_FILE.to_string()),
            );
        }
    }

    pub fn record_file_context(&self, context: FileProcessingContext) {
        self.files
            .lock()
            .unwrap()
            .insert(context.file_path, context.file_id);
    }

    pub fn file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap()
            .get(file_path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn totals(&self) -> DiagnosticTotals {
        let events = self.events.lock().unwrap();
        let files = self.files.lock().unwrap();

        let mut totals = DiagnosticTotals {
            files: files.len().max(events.len()),
            ..Default::default()
        };
        for file_events in events.values() {
            let errors = file_events.iter().filter(|e| e.is_error()).count();
            if errors > 0 {
                totals.files_with_errors += 1;
            }
            totals.errors += errors;
            totals.warnings += file_events.iter().filter(|e| e.is_warning()).count();
        }
        totals
    }

    /// `error[E051]: message` blocks per file, errors before warnings, then totals.
    /// Empty when nothing was collected.
    pub fn format_cargo_style(&self) -> String {
        let mut output = String::new();

        for (file_path, events) in self.events.lock().unwrap().iter() {
            let errors = events.iter().filter(|e| e.is_error());
            let warnings = events.iter().filter(|e| e.is_warning());
            let ordered: Vec<&LogEvent> = errors.chain(warnings).collect();
            if ordered.is_empty() {
                continue;
            }

            let _ = writeln!(output, "Checking {}...", file_path.display());
            for event in ordered {
                write_event_block(&mut output, file_path, event);
            }
            output.push('\n');
        }

        let totals = self.totals();
        if totals.errors > 0 {
            let _ = writeln!(output, "Total errors: {}", totals.errors);
        }
        if totals.warnings > 0 {
            let _ = writeln!(output, "Total warnings: {}", totals.warnings);
        }
        output
    }
}

fn write_event_block(output: &mut String, file_path: &Path, event: &LogEvent) {
    let kind = if event.is_error() { "error" } else { "warning" };
    let _ = match event.code {
        Some(code) => writeln!(output, "{}[{}]: {}", kind, code, event.message),
        None => writeln!(output, "{}: {}", kind, event.message),
    };

    let _ = match &event.span {
        Some(span) => writeln!(
            output,
            "  --> {}:{}:{}",
            file_path.display(),
            span.start().line,
            span.start().column
        ),
        None => writeln!(output, "  --> {}", file_path.display()),
    };

    for (key, value) in event.context.iter().filter(|(k, _)| *k != "file" && *k != "file_id") {
        let _ = writeln!(output, "  = {}: {}", key, value);
    }
    if let Some(help) = event.help() {
        let _ = writeln!(output, "  = help: {}", help);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{Position, Span};

    #[test]
    fn test_events_grouped_by_file() {
        let collector = ErrorCollector::new();
        let a = PathBuf::from("a.cpp");
        let b = PathBuf::from("b.cpp");

        collector.record_file_context(FileProcessingContext::new(a.clone(), 0));
        collector.record_file_context(FileProcessingContext::new(b.clone(), 1));
        collector.record_event(
            &a,
            LogEvent::error(codes::lexical::INVALID_CHARACTER, "Invalid character '#'"),
        );
        collector.record_event(
            &b,
            LogEvent::warning(codes::warnings::LONG_IDENTIFIER, "Identifier exceeds maximum length"),
        );

        assert_eq!(collector.file_events(&a).len(), 1);
        assert_eq!(
            collector.totals(),
            DiagnosticTotals {
                files: 2,
                files_with_errors: 1,
                errors: 1,
                warnings: 1,
            }
        );
    }

    #[test]
    fn test_per_file_cap() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("noisy.cpp");

        for _ in 0..MAX_LOG_EVENTS_PER_FILE + 10 {
            collector.record_event(
                &path,
                LogEvent::error(codes::lexical::INVALID_CHARACTER, "Invalid character"),
            );
        }

        let events = collector.file_events(&path);
        assert_eq!(events.len(), MAX_LOG_EVENTS_PER_FILE + 1);
        let last = &events[MAX_LOG_EVENTS_PER_FILE];
        assert_eq!(last.code, Some(codes::warnings::FILE_EVENT_LIMIT));
        assert_eq!(
            last.context.get("limit"),
            Some(&MAX_LOG_EVENTS_PER_FILE.to_string())
        );
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("snippet.cpp");

        collector.record_event(
            &path,
            LogEvent::warning(codes::warnings::LONG_IDENTIFIER, "Identifier exceeds maximum length"),
        );
        collector.record_event(
            &path,
            LogEvent::error(codes::syntax::NO_PARSING_RULE, "No rule for <TYPE> on ';'")
                .with_span(Span::single(Position::new(4, 2, 3)))
                .with_context("lookahead", ";")
                .with_context("file", "snippet.cpp"),
        );

        let output = collector.format_cargo_style();
        assert!(output.starts_with("Checking snippet.cpp...\nerror[E051]: No rule for <TYPE> on ';'\n"));
        assert!(output.contains("  --> snippet.cpp:2:3\n"));
        assert!(output.contains("  = lookahead: ;\n"));
        assert!(!output.contains("= file:"));
        assert!(output.contains("  = help: "));
        assert!(output.contains("warning[W023]: Identifier exceeds maximum length\n  --> snippet.cpp\n"));
        assert!(output.ends_with("Total errors: 1\nTotal warnings: 1\n"));
    }

    #[test]
    fn test_empty_collector_formats_nothing() {
        assert!(ErrorCollector::new().format_cargo_style().is_empty());
    }
}
