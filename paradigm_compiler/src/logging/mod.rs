//! Global logging for the paradigm compiler
//!
//! A process-wide [`LoggingService`] plus a per-file [`ErrorCollector`] for
//! batch runs. Logging before `init_global_logging` is a silent no-op, so
//! library callers that never initialise logging pay nothing for it.

pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::utils::Span;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::OnceLock;

pub use codes::Code;
pub use collector::{ErrorCollector, FileProcessingContext};
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, LogFormat, Logger, LoggingService, MemoryLogger};

static GLOBAL_SERVICE: OnceLock<LoggingService> = OnceLock::new();
static GLOBAL_COLLECTOR: OnceLock<ErrorCollector> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileProcessingContext>> = const { RefCell::new(None) };
}

/// Start the console service described by the installed preferences
pub fn init_global_logging() -> Result<(), String> {
    let service = LoggingService::from_preferences(config::preferences());
    init_global_logging_with_service(service)?;

    emit(
        LogLevel::Info,
        Some(codes::success::SYSTEM_INITIALIZATION_COMPLETED),
        "Global logging initialized",
        None,
        vec![("min_level", config::min_log_level().to_string())],
    );
    Ok(())
}

/// Install a caller-built service, e.g. one backed by a [`MemoryLogger`]
pub fn init_global_logging_with_service(service: LoggingService) -> Result<(), String> {
    GLOBAL_SERVICE
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())?;
    GLOBAL_COLLECTOR
        .set(ErrorCollector::new())
        .map_err(|_| "Global error collector already initialized".to_string())
}

pub fn global_collector() -> Option<&'static ErrorCollector> {
    GLOBAL_COLLECTOR.get()
}

/// Run `f` with events attributed to `file_path` on this thread
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    let context = FileProcessingContext::new(file_path, file_id);
    if let Some(collector) = global_collector() {
        collector.record_file_context(context.clone());
    }

    let previous = FILE_CONTEXT.with(|slot| slot.replace(Some(context)));
    let result = f();
    FILE_CONTEXT.with(|slot| *slot.borrow_mut() = previous);
    result
}

pub fn current_file_context() -> Option<FileProcessingContext> {
    FILE_CONTEXT.with(|slot| slot.borrow().clone())
}

fn build_event(
    level: LogLevel,
    code: Option<Code>,
    message: &str,
    span: Option<Span>,
    context: Vec<(&'static str, String)>,
    file: Option<&FileProcessingContext>,
) -> LogEvent {
    let mut event = LogEvent::new(level, code, message);
    event.span = span;
    event.context.extend(context.into_iter().map(|(k, v)| (k.to_string(), v)));

    if let Some(file) = file.filter(|_| config::preferences().include_file_context) {
        event = event
            .with_context("file", file.file_path.display().to_string())
            .with_context("file_id", file.file_id.to_string());
    }
    event
}

/// Backs the logging macros. Errors and warnings raised under a file
/// context are also kept by the collector.
pub fn emit(
    level: LogLevel,
    code: Option<Code>,
    message: &str,
    span: Option<Span>,
    context: Vec<(&'static str, String)>,
) {
    let service = GLOBAL_SERVICE.get();
    let collector = GLOBAL_COLLECTOR.get();
    if service.is_none() && collector.is_none() {
        return;
    }

    let file = current_file_context();
    let event = build_event(level, code, message, span, context, file.as_ref());

    if let (Some(collector), Some(file)) = (collector, &file) {
        if level <= LogLevel::Warning {
            collector.record_event(&file.file_path, event.clone());
        }
    }
    if let Some(service) = service {
        service.log(&event);
    }
}

/// Print collected diagnostics to stderr in cargo style
pub fn print_cargo_style_summary() {
    if !config::preferences().enable_cargo_style_output {
        return;
    }
    if let Some(collector) = global_collector() {
        let report = collector.format_cargo_style();
        if !report.is_empty() {
            eprintln!("{}", report);
        }
    }
}

/// Log an error, or print it directly when logging never started
pub fn safe_log_error(code: Code, message: &str) {
    match GLOBAL_SERVICE.get() {
        Some(service) => service.log(&LogEvent::error(code, message)),
        None => eprintln!("[ERROR] {} - {}", code, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_is_scoped() {
        assert!(current_file_context().is_none());

        let id = with_file_context(PathBuf::from("outer.cpp"), 1, || {
            let inner = with_file_context(PathBuf::from("inner.cpp"), 2, || {
                current_file_context().map(|c| c.file_id)
            });
            assert_eq!(inner, Some(2));
            current_file_context().map(|c| c.file_id)
        });

        assert_eq!(id, Some(1));
        assert!(current_file_context().is_none());
    }

    #[test]
    fn test_logging_without_initialization_is_harmless() {
        crate::log_error!(codes::lexical::INVALID_CHARACTER, "Invalid character '#'",
            span = Span::default(),
            "character" => '#');
        crate::log_warning!(codes::warnings::LARGE_FILE, "Large file");
        crate::log_debug!("Debug only", "steps" => 3);
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }

    #[test]
    fn test_build_event_attaches_file_context() {
        let file = FileProcessingContext::new(PathBuf::from("a.cpp"), 7);
        let event = build_event(
            LogLevel::Error,
            Some(codes::syntax::TRAILING_INPUT),
            "Trailing input",
            None,
            vec![("found", ";".to_string())],
            Some(&file),
        );

        assert_eq!(event.context.get("found").map(String::as_str), Some(";"));
        if config::preferences().include_file_context {
            assert_eq!(event.context.get("file").map(String::as_str), Some("a.cpp"));
            assert_eq!(event.context.get("file_id").map(String::as_str), Some("7"));
        }
    }
}
