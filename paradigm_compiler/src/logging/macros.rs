//! `log_error!`, `log_warning!`, `log_success!`, `log_info!`, `log_debug!`
//!
//! Each takes an optional `span = ...` (errors and warnings) followed by
//! `"key" => value` pairs; values are formatted with `Display`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($level:ident, $code:expr, $message:expr, $span:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::emit(
            $crate::logging::LogLevel::$level,
            $code,
            $message,
            $span,
            vec![$(($key, ::std::format!("{}", $value))),*],
        )
    };
}

/// Error event; recorded against the current file context
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(Error, Some($code), $message, Some($span) $(, $key => $value)*)
    };
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(Error, Some($code), $message, None $(, $key => $value)*)
    };
}

/// Warning event; recorded against the current file context
#[macro_export]
macro_rules! log_warning {
    ($code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(Warning, Some($code), $message, Some($span) $(, $key => $value)*)
    };
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(Warning, Some($code), $message, None $(, $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(Info, Some($code), $message, None $(, $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_event!(Info, None, $message, None $(, $key => $value)*)
    };
}

/// Context values are only formatted when debug output is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::config::min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::__log_event!(Debug, None, $message, None $(, $key => $value)*)
        }
    };
}
