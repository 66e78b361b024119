#![deny(missing_docs)]
//! Shared logging utilities for the insight workspace.
//!
//! This crate provides the `insight_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line is tagged
//! with the id of the pipeline run that produced it, so interleaved output of
//! an interactive session can be told apart.

use std::cell::Cell;

thread_local! {
    /// Thread-local id of the pipeline run currently executing on this thread.
    static RUN_ID: Cell<u64> = const { Cell::new(0) };
}

/// Starts a new pipeline run on the current thread and returns its id.
///
/// Ids start at 1; 0 means no run has been started yet.
pub fn begin_run() -> u64 {
    RUN_ID.with(|v| {
        let next = v.get().wrapping_add(1);
        v.set(next);
        next
    })
}

/// Retrieves the id of the current pipeline run for this thread.
pub fn current_run() -> u64 {
    RUN_ID.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current run id.
#[macro_export]
macro_rules! insight_trace {
    ($($arg:tt)*) => {{
        log::trace!("run={} {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current run id.
#[macro_export]
macro_rules! insight_debug {
    ($($arg:tt)*) => {{
        log::debug!("run={} {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current run id.
#[macro_export]
macro_rules! insight_info {
    ($($arg:tt)*) => {{
        log::info!("run={} {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current run id.
#[macro_export]
macro_rules! insight_warn {
    ($($arg:tt)*) => {{
        log::warn!("run={} {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current run id.
#[macro_export]
macro_rules! insight_error {
    ($($arg:tt)*) => {{
        log::error!("run={} {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::{begin_run, current_run};

    #[test]
    fn runs_are_numbered_per_thread() {
        let before = current_run();
        let first = begin_run();
        let second = begin_run();
        assert_eq!(first, before + 1);
        assert_eq!(second, first + 1);
        assert_eq!(current_run(), second);

        let other = std::thread::spawn(current_run).join().unwrap();
        assert_eq!(other, 0);
    }
}
