#![deny(missing_docs)]
//! Shared logging utilities for the notifier workspace.
//!
//! The `engine_*` macros forward to the `log` facade and tag every line with
//! the polling cycle running on the current thread, so all lines of one cycle
//! read as `[cycle N] ...` no matter which crate wrote them.

use std::cell::Cell;
use std::fmt;

thread_local! {
    static CYCLE: Cell<u64> = const { Cell::new(0) };
}

/// Marks the start of polling cycle `cycle` on this thread.
pub fn set_cycle(cycle: u64) {
    CYCLE.with(|v| v.set(cycle));
}

/// Cycle running on this thread; 0 before the first one.
pub fn current_cycle() -> u64 {
    CYCLE.with(|v| v.get())
}

/// Renders `[cycle N] ` for the current thread, or nothing outside a cycle.
#[derive(Debug, Clone, Copy)]
pub struct CyclePrefix;

impl fmt::Display for CyclePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match current_cycle() {
            0 => Ok(()),
            cycle => write!(f, "[cycle {cycle}] "),
        }
    }
}

/// Logs an info-level message tagged with the current cycle.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::CyclePrefix, format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current cycle.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::CyclePrefix, format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current cycle.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::CyclePrefix, format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current cycle.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::CyclePrefix, format_args!($($arg)*));
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

    // Another test may have set the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
