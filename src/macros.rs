//! Leveled formatting macros over a [`Logger`](crate::Logger).
//!
//! Each macro takes the logger first, then a format string with positional
//! arguments:
//!
//! ```
//! use multisink_logging::{log_info, Logger};
//!
//! let logger = Logger::default();
//! log_info!(logger, "count={}", 5);
//! ```
//!
//! The severity label is added by the sink and never goes through the user's
//! format string.

#[macro_export]
macro_rules! log_emit {
    ($logger:expr, $lvl:expr, $($arg:tt)+) => {{
        $logger.emit_fmt($lvl, format_args!($($arg)+));
    }};
}

#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)+) => { $crate::log_emit!($logger, $crate::Severity::Fatal, $($arg)+) }
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => { $crate::log_emit!($logger, $crate::Severity::Error, $($arg)+) }
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)+) => { $crate::log_emit!($logger, $crate::Severity::Warning, $($arg)+) }
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => { $crate::log_emit!($logger, $crate::Severity::Information, $($arg)+) }
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => { $crate::log_emit!($logger, $crate::Severity::Debug, $($arg)+) }
}

#[macro_export]
macro_rules! log_verbose {
    ($logger:expr, $($arg:tt)+) => { $crate::log_emit!($logger, $crate::Severity::Verbose, $($arg)+) }
}
