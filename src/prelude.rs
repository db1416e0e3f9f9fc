use std::fmt;

pub use crate::config::{LogConfig, SinkConfig};
pub use crate::error::LoggerError;
pub use crate::levels::Severity;
pub use crate::sink::{Sink, SinkKind};
use crate::sink::SinkSpec;

#[cfg(feature = "singleton")]
use lazy_static::lazy_static;

#[cfg(feature = "singleton")]
use crate::sync::Lazy;

/// Fans leveled messages out to every configured sink.
///
/// `Logger` is built once from a [`LogConfig`] and is read-only afterwards, so
/// it can be shared between threads by reference. Each sink filters messages
/// against its own threshold; a message no sink accepts is dropped.
///
/// A default `Logger` has no sinks and silently ignores everything.
#[derive(Debug, Default)]
pub struct Logger {
    sinks: Vec<Sink>,
}

/// Builds a value out of a logging configuration.
pub trait Setup<T, E> {
    fn setup(config: &LogConfig) -> Result<T, E>;
}

impl Setup<Logger, LoggerError> for Logger {
    /// Builds one sink per config entry, in config order.
    ///
    /// # Arguments
    ///
    /// * `config` - The sinks to open. Must contain at least one entry.
    ///
    /// # Returns
    ///
    /// A result containing the ready `Logger` or the first `LoggerError` met.
    fn setup(config: &LogConfig) -> Result<Logger, LoggerError> {
        Logger::from_config(config)
    }
}

impl Logger {
    /// Validates every entry, then opens the sinks in order.
    ///
    /// Entries with an unknown kind are caught
    /// before any directory or file is created. A filesystem failure aborts
    /// setup at the failing entry; files opened for earlier entries stay on
    /// disk.
    ///
    /// # Arguments
    ///
    /// * `config` - The sinks to open.
    ///
    /// # Returns
    ///
    /// A result containing the ready `Logger` or a `LoggerError` on failure.
    pub fn from_config(config: &LogConfig) -> Result<Self, LoggerError> {
        if config.loggers.is_empty() {
            return Err(LoggerError::NoSinksConfigured);
        }

        let specs = config.loggers
            .iter()
            .enumerate()
            .map(|(index, entry)| SinkSpec::from_config(index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        let sinks = specs
            .into_iter()
            .map(SinkSpec::open)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { sinks })
    }

    /// Returns the process-wide logger, setting it up on the first call.
    /// Requires the "singleton" feature to be enabled.
    ///
    /// Only the first successful call uses its `config`; later calls get the
    /// same instance back. If setup fails the error is returned and the next
    /// call tries again.
    ///
    /// # Arguments
    ///
    /// * `config` - The sinks to open if no logger exists yet.
    ///
    /// # Returns
    ///
    /// A static ref to the shared `Logger` or a `LoggerError` on failure.
    #[cfg(feature = "singleton")]
    pub fn get_or_setup(config: &LogConfig) -> Result<&'static Logger, LoggerError> {
        GLOBAL.get_or_init(config)
    }

    /// The process-wide logger, if [`Logger::get_or_setup`] has succeeded.
    #[cfg(feature = "singleton")]
    pub fn global() -> Option<&'static Logger> {
        GLOBAL.get()
    }

    /// The sinks, in config order.
    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }

    /// Whether at least one sink would write a message of `severity`.
    pub fn enabled(&self, severity: Severity) -> bool {
        self.sinks.iter().any(|sink| sink.accepts(severity))
    }

    /// Writes `message` to every sink whose threshold admits `severity`.
    ///
    /// Write failures are swallowed; logging never fails the caller.
    pub fn emit(&self, severity: Severity, message: &str) {
        for sink in self.sinks.iter().filter(|sink| sink.accepts(severity)) {
            sink.write(severity, message);
        }
    }

    /// Formats `args` once and hands the result to [`Logger::emit`].
    ///
    /// Nothing is formatted when no sink accepts `severity`.
    pub fn emit_fmt(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if !self.enabled(severity) {
            return;
        }
        match args.as_str() {
            Some(message) => self.emit(severity, message),
            None => self.emit(severity, &args.to_string()),
        }
    }

    /// Flushes every sink's destination.
    pub fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }

    pub fn fatal(&self, message: &str) {
        self.emit(Severity::Fatal, message);
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(Severity::Fatal, args);
    }

    pub fn error(&self, message: &str) {
        self.emit(Severity::Error, message);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(Severity::Error, args);
    }

    /// Logs the `Display` text of `err` at error severity.
    pub fn error_from<E>(&self, err: &E)
    where
        E: std::error::Error + ?Sized,
    {
        self.errorf(format_args!("{}", err));
    }

    pub fn warning(&self, message: &str) {
        self.emit(Severity::Warning, message);
    }

    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(Severity::Warning, args);
    }

    pub fn info(&self, message: &str) {
        self.emit(Severity::Information, message);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(Severity::Information, args);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Severity::Debug, message);
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(Severity::Debug, args);
    }

    pub fn verbose(&self, message: &str) {
        self.emit(Severity::Verbose, message);
    }

    pub fn verbosef(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(Severity::Verbose, args);
    }
}

#[cfg(feature = "singleton")]
lazy_static! {
    static ref GLOBAL: Lazy<Logger, Logger> = Lazy::default();
}
