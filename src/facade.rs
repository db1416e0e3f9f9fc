use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::levels::Severity;
use crate::prelude::Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &Record<'_>) {
        let severity = Severity::from(record.level());
        if Logger::enabled(self, severity) {
            self.emit_fmt(severity, format_args!("{}: {}", record.target(), record.args()));
        }
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

impl Logger {
    /// Registers this logger as the `log` crate's global backend.
    ///
    /// The max level is set to the most verbose level any sink accepts, so
    /// `log` macros below it cost nothing.
    ///
    /// # Returns
    ///
    /// An error if another `log` backend was installed first.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let max = self.max_level_filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max);
        Ok(())
    }

    pub(crate) fn max_level_filter(&self) -> LevelFilter {
        // `log` has no fatal level, so a fatal-only sink takes no records.
        match self.sinks().iter().map(|sink| sink.threshold()).max().unwrap_or(0) {
            0..=19 => LevelFilter::Off,
            20..=29 => LevelFilter::Error,
            30..=39 => LevelFilter::Warn,
            40..=49 => LevelFilter::Info,
            50..=59 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
