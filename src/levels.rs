use std::fmt::Formatter;

use crate::error::LoggerError;

/// Message severity, ordered by verbosity.
///
/// Lower codes are more severe: `Fatal` (10) is the least verbose level and
/// `Verbose` (60) the most. A sink with threshold `T` prints every message
/// whose severity `S` satisfies `S <= T`.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Fatal = 10,
    Error = 20,
    Warning = 30,
    Information = 40,
    Debug = 50,
    Verbose = 60,
}

impl Severity {
    /// Every severity, most severe first.
    pub const ALL: [Severity; 6] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Information,
        Severity::Debug,
        Severity::Verbose,
    ];

    /// Fixed-width (7 character) tag written in front of each message.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL  ",
            Severity::Error => "ERROR  ",
            Severity::Warning => "WARNING",
            Severity::Information => "INFO   ",
            Severity::Debug => "DEBUG  ",
            Severity::Verbose => "VERBOSE",
        }
    }

    /// Numeric code of the severity.
    pub const fn code(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for Severity {
    type Error = LoggerError;

    fn try_from(value: u16) -> Result<Self, LoggerError> {
        Severity::ALL
            .into_iter()
            .find(|s| s.code() == value)
            .ok_or(LoggerError::InvalidSeverity(value))
    }
}

impl From<Severity> for u16 {
    fn from(s: Severity) -> Self {
        s.code()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label().trim_end())
    }
}

#[cfg(feature = "log")]
impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Information,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Verbose,
        }
    }
}
