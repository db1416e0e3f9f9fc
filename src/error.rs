use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring the sinks.
///
/// Writing a line never fails from the caller's point of view, so every
/// variant here comes out of setup or config parsing.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("no sinks configured")]
    NoSinksConfigured,

    #[error("invalid sink kind {kind:?} in entry {index}")]
    InvalidSinkKind { index: usize, kind: String },

    #[error("invalid severity {0}")]
    InvalidSeverity(u16),

    #[error("cannot create log directory {}: {source}", path.display())]
    CreateLogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot rotate log file {}: {source}", path.display())]
    RotateLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create log file {}: {source}", path.display())]
    CreateLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid logging config: {0}")]
    Config(#[from] serde_json::Error),

    #[cfg(feature = "singleton")]
    #[error("Poisoned")]
    Poisoned,
}
