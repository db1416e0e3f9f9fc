use std::ffi::OsString;
use std::fmt::Write as _;
use std::fs::{self, DirBuilder, File};
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};

use crate::config::SinkConfig;
use crate::error::LoggerError;
use crate::levels::Severity;

/// Date, time and microseconds stamped on every line.
const LINE_TIMESTAMP: &str = "%Y/%m/%d %H:%M:%S%.6f";

/// Suffix appended to a rotated file: `<path>.YYYYMMDDhhmmss`.
const ROTATION_TIMESTAMP: &str = "%Y%m%d%H%M%S";

/// Where a sink sends its lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkKind {
    File { path: PathBuf, rotate: bool },
    Screen,
}

/// The open write target. Each variant serializes its own writes.
enum Target {
    File(Mutex<File>),
    Screen(Stdout),
}

/// One configured output destination with its own severity threshold.
///
/// A sink is built once during setup and never changes afterwards. It owns
/// its file handle for as long as it lives; screen sinks share the process's
/// standard output.
pub struct Sink {
    kind: SinkKind,
    threshold: u16,
    prefix: String,
    target: Target,
}

/// A config entry that passed validation but has not touched the filesystem.
#[derive(Debug)]
pub(crate) struct SinkSpec {
    kind: SinkKind,
    threshold: u16,
    prefix: String,
}

impl SinkSpec {
    /// Resolves the kind string of entry `index`.
    ///
    /// The severity is kept as the raw code: a threshold between two levels
    /// admits everything up to the lower one, 0 admits nothing.
    pub(crate) fn from_config(index: usize, config: &SinkConfig) -> Result<Self, LoggerError> {
        let kind = match config.log_type.to_lowercase().as_str() {
            "file" => SinkKind::File {
                path: PathBuf::from(&config.path),
                rotate: config.rotate,
            },
            "screen" => SinkKind::Screen,
            _ => {
                return Err(LoggerError::InvalidSinkKind {
                    index,
                    kind: config.log_type.clone(),
                })
            }
        };

        Ok(Self {
            kind,
            threshold: config.severity,
            prefix: config.prefix.clone(),
        })
    }

    /// Opens the write target, creating directories and rotating as needed.
    pub(crate) fn open(self) -> Result<Sink, LoggerError> {
        let target = match &self.kind {
            SinkKind::Screen => Target::Screen(io::stdout()),
            SinkKind::File { path, rotate } => {
                if let Some(dir) = path.parent() {
                    create_log_dir(dir)?;
                }
                Target::File(Mutex::new(create_log_file(path, *rotate, Local::now())?))
            }
        };

        #[cfg(feature = "DEBUG")]
        eprintln!(
            "\x1b[90m[sink]\x1b[0m opened {:?} at threshold {}",
            self.kind, self.threshold
        );

        Ok(Sink {
            kind: self.kind,
            threshold: self.threshold,
            prefix: self.prefix,
            target,
        })
    }
}

impl Sink {
    pub fn kind(&self) -> &SinkKind {
        &self.kind
    }

    /// Highest severity code this sink prints.
    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether a message of `severity` passes this sink's threshold.
    #[inline]
    pub fn accepts(&self, severity: Severity) -> bool {
        self.threshold >= severity.code()
    }

    /// Formats and writes one line. Failures are dropped.
    ///
    /// The whole line goes out in a single `write_all` under the target's
    /// lock, so lines from concurrent callers never interleave.
    pub fn write(&self, severity: Severity, message: &str) {
        let line = render_line(&self.prefix, Local::now(), severity, message);
        match &self.target {
            Target::File(file) => {
                let mut file = file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                let _ = file.write_all(line.as_bytes());
            }
            Target::Screen(stdout) => {
                let _ = stdout.lock().write_all(line.as_bytes());
            }
        }
    }

    pub fn flush(&self) {
        match &self.target {
            Target::File(file) => {
                let mut file = file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                let _ = file.flush();
            }
            Target::Screen(stdout) => {
                let _ = stdout.lock().flush();
            }
        }
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("kind", &self.kind)
            .field("threshold", &self.threshold)
            .field("prefix", &self.prefix)
            .finish()
    }
}

/// `<prefix><timestamp> <LABEL> <message>` terminated by exactly one newline.
pub(crate) fn render_line(
    prefix: &str, now: DateTime<Local>, severity: Severity, message: &str
) -> String {
    let mut line = String::with_capacity(prefix.len() + message.len() + 36);
    line.push_str(prefix);
    let _ = write!(
        line, "{} {} {}",
        now.format(LINE_TIMESTAMP), severity.label(), message
    );
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}

fn create_log_dir(dir: &Path) -> Result<(), LoggerError> {
    // A bare file name has an empty parent: the working directory.
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }

    builder.create(dir).map_err(|source| LoggerError::CreateLogDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Always leaves a fresh, empty file at `path`, even when `rotate` is off.
fn create_log_file(path: &Path, rotate: bool, now: DateTime<Local>) -> Result<File, LoggerError> {
    match fs::metadata(path) {
        Ok(_) if rotate => {
            let backup = rotated_path(path, now);
            fs::rename(path, &backup).map_err(|source| LoggerError::RotateLogFile {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(LoggerError::CreateLogFile {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    File::create(path).map_err(|source| LoggerError::CreateLogFile {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn rotated_path(path: &Path, now: DateTime<Local>) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(now.format(ROTATION_TIMESTAMP).to_string());
    PathBuf::from(name)
}
