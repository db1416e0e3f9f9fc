use serde::{Deserialize, Serialize};

use crate::error::LoggerError;
use crate::levels::Severity;

/// The list of sinks to build, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default, alias = "logger")]
    pub loggers: Vec<SinkConfig>,
}

/// One configured destination.
///
/// `log_type` is resolved case-insensitively when the logger is set up, not
/// when the config is parsed, so a bad kind is reported with its position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    #[serde(rename = "logType")]
    pub log_type: String,
    pub severity: u16,
    #[serde(default)]
    pub rotate: bool,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub prefix: String,
}

impl LogConfig {
    /// Parses a JSON logging config.
    ///
    /// # Example
    ///
    /// ```
    /// use multisink_logging::LogConfig;
    ///
    /// let config = LogConfig::from_json(r#"{
    ///     "loggers": [{ "logType": "screen", "severity": 40, "prefix": "app:" }]
    /// }"#).unwrap();
    /// assert_eq!(config.loggers.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, LoggerError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with(mut self, sink: SinkConfig) -> Self {
        self.loggers.push(sink);
        self
    }
}

impl SinkConfig {
    pub fn screen(severity: Severity, prefix: impl Into<String>) -> Self {
        Self {
            log_type: "screen".to_string(),
            severity: severity.code(),
            rotate: false,
            path: String::new(),
            prefix: prefix.into(),
        }
    }

    pub fn file(
        severity: Severity, path: impl Into<String>, rotate: bool, prefix: impl Into<String>
    ) -> Self {
        Self {
            log_type: "file".to_string(),
            severity: severity.code(),
            rotate,
            path: path.into(),
            prefix: prefix.into(),
        }
    }
}
