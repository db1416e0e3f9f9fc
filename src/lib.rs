#![cfg_attr(docsrs, feature(doc_cfg))]

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
//! <br><br>
//!
//! ## You're probably looking for:
//! * [`Logger`](Logger)
//! * [`LogConfig`](LogConfig)

pub mod prelude;
pub mod error;
pub mod config;
pub mod sink;
pub(crate) mod levels;
mod macros;
#[cfg(feature = "singleton")]
pub(crate) mod sync;
#[cfg(feature = "log")]
mod facade;

pub use prelude::{
    Logger, Setup, LogConfig, SinkConfig, LoggerError, Severity, Sink, SinkKind
};
