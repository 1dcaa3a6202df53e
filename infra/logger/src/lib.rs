//! # Logger
//!
//! Installs the global `tracing` subscriber for applications using confine.
//!
//! Outputs are the console, a rolling log directory and a rolling audit trail. The audit
//! trail receives only the events configurators emit on [`AUDIT_TARGET`], so a deployment can
//! keep a record of every configured value apart from its diagnostics.
//!
//! ## Example
//!
//! ```rust
//! use confine_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("my-app")
//!     .level(LevelFilter::DEBUG)
//!     .env_filter("confine_kernel=trace")
//!     .init()
//!     .unwrap();
//! ```

mod builder;
mod error;
mod filter;
mod output;

pub use crate::builder::{Console, Files, LoggerBuilder, Named, Unnamed};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use tracing_appender::non_blocking::WorkerGuard;

/// Target configurators emit their audit events on.
pub const AUDIT_TARGET: &str = "confine::audit";

/// Handle to the installed subscriber.
///
/// Owns the writer threads of the file outputs. Dropping it flushes and stops them, so keep
/// it alive until shutdown.
#[must_use = "dropping the handle stops writing log files"]
#[derive(Debug)]
pub struct Logger {
    guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Whether a log directory or an audit trail is being written.
    #[must_use]
    pub fn writes_files(&self) -> bool {
        !self.guards.is_empty()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.writes_files() {
            tracing::debug!(outputs = self.guards.len(), "Flushing log files");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected_before_install() {
        let err = Logger::builder().name("  ").init().unwrap_err();

        assert_eq!(err.kind(), "InvalidConfiguration");
        assert_eq!(err.to_string(), "Invalid logger configuration: logger name cannot be empty");
    }

    #[test]
    fn bad_directives_are_rejected_before_install() {
        let err = Logger::builder().name("app").env_filter("confine=loudest").init().unwrap_err();

        assert_eq!(err.kind(), "InvalidConfiguration");
        assert!(err.to_string().contains("invalid filter directives 'confine=loudest'"));
    }
}
