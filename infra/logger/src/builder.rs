use crate::Logger;
use crate::error::LoggerError;
use crate::filter::Directives;
use crate::output::{self, FileSettings};
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Builder state: the application has no name yet.
#[derive(Debug)]
pub struct Unnamed;

/// Builder state: named and ready to [`init`](LoggerBuilder::init).
#[derive(Debug)]
pub struct Named(String);

/// Builder state: console output only.
#[derive(Debug)]
pub struct Console;

/// Builder state: at least one rolling file output, so the rolling policy can be set.
#[derive(Debug)]
pub struct Files;

mod sealed {
    pub trait State {}
}

impl sealed::State for Unnamed {}
impl sealed::State for Named {}
impl sealed::State for Console {}
impl sealed::State for Files {}

#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) console: bool,
    pub(crate) level: LevelFilter,
    pub(crate) env_filter: Option<String>,
    pub(crate) audit_only: bool,
    pub(crate) log_dir: Option<PathBuf>,
    pub(crate) audit_dir: Option<PathBuf>,
    pub(crate) files: FileSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            console: true,
            level: LevelFilter::INFO,
            env_filter: None,
            audit_only: false,
            log_dir: None,
            audit_dir: None,
            files: FileSettings::default(),
        }
    }
}

/// Type-state builder for the global subscriber, see [`Logger::builder`].
///
/// A name is required before [`init`](Self::init); the rolling policy is only settable once a
/// file output has been added.
#[derive(Debug)]
#[must_use = "nothing is installed until `init` is called"]
pub struct LoggerBuilder<N: sealed::State = Unnamed, O: sealed::State = Console> {
    settings: Settings,
    name: N,
    outputs: PhantomData<O>,
}

impl LoggerBuilder {
    pub(crate) fn new() -> Self {
        Self { settings: Settings::default(), name: Unnamed, outputs: PhantomData }
    }
}

impl<O: sealed::State> LoggerBuilder<Unnamed, O> {
    /// Names the application. The name prefixes every rolling file.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, O> {
        LoggerBuilder { settings: self.settings, name: Named(name.into()), outputs: PhantomData }
    }
}

impl<O: sealed::State> LoggerBuilder<Named, O> {
    /// Most verbose level emitted when no directive says otherwise. Defaults to `INFO`.
    ///
    /// Audit events are `INFO`: a stricter level silences the audit trail too.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Filter directives such as `confine_configurator=debug`.
    ///
    /// Explicit directives replace `RUST_LOG`. Invalid directives make
    /// [`init`](Self::init) fail.
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.settings.env_filter = Some(directives.into());
        self
    }

    /// Compact colored output on stdout. Enabled by default.
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Drops everything but audit events ([`AUDIT_TARGET`](crate::AUDIT_TARGET) at `INFO`)
    /// on every output. `RUST_LOG` and the level are ignored; explicit directives still apply.
    pub const fn audit_only(mut self, enabled: bool) -> Self {
        self.settings.audit_only = enabled;
        self
    }

    /// Writes every event to rolling files `<name>.<date>.log` in `dir`.
    pub fn path(mut self, dir: impl Into<PathBuf>) -> LoggerBuilder<Named, Files> {
        self.settings.log_dir = Some(dir.into());
        self.into_files()
    }

    /// Writes audit events only to rolling files `<name>.<date>.audit` in `dir`.
    pub fn audit_trail(mut self, dir: impl Into<PathBuf>) -> LoggerBuilder<Named, Files> {
        self.settings.audit_dir = Some(dir.into());
        self.into_files()
    }

    fn into_files(self) -> LoggerBuilder<Named, Files> {
        LoggerBuilder { settings: self.settings, name: self.name, outputs: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive: it owns the file writers.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a blank name, bad directives, a zero file
    ///   limit or no output at all.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when a directory cannot be written.
    /// * [`LoggerError::Subscriber`] when a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0.as_str();
        if name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "logger name cannot be empty".into(),
                context: None,
            });
        }

        let filter = Directives::new(&self.settings).env_filter()?;
        let outputs = output::build(name, &self.settings)?;
        tracing_subscriber::registry().with(filter).with(outputs.layers).try_init()?;

        Ok(Logger { guards: outputs.guards })
    }
}

impl LoggerBuilder<Named, Files> {
    /// How often files roll over. Defaults to daily.
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.files.rotation = rotation;
        self
    }

    /// Rolled files kept per output. Defaults to 10.
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.files.max_files = max;
        self
    }

    /// Writes files as JSON lines.
    pub const fn json(mut self) -> Self {
        self.settings.files.json = true;
        self
    }
}
