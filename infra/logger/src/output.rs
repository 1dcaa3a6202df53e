use crate::AUDIT_TARGET;
use crate::builder::Settings;
use crate::error::{LoggerError, LoggerErrorExt};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_SUFFIX: &str = "log";
const AUDIT_SUFFIX: &str = "audit";

/// Subscriber the output layers are stacked on.
type Base = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Base> + Send + Sync + 'static>;

/// Rolling policy shared by every file output.
#[derive(Debug, Clone)]
pub(crate) struct FileSettings {
    pub(crate) rotation: Rotation,
    pub(crate) max_files: usize,
    pub(crate) json: bool,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self { rotation: Rotation::DAILY, max_files: DEFAULT_MAX_FILES, json: false }
    }
}

pub(crate) struct Outputs {
    pub(crate) layers: Vec<BoxedLayer>,
    pub(crate) guards: Vec<WorkerGuard>,
}

/// Builds one layer per enabled output. Directories are created on the way.
pub(crate) fn build(name: &str, settings: &Settings) -> Result<Outputs, LoggerError> {
    if settings.files.max_files == 0 {
        return Err(invalid("max_files must be greater than zero"));
    }

    let mut outputs = Outputs { layers: Vec::new(), guards: Vec::new() };

    if settings.console {
        outputs.layers.push(fmt::layer().compact().with_ansi(true).boxed());
    }
    if let Some(dir) = &settings.log_dir {
        let (layer, guard) = rolling(dir, name, LOG_SUFFIX, &settings.files)?;
        outputs.layers.push(layer);
        outputs.guards.push(guard);
    }
    if let Some(dir) = &settings.audit_dir {
        let (layer, guard) = rolling(dir, name, AUDIT_SUFFIX, &settings.files)?;
        let audit = filter_fn(|meta| meta.target() == AUDIT_TARGET);
        outputs.layers.push(layer.with_filter(audit).boxed());
        outputs.guards.push(guard);
    }

    if outputs.layers.is_empty() {
        return Err(invalid("no output enabled, enable the console or add a file output"));
    }
    Ok(outputs)
}

fn rolling(
    dir: &Path,
    prefix: &str,
    suffix: &str,
    files: &FileSettings,
) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
    fs::create_dir_all(dir).context(format!("Failed to create path: {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(files.rotation.clone())
        .filename_prefix(prefix)
        .filename_suffix(suffix)
        .max_log_files(files.max_files)
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let layer = if files.json { layer.json().boxed() } else { layer.boxed() };
    Ok((layer, guard))
}

fn invalid(message: &'static str) -> LoggerError {
    LoggerError::InvalidConfiguration { message: message.into(), context: None }
}
