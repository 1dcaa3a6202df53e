//! Layered loading of constraint settings.
//!
//! Two layers, the later one winning: a base document (a file, or inline text) and the
//! environment. Environment keys start with `CONFINE__` and use `__` between nesting levels,
//! so `CONFINE__SETTINGS__PORT__MAX=9000` overrides `settings.port.max`. Numeric and boolean
//! strings are parsed, so overrides keep their literal type.

use confine_domain::settings::SettingsConfig;
use config::{Case, Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

pub use config::FileFormat;

/// Base name of the settings file looked up when no path is given. Any extension the
/// `config` crate understands is accepted (`confine.toml`, `confine.json`, ...).
pub const DEFAULT_SETTINGS_FILE: &str = "confine";
/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "CONFINE";
const ENV_SEPARATOR: &str = "__";

#[confine_derive::confine_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Base layer of a configuration.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// A required file. Its extension selects the format.
    File(&'a Path),
    /// Text in the given format, for embedded defaults.
    Inline(&'a str, FileFormat),
}

/// Loads `T` from the file at `path` (or [`DEFAULT_SETTINGS_FILE`]) plus environment
/// overrides.
///
/// # Errors
/// [`ConfigError::Config`] when the file is missing or unreadable, or when the merged
/// document does not deserialize into `T`.
///
/// # Example
/// ```rust
/// use confine_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Limits {
///     workers: u16,
/// }
///
/// let limits: Limits = load_config(Some("config/limits")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path =
        path.map_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE), |p| p.as_ref().to_path_buf());
    info!(path = %path.display(), "Loading config");

    load_from(Source::File(&path))
}

/// Loads `T` from `source` plus environment overrides.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_from<T>(source: Source<'_>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let builder = match source {
        Source::File(path) => Config::builder().add_source(File::from(path).required(true)),
        Source::Inline(text, format) => Config::builder().add_source(File::from_str(text, format)),
    };

    builder
        .add_source(environment())
        .build()
        .context("Failed to build config")?
        .try_deserialize()
        .context("Failed to deserialize config")
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
        .convert_case(Case::Snake)
}

/// Loads the named constraint sets (see [`SettingsConfig`]) from a file.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_settings(path: Option<impl AsRef<Path>>) -> Result<SettingsConfig, ConfigError> {
    let settings: SettingsConfig = load_config(path)?;
    info!(count = settings.settings.len(), "Loaded constraint settings");
    Ok(settings)
}

/// [`load_settings`] from any [`Source`].
///
/// # Errors
/// Same as [`load_config`].
pub fn load_settings_from(source: Source<'_>) -> Result<SettingsConfig, ConfigError> {
    let settings: SettingsConfig = load_from(source)?;
    info!(count = settings.settings.len(), "Loaded constraint settings");
    Ok(settings)
}
