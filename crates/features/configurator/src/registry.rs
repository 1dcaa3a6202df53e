use crate::configurator::Configurator;
use crate::destination::Destination;
use crate::error::ConfiguratorError;
use confine_domain::settings::{ConstraintSettings, SettingsConfig};
use fxhash::FxHashMap;
use tracing::debug;

#[cfg(all(feature = "settings", not(target_arch = "wasm32")))]
use crate::error::ConfiguratorErrorExt;
#[cfg(all(feature = "settings", not(target_arch = "wasm32")))]
use confine_kernel::config::Source;
#[cfg(all(feature = "settings", not(target_arch = "wasm32")))]
use std::path::Path;

/// Named configurators built from declarative [`SettingsConfig`].
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: FxHashMap<String, Configurator>,
}

impl Registry {
    /// One [`Configurator::standard`] per declared constraint set.
    #[must_use]
    pub fn from_settings(settings: &SettingsConfig) -> Self {
        Self::from_settings_with(settings, &Configurator::standard())
    }

    /// Like [`Registry::from_settings`], starting every entry from `base` (logger, context).
    #[must_use]
    pub fn from_settings_with(settings: &SettingsConfig, base: &Configurator) -> Self {
        let entries = settings
            .settings
            .iter()
            .map(|(name, entry)| (name.clone(), configurator(name, entry, base.clone())))
            .collect::<FxHashMap<_, _>>();

        debug!(count = entries.len(), "Built configurator registry");
        Self { entries }
    }

    /// Loads settings from `path` (see [`confine_kernel::config::load_settings`]).
    ///
    /// # Errors
    /// Returns [`ConfiguratorError::Settings`] when the file is missing or malformed.
    #[cfg(all(feature = "settings", not(target_arch = "wasm32")))]
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self, ConfiguratorError> {
        let settings =
            confine_kernel::config::load_settings(path).context("Loading constraint settings")?;
        Ok(Self::from_settings(&settings))
    }

    /// Like [`Registry::load`], from a file or inline text.
    ///
    /// # Errors
    /// Returns [`ConfiguratorError::Settings`] when the source is malformed.
    #[cfg(all(feature = "settings", not(target_arch = "wasm32")))]
    pub fn load_from(source: Source<'_>) -> Result<Self, ConfiguratorError> {
        let settings = confine_kernel::config::load_settings_from(source)
            .context("Loading constraint settings")?;
        Ok(Self::from_settings(&settings))
    }

    /// Adds or replaces an entry under the configurator's name.
    ///
    /// # Errors
    /// Returns [`ConfiguratorError::Internal`] for unnamed configurators.
    pub fn register(&mut self, configurator: Configurator) -> Result<(), ConfiguratorError> {
        let name = configurator.name().ok_or("registered configurators must be named")?.to_owned();
        self.entries.insert(name, configurator);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Configurator> {
        self.entries.get(name)
    }

    /// Configures `destination` with the entry registered as `name`.
    ///
    /// # Errors
    /// [`ConfiguratorError::UnknownSetting`] for unknown names, otherwise as
    /// [`Configurator::configure`].
    pub fn configure<D>(&self, name: &str, destination: &mut D) -> Result<(), ConfiguratorError>
    where
        D: Destination + ?Sized,
    {
        let configurator = self.entries.get(name).ok_or_else(|| {
            ConfiguratorError::UnknownSetting { name: name.to_owned(), context: None }
        })?;
        configurator.configure(destination)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn configurator(name: &str, entry: &ConstraintSettings, base: Configurator) -> Configurator {
    let mut configurator = base
        .with_name(name.to_owned())
        .with_constraints(entry.constraints())
        .with_log_flags(entry.log.flags());

    if let Some(current) = entry.current() {
        configurator = configurator.with_current(current);
    }
    if let Some(template) = &entry.log.value_format {
        configurator = configurator.with_log_value_format(template.clone());
    }
    configurator
}
