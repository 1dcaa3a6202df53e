//! Facade crate for confine.
//! Re-exports the domain types, the engine and the configurator under one name.
//! Keep this crate thin: it should compose other crates, not implement logic.
//!
//! ## Usage
//! - Add `confine` with the desired feature flags (`settings` is on by default, `logger`
//!   re-exports the subscriber bootstrap).
//! - `use confine::prelude::*;` brings in everything needed to build and run configurators.
//!
//! ```rust
//! use confine::prelude::*;
//!
//! let timeout = Configurator::new().with_name("timeout").with_min(1).with_max(300).with_default(30);
//!
//! let mut seconds = 0_u32;
//! timeout.configure(&mut seconds).unwrap();
//! assert_eq!(seconds, 30);
//! assert!(timeout.validate(301).is_err());
//! ```

pub use confine_configurator as configurator;
pub use confine_domain as domain;
pub use confine_kernel as kernel;
#[cfg(feature = "logger")]
pub use confine_logger as logger;

pub use confine_kernel::{compare, convert, convert_optional, convert_sequence, equal, has_equal};

/// Types and traits most callers need.
pub mod prelude {
    pub use confine_configurator::{
        Configurator, ConfiguratorError, ConfiguratorErrorExt, Destination, LogContext, LogFn,
        Registry, Rejection, ValueFormat, Violation,
    };
    pub use confine_domain::{
        Capability, Constraints, Custom, Field, Kind, LogFlags, Predicate, Value, ValueType,
    };
    pub use confine_kernel::{EngineError, EngineErrorExt};
}

/// Build-time enabled features (by Cargo feature).
pub mod features {
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "settings")]
        "settings",
        #[cfg(feature = "logger")]
        "logger",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Loads constraint sets from `path` and builds a [`Registry`](configurator::Registry)
/// of auditing configurators.
///
/// # Errors
/// Returns an error if the settings file is missing or malformed.
#[cfg(all(feature = "settings", not(target_arch = "wasm32")))]
pub fn init(
    path: Option<impl AsRef<std::path::Path>>,
) -> Result<configurator::Registry, configurator::ConfiguratorError> {
    configurator::Registry::load(path)
}
