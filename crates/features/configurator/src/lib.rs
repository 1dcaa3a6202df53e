//! # Configurator
//!
//! This crate turns a declarative constraint set into a configuration step: read a value,
//! make sure it satisfies the constraints (falling back to a default when it does not),
//! audit the attempt and write the result back.
//!
//! ## Architecture
//!
//! 1.  **Pipeline ([`pipeline`]):** Pure functions. Constraints are normalized into the
//!     target's type, the candidate is validated, and the final value is resolved.
//! 2.  **Configurator ([`Configurator`]):** Immutable builder holding constraints, nested
//!     validators and audit settings. Reusable and safe to share between threads.
//! 3.  **Destinations ([`Destination`]):** Anything that can be loaded once and stored once:
//!     native scalars, `String`, [`Value`](confine_domain::Value) and `Option` of those.
//! 4.  **Audit ([`audit`]):** Pluggable sinks receiving a format string and its values, with
//!     secret redaction and change-only filtering.
//! 5.  **Registry ([`Registry`]):** Named configurators built from config files.
//!
//! ## Features
//!
//! * **Cross-type constraints**: bounds written as `i32` apply to `u16`, `f64` or user types.
//! * **Capabilities**: user types order and compare through their own predicates.
//! * **Defaults**: an invalid target is replaced, an invalid default is always an error.
//! * **Settings**: `settings` (default) loads constraint sets from files and `CONFINE__*`
//!   environment variables.
//!
//! ## Example
//! ```rust
//! use confine_configurator::Configurator;
//!
//! let port = Configurator::new().with_name("port").with_min(1024).with_disallowed([8081]);
//!
//! let mut value = 8081_u16;
//! let err = port.configure(&mut value).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Target value error (configuration of 'port'): argument should not be in disallowed values ['8081']"
//! );
//! assert_eq!(value, 8081);
//! ```

pub mod audit;
mod configurator;
mod destination;
mod error;
pub mod pipeline;
mod registry;

pub use crate::audit::{LogContext, LogFn, ValueFormat};
pub use crate::configurator::Configurator;
pub use crate::destination::Destination;
pub use crate::error::{ConfiguratorError, ConfiguratorErrorExt, InvalidField, Rejection, Violation};
pub use crate::registry::Registry;
