use confine_domain::{Field, Value};
use confine_kernel::EngineError;
use std::borrow::Cow;
use thiserror::Error;

/// Errors surfaced by [`Configurator`](crate::Configurator) and [`Registry`](crate::Registry).
///
/// The context carries the operation and, when set, the configurator's name,
/// e.g. `"configuration of 'port'"`.
#[confine_derive::confine_error]
pub enum ConfiguratorError {
    /// The destination cannot hold a value (absent or nil).
    #[error("Target value is not configurable{}: {message}", format_context(.context))]
    NotConfigurable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A constraint or the current-value override does not convert to the target type.
    #[error("Invalid constraint{}: {source}", format_context(.context))]
    InvalidConstraint { source: InvalidField, context: Option<Cow<'static, str>> },

    /// The default violates the constraints it is supposed to satisfy.
    #[error("Default value error{}: {rejection}", format_context(.context))]
    InvalidDefault {
        #[source]
        rejection: Rejection,
        context: Option<Cow<'static, str>>,
    },

    /// The target violates the constraints and no default is available.
    #[error("Target value error{}: {rejection}", format_context(.context))]
    InvalidTarget {
        #[source]
        rejection: Rejection,
        context: Option<Cow<'static, str>>,
    },

    /// A dynamically registered logger has none of the accepted shapes.
    #[error("Invalid logger{}: {message}", format_context(.context))]
    InvalidLogger { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No constraint set is registered under the name.
    #[error("Unknown setting{}: '{name}'", format_context(.context))]
    UnknownSetting { name: String, context: Option<Cow<'static, str>> },

    #[cfg(all(feature = "settings", not(target_arch = "wasm32")))]
    #[error("Settings error{}: {source}", format_context(.context))]
    Settings { source: confine_kernel::config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Internal configurator error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ConfiguratorError {
    pub(crate) fn not_configurable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotConfigurable { message: message.into(), context: None }
    }

    /// The rejection behind a default or target failure.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::InvalidDefault { rejection, .. } | Self::InvalidTarget { rejection, .. } => {
                Some(rejection)
            },
            _ => None,
        }
    }
}

/// A constraint field whose value could not be brought to the target type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {source}")]
pub struct InvalidField {
    pub field: Field,
    pub source: EngineError,
}

impl InvalidField {
    /// Adapter for `map_err`, tagging an engine error with the field it came from.
    pub(crate) fn of(field: Field) -> impl FnOnce(EngineError) -> Self {
        move |source| Self { field, source }
    }
}

/// Why a value failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    /// A bound could not be converted or compared.
    #[error(transparent)]
    Invalid(#[from] InvalidField),

    /// The value is outside the constraints.
    #[error(transparent)]
    Violated(#[from] Violation),
}

/// The constraint a value broke, carrying the bound in the value's type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("argument should be greater than or equal to '{0}'")]
    Min(Value),

    #[error("argument should be lower than or equal to '{0}'")]
    Max(Value),

    #[error("argument should be in allowed values [{}]", quoted(.0))]
    Allowed(Vec<Value>),

    #[error("argument should not be in disallowed values [{}]", quoted(.0))]
    Disallowed(Vec<Value>),
}

fn quoted(values: &[Value]) -> String {
    values.iter().map(|v| format!("'{v}'")).collect::<Vec<_>>().join(",")
}
