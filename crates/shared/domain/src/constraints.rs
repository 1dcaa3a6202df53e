use crate::value::Value;
use std::fmt::{self, Display};

/// Declarative bounds a value must satisfy.
///
/// Every `with_*` consumes the record and returns a new one, so a set built once can be
/// cloned and shared freely. An absent field (or an empty list) means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    min: Option<Value>,
    max: Option<Value>,
    allowed: Vec<Value>,
    disallowed: Vec<Value>,
    default: Option<Value>,
}

impl Constraints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower inclusive bound.
    #[must_use = "Constraints are immutable; use the returned value."]
    pub fn with_min(mut self, min: impl Into<Value>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Upper inclusive bound.
    #[must_use = "Constraints are immutable; use the returned value."]
    pub fn with_max(mut self, max: impl Into<Value>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Replaces the allow-list.
    #[must_use = "Constraints are immutable; use the returned value."]
    pub fn with_allowed<I, V>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = allowed.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the disallow-list.
    #[must_use = "Constraints are immutable; use the returned value."]
    pub fn with_disallowed<I, V>(mut self, disallowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.disallowed = disallowed.into_iter().map(Into::into).collect();
        self
    }

    /// Fallback used when the target fails validation.
    #[must_use = "Constraints are immutable; use the returned value."]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub const fn min(&self) -> Option<&Value> {
        self.min.as_ref()
    }

    #[must_use]
    pub const fn max(&self) -> Option<&Value> {
        self.max.as_ref()
    }

    #[must_use]
    pub fn allowed(&self) -> &[Value] {
        &self.allowed
    }

    #[must_use]
    pub fn disallowed(&self) -> &[Value] {
        &self.disallowed
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && self.allowed.is_empty()
            && self.disallowed.is_empty()
            && self.default.is_none()
    }

    /// Assembles a record from already prepared parts.
    #[must_use]
    pub const fn from_parts(
        min: Option<Value>,
        max: Option<Value>,
        allowed: Vec<Value>,
        disallowed: Vec<Value>,
        default: Option<Value>,
    ) -> Self {
        Self { min, max, allowed, disallowed, default }
    }
}

/// A named slot of a constraint set, plus the override and target values that travel with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Min,
    Max,
    Allowed,
    Disallowed,
    Default,
    Current,
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Min => "min value",
            Self::Max => "max value",
            Self::Allowed => "allowed values",
            Self::Disallowed => "disallowed values",
            Self::Default => "default value",
            Self::Current => "current value",
        })
    }
}
