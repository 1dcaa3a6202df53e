use crate::constraints::Constraints;
use crate::flags::LogFlags;
use crate::value::Value;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Named constraint sets declared in a config file.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SettingsConfigInner {
    pub settings: BTreeMap<String, ConstraintSettings>,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct SettingsConfig {
    #[serde(flatten, default)]
    inner: Arc<SettingsConfigInner>,
}

impl Deref for SettingsConfig {
    type Target = SettingsConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SettingsConfig {
    fn deref_mut(&mut self) -> &mut SettingsConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// One constraint set as written in a config file.
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConstraintSettings {
    pub min: Option<Literal>,
    pub max: Option<Literal>,
    pub allowed: Vec<Literal>,
    pub disallowed: Vec<Literal>,
    pub default: Option<Literal>,
    pub current: Option<Literal>,
    pub log: LogSettings,
}

impl ConstraintSettings {
    /// The declarative part as a [`Constraints`] record.
    #[must_use]
    pub fn constraints(&self) -> Constraints {
        Constraints::from_parts(
            self.min.clone().map(Value::from),
            self.max.clone().map(Value::from),
            self.allowed.iter().cloned().map(Value::from).collect(),
            self.disallowed.iter().cloned().map(Value::from).collect(),
            self.default.clone().map(Value::from),
        )
    }

    #[must_use]
    pub fn current(&self) -> Option<Value> {
        self.current.clone().map(Value::from)
    }
}

/// Audit log options of a constraint set.
///
/// `flags` takes the names of [`LogFlags`] (`"SECRET | CHANGES_ONLY"`); the booleans are
/// shorthands for single flags and add to it.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub flags: LogFlags,
    pub secret: bool,
    pub changes_only: bool,
    pub value_format: Option<String>,
}

impl LogSettings {
    #[must_use]
    pub fn flags(&self) -> LogFlags {
        let mut flags = self.flags;
        if self.secret {
            flags |= LogFlags::SECRET;
        }
        if self.changes_only {
            flags |= LogFlags::CHANGES_ONLY;
        }
        flags
    }
}

/// A value literal as config formats can express it.
///
/// Integers land as `i64` and floats as `f64`; the engine converts them to the target type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Literal>),
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Bool(v) => Self::Bool(v),
            Literal::Int(v) => Self::I64(v),
            Literal::Float(v) => Self::F64(v),
            Literal::Text(v) => Self::Str(v),
            Literal::List(items) => Self::List(items.into_iter().map(Self::from).collect()),
        }
    }
}
