#![allow(dead_code)]

use confine_kernel::domain::{Capability, Custom, Kind, Predicate, Value};
use std::fmt;

/// Newtype over `f64`, converts through its underlying kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celsius(pub f64);

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}C", self.0)
    }
}

impl Custom for Celsius {
    fn type_name() -> &'static str {
        "Celsius"
    }

    fn underlying(&self) -> Option<Value> {
        Some(Value::F64(self.0))
    }

    fn underlying_kind() -> Option<Kind> {
        Some(Kind::F64)
    }

    fn from_underlying(value: Value) -> Option<Self> {
        f64::try_from(value).ok().map(Self)
    }
}

/// Second newtype over `f64`, to exercise alias-to-alias conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kelvin(pub f64);

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

impl Custom for Kelvin {
    fn type_name() -> &'static str {
        "Kelvin"
    }

    fn underlying(&self) -> Option<Value> {
        Some(Value::F64(self.0))
    }

    fn underlying_kind() -> Option<Kind> {
        Some(Kind::F64)
    }

    fn from_underlying(value: Value) -> Option<Self> {
        f64::try_from(value).ok().map(Self)
    }
}

/// Ordered only through its `Lower` capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

impl Custom for Version {
    fn type_name() -> &'static str {
        "Version"
    }

    fn convert_from(value: &Value) -> Option<Self> {
        let Value::Str(raw) = value else { return None };
        let (major, minor) = raw.trim_start_matches('v').split_once('.')?;
        Some(Self::new(major.parse().ok()?, minor.parse().ok()?))
    }

    fn capability(capability: Capability) -> Option<Predicate<Self>> {
        match capability {
            Capability::Lower => Some(|a, b| (a.major, a.minor) < (b.major, b.minor)),
            _ => None,
        }
    }
}

/// A point in time with an offset; equal instants in different offsets are `Equal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub utc_seconds: i64,
    pub offset_hours: i8,
}

impl Moment {
    pub const fn new(utc_seconds: i64, offset_hours: i8) -> Self {
        Self { utc_seconds, offset_hours }
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:+}", self.utc_seconds, self.offset_hours)
    }
}

impl Custom for Moment {
    fn type_name() -> &'static str {
        "Moment"
    }

    fn capability(capability: Capability) -> Option<Predicate<Self>> {
        match capability {
            Capability::Equal => Some(|a, b| a.utc_seconds == b.utc_seconds),
            Capability::Before => Some(|a, b| a.utc_seconds < b.utc_seconds),
            Capability::After => Some(|a, b| a.utc_seconds > b.utc_seconds),
            _ => None,
        }
    }
}

/// Only exposes `After`, so ordering has to go through the swapped "is-greater" path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank(pub u8);

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Custom for Rank {
    fn type_name() -> &'static str {
        "Rank"
    }

    fn capability(capability: Capability) -> Option<Predicate<Self>> {
        match capability {
            Capability::After => Some(|a, b| a.0 > b.0),
            _ => None,
        }
    }
}

/// `Lower` answers true both ways; the engine must fall back to the underlying `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sloppy(pub i64);

impl fmt::Display for Sloppy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~{}", self.0)
    }
}

impl Custom for Sloppy {
    fn type_name() -> &'static str {
        "Sloppy"
    }

    fn underlying(&self) -> Option<Value> {
        Some(Value::I64(self.0))
    }

    fn underlying_kind() -> Option<Kind> {
        Some(Kind::I64)
    }

    fn from_underlying(value: Value) -> Option<Self> {
        i64::try_from(value).ok().map(Self)
    }

    fn capability(capability: Capability) -> Option<Predicate<Self>> {
        match capability {
            Capability::Lower => Some(|_, _| true),
            _ => None,
        }
    }
}

/// Underlying `i64`, but `Lower` ranks larger numbers first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priority(pub i64);

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl Custom for Priority {
    fn type_name() -> &'static str {
        "Priority"
    }

    fn underlying(&self) -> Option<Value> {
        Some(Value::I64(self.0))
    }

    fn underlying_kind() -> Option<Kind> {
        Some(Kind::I64)
    }

    fn from_underlying(value: Value) -> Option<Self> {
        i64::try_from(value).ok().map(Self)
    }

    fn capability(capability: Capability) -> Option<Predicate<Self>> {
        match capability {
            Capability::Lower => Some(|a, b| a.0 > b.0),
            _ => None,
        }
    }
}
