//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O, conversion rules, or comparison logic, just data and simple helpers.
//!
//! * [`Value`] is the runtime-typed value the engine works on, [`ValueType`] its type descriptor.
//! * [`Custom`] lets user types take part, optionally exposing [`Capability`] predicates.
//! * [`Constraints`] is the declarative min/max/allowed/disallowed/default record.
//! * [`settings`] holds the serde schema for constraint sets declared in config files.

pub mod constraints;
pub mod custom;
pub mod flags;
pub mod settings;
pub mod types;
pub mod value;

pub use constraints::{Constraints, Field};
pub use custom::{Capability, Custom, DynCustom, Invocation, Predicate};
pub use flags::LogFlags;
pub use types::{CustomType, Kind, ValueType};
pub use value::Value;
