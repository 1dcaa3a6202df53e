//! The three stages every configuration goes through.
//!
//! 1. [`normalize`] converts every constraint (and the current-value override) into the
//!    target's type, so later comparisons never mix types.
//! 2. [`validate`] checks a value against normalized constraints.
//! 3. [`resolve`] picks the final value: the candidate when it passes, else the default.

use crate::error::{ConfiguratorError, InvalidField, Rejection, Violation};
use confine_domain::{Constraints, Field, Value, ValueType};
use confine_kernel::{compare, convert_optional, convert_sequence, has_equal};
use std::cmp::Ordering;
use tracing::debug;

/// Constraints and current-value override, converted into one target type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub constraints: Constraints,
    pub current: Option<Value>,
}

/// Converts `constraints` and `current` into `target`.
///
/// Fields are processed in the order current, default, min, max, allowed, disallowed;
/// the first failure is reported with the field it came from.
///
/// # Errors
/// Returns [`InvalidField`] naming the first field whose value does not convert.
pub fn normalize(
    constraints: &Constraints,
    current: Option<&Value>,
    target: &ValueType,
) -> Result<Normalized, InvalidField> {
    let current = convert_optional(target, current).map_err(InvalidField::of(Field::Current))?;
    let default = convert_optional(target, constraints.default_value())
        .map_err(InvalidField::of(Field::Default))?;
    let min = convert_optional(target, constraints.min()).map_err(InvalidField::of(Field::Min))?;
    let max = convert_optional(target, constraints.max()).map_err(InvalidField::of(Field::Max))?;
    let allowed = convert_sequence(target, constraints.allowed())
        .map_err(InvalidField::of(Field::Allowed))?;
    let disallowed = convert_sequence(target, constraints.disallowed())
        .map_err(InvalidField::of(Field::Disallowed))?;

    Ok(Normalized {
        constraints: Constraints::from_parts(min, max, allowed, disallowed, default),
        current,
    })
}

/// Checks `value` against already normalized `constraints`.
///
/// Checks run in the order min, max, allowed, disallowed and stop at the first failure.
/// Empty lists impose nothing. The default is not consulted here.
///
/// # Errors
/// * [`Rejection::Violated`] when the value breaks a constraint.
/// * [`Rejection::Invalid`] when a bound cannot be ordered against the value.
pub fn validate(value: &Value, constraints: &Constraints) -> Result<(), Rejection> {
    if let Some(min) = constraints.min()
        && compare(value, min).map_err(InvalidField::of(Field::Min))? == Ordering::Less
    {
        return Err(Violation::Min(min.clone()).into());
    }

    if let Some(max) = constraints.max()
        && compare(value, max).map_err(InvalidField::of(Field::Max))? == Ordering::Greater
    {
        return Err(Violation::Max(max.clone()).into());
    }

    let allowed = constraints.allowed();
    if !allowed.is_empty() && !has_equal(value, allowed) {
        return Err(Violation::Allowed(allowed.to_vec()).into());
    }

    let disallowed = constraints.disallowed();
    if !disallowed.is_empty() && has_equal(value, disallowed) {
        return Err(Violation::Disallowed(disallowed.to_vec()).into());
    }

    Ok(())
}

/// Returns `candidate` when it satisfies `constraints`, otherwise the default.
///
/// The default is checked first: a default that breaks its own constraints is an error
/// even when the candidate is fine.
///
/// # Errors
/// * [`ConfiguratorError::InvalidDefault`] when the default fails validation.
/// * [`ConfiguratorError::InvalidTarget`] when the candidate fails and there is no default.
pub fn resolve(candidate: Value, constraints: &Constraints) -> Result<Value, ConfiguratorError> {
    resolve_with(candidate, constraints.default_value(), |value| validate(value, constraints))
}

/// [`resolve`] with a caller supplied check, used to fold nested validators in.
pub(crate) fn resolve_with<F>(
    candidate: Value,
    default: Option<&Value>,
    check: F,
) -> Result<Value, ConfiguratorError>
where
    F: Fn(&Value) -> Result<(), Rejection>,
{
    if let Some(default) = default {
        check(default)
            .map_err(|rejection| ConfiguratorError::InvalidDefault { rejection, context: None })?;
    }

    match (check(&candidate), default) {
        (Ok(()), _) => Ok(candidate),
        (Err(rejection), Some(default)) => {
            debug!(%rejection, fallback = %default, "Target rejected, using default value");
            Ok(default.clone())
        },
        (Err(rejection), None) => Err(ConfiguratorError::InvalidTarget { rejection, context: None }),
    }
}
