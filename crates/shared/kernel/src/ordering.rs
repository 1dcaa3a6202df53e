use crate::capability::try_capability;
use crate::convert::convert;
use crate::equality::indirect;
use crate::error::EngineError;
use confine_domain::{Capability, Value, ValueType};
use std::cmp::Ordering;

/// Orders `left` relative to `right`.
///
/// Lookup order: the "is-lower" capabilities (`Lower`, `Before`) on `left`, then the
/// "is-greater" capabilities (`Greater`, `After`) with roles swapped, then the native order of
/// `left`'s kind with `right` converted into it. A capability answering `true` in both
/// directions is skipped.
///
/// # Errors
/// [`EngineError::Comparison`] if no capability applies and the values have no common native
/// order (bools, lists, nil references, custom types without an underlying value).
pub fn compare(left: &Value, right: &Value) -> Result<Ordering, EngineError> {
    let (l, r) = indirect(left, right);

    if let Some(ordering) = by_capabilities(&Capability::LOWER, l, r) {
        return Ok(ordering);
    }
    if let Some(ordering) = by_capabilities(&Capability::GREATER, r, l) {
        return Ok(ordering);
    }

    native(l, r).ok_or_else(|| EngineError::Comparison {
        left: l.type_name(),
        right: r.type_name(),
        context: None,
    })
}

fn by_capabilities(capabilities: &[Capability], left: &Value, right: &Value) -> Option<Ordering> {
    capabilities.iter().find_map(|&capability| by_capability(capability, left, right))
}

/// `capability(left, right)` means `left` sorts first.
fn by_capability(capability: Capability, left: &Value, right: &Value) -> Option<Ordering> {
    let lower = try_capability(capability, left, right)?;
    let greater = try_capability(capability, right, left)?;

    match (lower, greater) {
        (true, true) => None,
        (true, false) => Some(Ordering::Less),
        (false, true) => Some(Ordering::Greater),
        (false, false) => Some(Ordering::Equal),
    }
}

fn native(left: &Value, right: &Value) -> Option<Ordering> {
    let left = left.underlying()?;
    if !left.kind().is_ordered() {
        return None;
    }
    let right = convert(&ValueType::of_kind(left.kind())?, Some(right)).ok()?;

    match (&left, &right) {
        (Value::I8(a), Value::I8(b)) => Some(a.cmp(b)),
        (Value::I16(a), Value::I16(b)) => Some(a.cmp(b)),
        (Value::I32(a), Value::I32(b)) => Some(a.cmp(b)),
        (Value::I64(a), Value::I64(b)) => Some(a.cmp(b)),
        (Value::Isize(a), Value::Isize(b)) => Some(a.cmp(b)),
        (Value::U8(a), Value::U8(b)) => Some(a.cmp(b)),
        (Value::U16(a), Value::U16(b)) => Some(a.cmp(b)),
        (Value::U32(a), Value::U32(b)) => Some(a.cmp(b)),
        (Value::U64(a), Value::U64(b)) => Some(a.cmp(b)),
        (Value::Usize(a), Value::Usize(b)) => Some(a.cmp(b)),
        (Value::F32(a), Value::F32(b)) => Some(a.partial_cmp(b).unwrap_or(Ordering::Equal)),
        (Value::F64(a), Value::F64(b)) => Some(a.partial_cmp(b).unwrap_or(Ordering::Equal)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
