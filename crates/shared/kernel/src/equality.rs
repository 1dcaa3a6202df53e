use crate::capability::try_capability;
use confine_domain::{Capability, Value};

/// Strips matching layers of references from both sides.
///
/// Unwrapping stops as soon as either side is not a reference or is nil, so the returned
/// pair keeps whatever indirection could not be followed on both sides at once.
#[must_use]
pub fn indirect<'a>(mut left: &'a Value, mut right: &'a Value) -> (&'a Value, &'a Value) {
    while let (Some(l), Some(r)) = (left.pointee(), right.pointee()) {
        left = l;
        right = r;
    }
    (left, right)
}

/// Decides whether two values are equal.
///
/// 1. A usable `Equal` capability on the unwrapped receiver wins.
/// 2. Otherwise plain `==` on unwrapped scalars or custom values.
/// 3. Otherwise deep structural equality of the original values.
#[must_use]
pub fn equal(left: &Value, right: &Value) -> bool {
    let (l, r) = indirect(left, right);

    for capability in Capability::EQUALITY {
        if let Some(answer) = try_capability(capability, l, r) {
            return answer;
        }
    }

    if l.kind().is_comparable() && r.kind().is_comparable() && l == r {
        return true;
    }

    left == right
}

/// True if `target` equals at least one candidate. An empty slice is never a match.
#[must_use]
pub fn has_equal(target: &Value, candidates: &[Value]) -> bool {
    candidates.iter().any(|candidate| equal(target, candidate))
}
