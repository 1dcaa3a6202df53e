//! User defined value types.
//! A type implementing [`Custom`] can be wrapped in [`Value::Custom`] and takes part in
//! conversion, equality and ordering through the optional capabilities it declares.

use crate::types::{CustomType, Kind};
use crate::value::Value;
use std::any::Any;
use std::fmt::{self, Debug, Display};

/// Named binary predicates a custom type may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Equal,
    Lower,
    Before,
    Greater,
    After,
}

impl Capability {
    /// Capabilities consulted for equality.
    pub const EQUALITY: [Self; 1] = [Self::Equal];
    /// "Is-lower" capabilities, in lookup order.
    pub const LOWER: [Self; 2] = [Self::Lower, Self::Before];
    /// "Is-greater" capabilities, in lookup order.
    pub const GREATER: [Self; 2] = [Self::Greater, Self::After];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::Lower => "Lower",
            Self::Before => "Before",
            Self::Greater => "Greater",
            Self::After => "After",
        }
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A binary predicate over the receiver's own type.
pub type Predicate<T> = fn(&T, &T) -> bool;

/// A user type that can travel inside [`Value`].
///
/// Every hook is optional:
/// * [`Custom::underlying`] / [`Custom::underlying_kind`] / [`Custom::from_underlying`] declare a
///   native representation (a newtype over `f64`, say). The engine then converts to and from
///   that kind and compares through it.
/// * [`Custom::convert_from`] builds an instance out of any other value.
/// * [`Custom::capability`] exposes `Equal`, `Lower`, `Before`, `Greater` or `After`.
///
/// # Example
/// ```rust
/// use confine_domain::{Capability, Custom, Kind, Predicate, Value};
/// use std::fmt;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Version(u32, u32);
///
/// impl fmt::Display for Version {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{}.{}", self.0, self.1)
///     }
/// }
///
/// impl Custom for Version {
///     fn capability(capability: Capability) -> Option<Predicate<Self>> {
///         match capability {
///             Capability::Lower => Some(|a, b| (a.0, a.1) < (b.0, b.1)),
///             _ => None,
///         }
///     }
/// }
///
/// let v = Value::custom(Version(1, 2));
/// assert_eq!(v.downcast_ref::<Version>(), Some(&Version(1, 2)));
/// ```
pub trait Custom: Debug + Display + Clone + PartialEq + Send + Sync + 'static {
    /// Name reported in errors and audit logs.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Native value this instance stands for, if any.
    fn underlying(&self) -> Option<Value> {
        None
    }

    /// Native kind every instance of this type stands for, if any.
    fn underlying_kind() -> Option<Kind> {
        None
    }

    /// Rebuilds an instance from a value of [`Custom::underlying_kind`].
    fn from_underlying(_value: Value) -> Option<Self> {
        None
    }

    /// Builds an instance out of an arbitrary value.
    fn convert_from(_value: &Value) -> Option<Self> {
        None
    }

    /// Predicate registered under `capability`.
    fn capability(_capability: Capability) -> Option<Predicate<Self>> {
        None
    }
}

/// Result of invoking a capability through a type-erased receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// The receiver does not expose the capability.
    Unsupported,
    /// The argument is not of the receiver's type.
    Mismatched,
    Answered(bool),
}

/// Object-safe face of [`Custom`], implemented for every `Custom` type.
pub trait DynCustom: Debug + Display + Send + Sync {
    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;

    fn dyn_type(&self) -> CustomType;

    fn dyn_underlying(&self) -> Option<Value>;

    fn dyn_eq(&self, other: &dyn DynCustom) -> bool;

    fn dyn_invoke(&self, capability: Capability, argument: &Value) -> Invocation;
}

impl<T: Custom> DynCustom for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_type(&self) -> CustomType {
        CustomType::of::<T>()
    }

    fn dyn_underlying(&self) -> Option<Value> {
        Custom::underlying(self)
    }

    fn dyn_eq(&self, other: &dyn DynCustom) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|other| self == other)
    }

    fn dyn_invoke(&self, capability: Capability, argument: &Value) -> Invocation {
        let Some(predicate) = T::capability(capability) else {
            return Invocation::Unsupported;
        };
        argument
            .downcast_ref::<T>()
            .map_or(Invocation::Mismatched, |argument| Invocation::Answered(predicate(self, argument)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Stamp(i64);

    impl Display for Stamp {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "@{}", self.0)
        }
    }

    impl Custom for Stamp {
        fn type_name() -> &'static str {
            "Stamp"
        }

        fn capability(capability: Capability) -> Option<Predicate<Self>> {
            match capability {
                Capability::Before => Some(|a, b| a.0 < b.0),
                _ => None,
            }
        }
    }

    #[test]
    fn invoke_answers_registered_capability() {
        let early = Stamp(1);
        assert_eq!(
            early.dyn_invoke(Capability::Before, &Value::custom(Stamp(2))),
            Invocation::Answered(true)
        );
        assert_eq!(
            early.dyn_invoke(Capability::Before, &Value::custom(Stamp(0))),
            Invocation::Answered(false)
        );
    }

    #[test]
    fn invoke_reports_missing_capability_and_foreign_argument() {
        let stamp = Stamp(1);
        assert_eq!(stamp.dyn_invoke(Capability::After, &Value::custom(Stamp(2))), Invocation::Unsupported);
        assert_eq!(stamp.dyn_invoke(Capability::Before, &Value::I64(2)), Invocation::Mismatched);
    }

    #[test]
    fn dyn_eq_requires_same_type() {
        let stamp = Stamp(3);
        assert!(stamp.dyn_eq(&Stamp(3)));
        assert!(!stamp.dyn_eq(&Stamp(4)));
        assert_eq!(stamp.dyn_type().name(), "Stamp");
    }

    #[test]
    fn capability_groups_keep_lookup_order() {
        assert_eq!(Capability::LOWER.map(Capability::name), ["Lower", "Before"]);
        assert_eq!(Capability::GREATER.map(Capability::name), ["Greater", "After"]);
        assert_eq!(Capability::Equal.to_string(), "Equal");
    }
}
