use crate::custom::{Custom, DynCustom};
use crate::types::{Kind, ValueType};
use std::fmt::{self, Display};
use std::sync::Arc;

/// A value whose concrete type is only known at runtime.
///
/// `Ref` models an ownership indirection that may point nowhere (`Ref(None)`, "nil").
/// `Custom` carries any [`Custom`] type behind a shared pointer, so cloning is cheap.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Str(String),
    List(Vec<Value>),
    Ref(Option<Box<Value>>),
    Custom(Arc<dyn DynCustom>),
}

impl Value {
    /// Wraps a user type.
    #[must_use]
    pub fn custom<T: Custom>(value: T) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// A reference pointing at `value`.
    #[must_use]
    pub fn reference(value: impl Into<Self>) -> Self {
        Self::Ref(Some(Box::new(value.into())))
    }

    /// A reference pointing nowhere.
    #[must_use]
    pub const fn nil() -> Self {
        Self::Ref(None)
    }

    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Ref(None))
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Bool(_) => Kind::Bool,
            Self::I8(_) => Kind::I8,
            Self::I16(_) => Kind::I16,
            Self::I32(_) => Kind::I32,
            Self::I64(_) => Kind::I64,
            Self::Isize(_) => Kind::Isize,
            Self::U8(_) => Kind::U8,
            Self::U16(_) => Kind::U16,
            Self::U32(_) => Kind::U32,
            Self::U64(_) => Kind::U64,
            Self::Usize(_) => Kind::Usize,
            Self::F32(_) => Kind::F32,
            Self::F64(_) => Kind::F64,
            Self::Str(_) => Kind::Str,
            Self::List(_) => Kind::List,
            Self::Ref(_) => Kind::Ref,
            Self::Custom(_) => Kind::Custom,
        }
    }

    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Ref(pointee) => ValueType::Ref(pointee.as_ref().map(|v| Box::new(v.value_type()))),
            Self::Custom(custom) => ValueType::Custom(custom.dyn_type()),
            Self::Bool(_) => ValueType::Bool,
            Self::I8(_) => ValueType::I8,
            Self::I16(_) => ValueType::I16,
            Self::I32(_) => ValueType::I32,
            Self::I64(_) => ValueType::I64,
            Self::Isize(_) => ValueType::Isize,
            Self::U8(_) => ValueType::U8,
            Self::U16(_) => ValueType::U16,
            Self::U32(_) => ValueType::U32,
            Self::U64(_) => ValueType::U64,
            Self::Usize(_) => ValueType::Usize,
            Self::F32(_) => ValueType::F32,
            Self::F64(_) => ValueType::F64,
            Self::Str(_) => ValueType::Str,
            Self::List(_) => ValueType::List,
        }
    }

    /// Display name of [`Value::value_type`].
    #[must_use]
    pub fn type_name(&self) -> String {
        self.value_type().to_string()
    }

    /// The value behind a non-nil reference.
    #[must_use]
    pub fn pointee(&self) -> Option<&Self> {
        match self {
            Self::Ref(Some(inner)) => Some(&**inner),
            _ => None,
        }
    }

    /// Mutable access to the value behind a non-nil reference.
    #[must_use]
    pub fn pointee_mut(&mut self) -> Option<&mut Self> {
        match self {
            Self::Ref(Some(inner)) => Some(&mut **inner),
            _ => None,
        }
    }

    /// Native value a custom type stands for; scalars are their own underlying value.
    #[must_use]
    pub fn underlying(&self) -> Option<Self> {
        match self {
            Self::Custom(custom) => custom.dyn_underlying(),
            Self::List(_) | Self::Ref(_) => None,
            scalar => Some(scalar.clone()),
        }
    }

    #[must_use]
    pub fn downcast_ref<T: Custom>(&self) -> Option<&T> {
        match self {
            Self::Custom(custom) => custom.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
}

/// Raw structural equality: same variant and equal payload, recursing through lists and
/// references. Floats follow IEEE rules, so `NaN != NaN`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::I8(a), Self::I8(b)) => a == b,
            (Self::I16(a), Self::I16(b)) => a == b,
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::Isize(a), Self::Isize(b)) => a == b,
            (Self::U8(a), Self::U8(b)) => a == b,
            (Self::U16(a), Self::U16(b)) => a == b,
            (Self::U32(a), Self::U32(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::Usize(a), Self::Usize(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Ref(a), Self::Ref(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => a.dyn_eq(b.as_ref()),
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => v.fmt(f),
            Self::I8(v) => v.fmt(f),
            Self::I16(v) => v.fmt(f),
            Self::I32(v) => v.fmt(f),
            Self::I64(v) => v.fmt(f),
            Self::Isize(v) => v.fmt(f),
            Self::U8(v) => v.fmt(f),
            Self::U16(v) => v.fmt(f),
            Self::U32(v) => v.fmt(f),
            Self::U64(v) => v.fmt(f),
            Self::Usize(v) => v.fmt(f),
            Self::F32(v) => v.fmt(f),
            Self::F64(v) => v.fmt(f),
            Self::Str(v) => f.write_str(v),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            },
            Self::Ref(Some(inner)) => inner.fmt(f),
            Self::Ref(None) => f.write_str("nil"),
            Self::Custom(custom) => custom.fmt(f),
        }
    }
}

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }

        impl TryFrom<Value> for $ty {
            type Error = Value;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    )*};
}

scalar_conversions!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => Str,
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// `None` becomes a nil reference, `Some(v)` a reference to `v`.
impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Self::Ref(value.map(|v| Box::new(v.into())))
    }
}
