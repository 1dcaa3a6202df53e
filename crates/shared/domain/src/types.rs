use crate::custom::Custom;
use crate::value::Value;
use std::any::TypeId;
use std::fmt::{self, Debug, Display};

/// Tag of a [`Value`] variant, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Str,
    List,
    Ref,
    Custom,
}

impl Kind {
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize)
    }

    #[must_use]
    pub const fn is_unsigned(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize)
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_signed() || self.is_unsigned() || self.is_float()
    }

    /// Kinds with a native total-ish order (numbers and text).
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        self.is_numeric() || matches!(self, Self::Str)
    }

    /// Kinds whose values support built-in `==` without recursion.
    #[must_use]
    pub const fn is_comparable(self) -> bool {
        !matches!(self, Self::List | Self::Ref)
    }
}

/// Runtime type descriptor of a [`Value`], used as conversion target.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Str,
    List,
    /// Indirection; the pointee type is unknown when the reference is nil.
    Ref(Option<Box<ValueType>>),
    Custom(CustomType),
}

impl ValueType {
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Bool => Kind::Bool,
            Self::I8 => Kind::I8,
            Self::I16 => Kind::I16,
            Self::I32 => Kind::I32,
            Self::I64 => Kind::I64,
            Self::Isize => Kind::Isize,
            Self::U8 => Kind::U8,
            Self::U16 => Kind::U16,
            Self::U32 => Kind::U32,
            Self::U64 => Kind::U64,
            Self::Usize => Kind::Usize,
            Self::F32 => Kind::F32,
            Self::F64 => Kind::F64,
            Self::Str => Kind::Str,
            Self::List => Kind::List,
            Self::Ref(_) => Kind::Ref,
            Self::Custom(_) => Kind::Custom,
        }
    }

    /// Descriptor of a payload-free kind. `Ref` maps to an untyped reference; `Custom` has none.
    #[must_use]
    pub const fn of_kind(kind: Kind) -> Option<Self> {
        Some(match kind {
            Kind::Bool => Self::Bool,
            Kind::I8 => Self::I8,
            Kind::I16 => Self::I16,
            Kind::I32 => Self::I32,
            Kind::I64 => Self::I64,
            Kind::Isize => Self::Isize,
            Kind::U8 => Self::U8,
            Kind::U16 => Self::U16,
            Kind::U32 => Self::U32,
            Kind::U64 => Self::U64,
            Kind::Usize => Self::Usize,
            Kind::F32 => Self::F32,
            Kind::F64 => Self::F64,
            Kind::Str => Self::Str,
            Kind::List => Self::List,
            Kind::Ref => Self::Ref(None),
            Kind::Custom => return None,
        })
    }

    /// Shorthand for [`ValueType::Custom`] of `T`.
    #[must_use]
    pub fn custom<T: Custom>() -> Self {
        Self::Custom(CustomType::of::<T>())
    }

    /// Shorthand for a reference to `pointee`.
    #[must_use]
    pub fn reference(pointee: Self) -> Self {
        Self::Ref(Some(Box::new(pointee)))
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Str => "String",
            Self::List => "List",
            Self::Ref(Some(pointee)) => return write!(f, "&{pointee}"),
            Self::Ref(None) => "&_",
            Self::Custom(custom) => custom.name(),
        };
        f.write_str(name)
    }
}

/// Identity and conversion entry points of a [`Custom`] type.
#[derive(Clone, Copy)]
pub struct CustomType {
    id: TypeId,
    name: &'static str,
    underlying: Option<Kind>,
    from_underlying: fn(Value) -> Option<Value>,
    convert_from: fn(&Value) -> Option<Value>,
}

impl CustomType {
    #[must_use]
    pub fn of<T: Custom>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::type_name(),
            underlying: T::underlying_kind(),
            from_underlying: |value| T::from_underlying(value).map(Value::custom),
            convert_from: |value| T::convert_from(value).map(Value::custom),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn underlying_kind(&self) -> Option<Kind> {
        self.underlying
    }

    /// Wraps a value of the underlying kind into the custom type.
    #[must_use]
    pub fn from_underlying(&self, value: Value) -> Option<Value> {
        (self.from_underlying)(value)
    }

    /// Runs the type's own converter on `value`.
    #[must_use]
    pub fn convert_from(&self, value: &Value) -> Option<Value> {
        (self.convert_from)(value)
    }
}

impl PartialEq for CustomType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CustomType {}

impl Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomType")
            .field("name", &self.name)
            .field("underlying", &self.underlying)
            .finish_non_exhaustive()
    }
}

impl Display for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
