use crate::error::EngineError;
use confine_domain::{Kind, Value, ValueType};

/// Converts `value` into a value of type `target`.
///
/// Convertible pairs: identical types, any numeric kind into any other (integer narrowing
/// wraps, float to integer truncates), custom types to and from their underlying kind, custom
/// types with their own converter, and references whose pointees convert.
///
/// # Errors
/// * [`EngineError::Absent`] if `value` is `None`.
/// * [`EngineError::Conversion`] if the pair is not convertible.
pub fn convert(target: &ValueType, value: Option<&Value>) -> Result<Value, EngineError> {
    let value = value.ok_or(EngineError::Absent { context: None })?;
    cast(target, value).ok_or_else(|| EngineError::conversion(value.type_name(), target))
}

/// Like [`convert`], but an absent value is a successful absence.
///
/// # Errors
/// [`EngineError::Conversion`] if a present value is not convertible.
pub fn convert_optional(
    target: &ValueType,
    value: Option<&Value>,
) -> Result<Option<Value>, EngineError> {
    value.map(|value| convert(target, Some(value))).transpose()
}

/// Converts every element, stopping at the first failure.
///
/// # Errors
/// [`EngineError::Element`] carrying the index of the first element that failed.
pub fn convert_sequence(target: &ValueType, values: &[Value]) -> Result<Vec<Value>, EngineError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            convert(target, Some(value)).map_err(|source| EngineError::Element {
                index,
                source: Box::new(source),
                context: None,
            })
        })
        .collect()
}

fn cast(target: &ValueType, value: &Value) -> Option<Value> {
    match target {
        ValueType::List => matches!(value, Value::List(_)).then(|| value.clone()),
        ValueType::Ref(pointee) => cast_reference(pointee.as_deref(), value),
        ValueType::Custom(custom) => {
            if let Value::Custom(inner) = value
                && inner.dyn_type() == *custom
            {
                return Some(value.clone());
            }
            if let Some(converted) = custom.convert_from(value) {
                return Some(converted);
            }
            let kind = custom.underlying_kind()?;
            let native = cast(&ValueType::of_kind(kind)?, value)?;
            custom.from_underlying(native)
        },
        scalar => cast_scalar(scalar.kind(), &value.underlying()?),
    }
}

fn cast_reference(pointee: Option<&ValueType>, value: &Value) -> Option<Value> {
    match (value, pointee) {
        (Value::Ref(None), _) => Some(Value::nil()),
        (Value::Ref(Some(_)), None) => Some(value.clone()),
        (Value::Ref(Some(inner)), Some(pointee)) => {
            Some(Value::Ref(Some(Box::new(cast(pointee, inner)?))))
        },
        _ => None,
    }
}

fn cast_scalar(kind: Kind, source: &Value) -> Option<Value> {
    match (kind, source) {
        (Kind::Bool, Value::Bool(_)) | (Kind::Str, Value::Str(_)) => Some(source.clone()),
        (kind, source) if kind.is_numeric() => Number::of(source).map(|n| n.cast(kind)),
        _ => None,
    }
}

/// Widest lossless carrier for any numeric kind.
#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i128),
    Float(f64),
}

macro_rules! cast_number {
    ($number:expr, $variant:ident, $ty:ty) => {
        match $number {
            Number::Int(v) => Value::$variant(v as $ty),
            Number::Float(v) => Value::$variant(v as $ty),
        }
    };
}

impl Number {
    #[allow(clippy::cast_lossless)]
    fn of(value: &Value) -> Option<Self> {
        Some(match *value {
            Value::I8(v) => Self::Int(i128::from(v)),
            Value::I16(v) => Self::Int(i128::from(v)),
            Value::I32(v) => Self::Int(i128::from(v)),
            Value::I64(v) => Self::Int(i128::from(v)),
            Value::Isize(v) => Self::Int(v as i128),
            Value::U8(v) => Self::Int(i128::from(v)),
            Value::U16(v) => Self::Int(i128::from(v)),
            Value::U32(v) => Self::Int(i128::from(v)),
            Value::U64(v) => Self::Int(i128::from(v)),
            Value::Usize(v) => Self::Int(v as i128),
            Value::F32(v) => Self::Float(f64::from(v)),
            Value::F64(v) => Self::Float(v),
            _ => return None,
        })
    }

    /// Integer narrowing wraps; float to integer saturates and drops the fraction.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn cast(self, kind: Kind) -> Value {
        match kind {
            Kind::I8 => cast_number!(self, I8, i8),
            Kind::I16 => cast_number!(self, I16, i16),
            Kind::I32 => cast_number!(self, I32, i32),
            Kind::I64 => cast_number!(self, I64, i64),
            Kind::Isize => cast_number!(self, Isize, isize),
            Kind::U8 => cast_number!(self, U8, u8),
            Kind::U16 => cast_number!(self, U16, u16),
            Kind::U32 => cast_number!(self, U32, u32),
            Kind::U64 => cast_number!(self, U64, u64),
            Kind::Usize => cast_number!(self, Usize, usize),
            Kind::F32 => cast_number!(self, F32, f32),
            _ => cast_number!(self, F64, f64),
        }
    }
}
