mod common;

use common::{Celsius, Kelvin, Moment, Priority, Rank, Sloppy, Version};
use confine_kernel::domain::{Capability, Value, ValueType};
use confine_kernel::{
    EngineError, call_capability, compare, convert, convert_optional, convert_sequence, equal,
    has_equal,
};
use std::cmp::Ordering;

#[test]
fn convert_to_own_type_is_a_noop() {
    let values = [
        Value::I16(-4),
        Value::U64(u64::MAX),
        Value::F32(0.5),
        Value::from("text"),
        Value::from(vec![1, 2]),
        Value::reference(Value::reference(true)),
        Value::custom(Version::new(1, 2)),
    ];

    for value in &values {
        let converted = convert(&value.value_type(), Some(value)).expect("own type converts");
        assert_eq!(&converted, value);
    }
}

#[test]
fn convert_rejects_absent_and_foreign_values() {
    assert_eq!(convert(&ValueType::I64, None), Err(EngineError::Absent { context: None }));

    let err = convert(&ValueType::I64, Some(&Value::Bool(true))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Conversion error: argument of type 'bool' should be convertible to type 'i64'"
    );

    let err = convert(&ValueType::reference(ValueType::I64), Some(&Value::I64(1))).unwrap_err();
    assert!(matches!(err, EngineError::Conversion { ref to, .. } if to == "&i64"));
}

#[test]
fn convert_optional_passes_absence_through() {
    assert_eq!(convert_optional(&ValueType::U8, None), Ok(None));
    assert_eq!(convert_optional(&ValueType::U8, Some(&Value::I64(3))), Ok(Some(Value::U8(3))));
    assert!(convert_optional(&ValueType::U8, Some(&Value::from("3"))).is_err());
}

#[test]
fn convert_sequence_reports_first_bad_index() {
    let values = [Value::I64(1), Value::F64(2.5), Value::from("x"), Value::Bool(false)];
    let err = convert_sequence(&ValueType::I32, &values).unwrap_err();

    assert_eq!(err.kind(), "Element");
    assert!(matches!(err, EngineError::Element { index: 2, .. }));
    assert_eq!(
        err.to_string(),
        "Invalid element at index '2': Conversion error: argument of type 'String' should be convertible to type 'i32'"
    );

    let ok = convert_sequence(&ValueType::I32, &values[..2]).expect("numbers convert");
    assert_eq!(ok, [Value::I32(1), Value::I32(2)]);
}

#[test]
fn custom_types_convert_through_underlying_kind() {
    let celsius = convert(&ValueType::custom::<Celsius>(), Some(&Value::I32(21))).expect("int to alias");
    assert_eq!(celsius.downcast_ref::<Celsius>(), Some(&Celsius(21.0)));

    let kelvin = convert(&ValueType::custom::<Kelvin>(), Some(&celsius)).expect("alias to alias");
    assert_eq!(kelvin.downcast_ref::<Kelvin>(), Some(&Kelvin(21.0)));

    let native = convert(&ValueType::U8, Some(&kelvin)).expect("alias to native");
    assert_eq!(native, Value::U8(21));

    assert!(convert(&ValueType::custom::<Celsius>(), Some(&Value::from("21"))).is_err());
    assert!(convert(&ValueType::custom::<Version>(), Some(&Value::I64(1))).is_err());
}

#[test]
fn custom_converter_is_consulted() {
    let version = convert(&ValueType::custom::<Version>(), Some(&Value::from("v2.10"))).unwrap();
    assert_eq!(version.downcast_ref::<Version>(), Some(&Version::new(2, 10)));
    assert_eq!(version.type_name(), "Version");
}

#[test]
fn lower_capability_takes_precedence() {
    let old = Value::custom(Version::new(1, 9));
    let new = Value::custom(Version::new(1, 10));

    assert_eq!(compare(&old, &new), Ok(Ordering::Less));
    assert_eq!(compare(&new, &old), Ok(Ordering::Greater));
    assert_eq!(compare(&new, &new.clone()), Ok(Ordering::Equal));
}

#[test]
fn capability_overrides_the_underlying_order() {
    let urgent = Value::custom(Priority(1));
    let routine = Value::custom(Priority(5));

    assert_eq!(compare(&urgent, &routine), Ok(Ordering::Greater));
    assert_eq!(compare(&routine, &urgent), Ok(Ordering::Less));
    assert_eq!(compare(&urgent, &Value::custom(Priority(1))), Ok(Ordering::Equal));
}

#[test]
fn greater_capabilities_are_used_with_roles_reversed() {
    assert_eq!(compare(&Value::custom(Rank(1)), &Value::custom(Rank(2))), Ok(Ordering::Less));
    assert_eq!(compare(&Value::custom(Rank(3)), &Value::custom(Rank(2))), Ok(Ordering::Greater));
    assert_eq!(compare(&Value::custom(Rank(2)), &Value::custom(Rank(2))), Ok(Ordering::Equal));
}

#[test]
fn contradictory_capability_falls_back_to_native_order() {
    let low = Value::custom(Sloppy(1));
    let high = Value::custom(Sloppy(2));

    assert_eq!(compare(&low, &high), Ok(Ordering::Less));
    assert_eq!(compare(&high, &low), Ok(Ordering::Greater));
    assert_eq!(compare(&high, &Value::I8(2)), Ok(Ordering::Equal));
}

#[test]
fn capability_with_foreign_argument_is_not_usable() {
    let err = compare(&Value::custom(Version::new(1, 0)), &Value::I64(1)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Comparison error: argument of type 'Version' can not be lower than or greater than value of type 'i64'"
    );

    assert_eq!(compare(&Value::custom(Celsius(3.5)), &Value::F32(4.0)), Ok(Ordering::Less));
}

#[test]
fn equal_capability_wins_over_structure() {
    let utc = Value::custom(Moment::new(1_700_000_000, 0));
    let kyiv = Value::custom(Moment::new(1_700_000_000, 2));

    assert_ne!(utc, kyiv);
    assert!(equal(&utc, &kyiv));
    assert!(equal(&Value::reference(utc.clone()), &Value::reference(kyiv.clone())));
    assert!(has_equal(&kyiv, &[Value::custom(Moment::new(1, 0)), utc.clone()]));
    assert_eq!(compare(&utc, &kyiv), Ok(Ordering::Equal));
    assert_eq!(compare(&Value::custom(Moment::new(5, 0)), &utc), Ok(Ordering::Less));
}

#[test]
fn call_capability_explains_failures() {
    let version = Value::custom(Version::new(1, 0));

    assert_eq!(call_capability(Capability::Lower, &version, &Value::custom(Version::new(2, 0))), Ok(true));

    let cases = [
        (Capability::Lower, Value::nil(), version.clone(), "method 'Lower' should not be called with nil receiver"),
        (Capability::Lower, version.clone(), Value::nil(), "method 'Lower' should not be called with nil argument"),
        (Capability::Greater, version.clone(), version.clone(), "type 'Version' has no method 'Greater'"),
        (Capability::Lower, Value::I64(1), Value::I64(2), "type 'i64' has no method 'Lower'"),
        (
            Capability::Lower,
            version.clone(),
            Value::custom(Rank(1)),
            "method 'Lower' of type 'Version' can not accept argument of type 'Rank'",
        ),
    ];

    for (capability, receiver, argument, message) in cases {
        let err = call_capability(capability, &receiver, &argument).unwrap_err();
        assert_eq!(err.to_string(), format!("Capability error: {message}"));
    }
}
