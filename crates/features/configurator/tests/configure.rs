use confine_configurator::{
    Configurator, ConfiguratorError, InvalidField, LogContext, LogFn, Rejection, Violation,
};
use confine_domain::{Capability, Custom, Field, Kind, Predicate, Value};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Ordered through `Lower`, parsed from `"v<major>.<minor>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Release(u32, u32);

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.0, self.1)
    }
}

impl Custom for Release {
    fn type_name() -> &'static str {
        "Release"
    }

    fn convert_from(value: &Value) -> Option<Self> {
        let Value::Str(text) = value else {
            return None;
        };
        let (major, minor) = text.strip_prefix('v')?.split_once('.')?;
        Some(Self(major.parse().ok()?, minor.parse().ok()?))
    }

    fn capability(capability: Capability) -> Option<Predicate<Self>> {
        match capability {
            Capability::Lower => Some(|a, b| (a.0, a.1) < (b.0, b.1)),
            _ => None,
        }
    }
}

/// Process niceness: an `i64` where lower numbers rank higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Niceness(i64);

impl fmt::Display for Niceness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nice {}", self.0)
    }
}

impl Custom for Niceness {
    fn type_name() -> &'static str {
        "Niceness"
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

fn recorder() -> (LogFn, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    (LogFn::message(move |line| sink.lock().unwrap().push(line.to_owned())), lines)
}

#[test]
fn validate_names_the_allowed_values() {
    let err = Configurator::new().with_allowed([1, 2]).validate(5).unwrap_err();

    assert!(matches!(
        err.rejection(),
        Some(Rejection::Violated(Violation::Allowed(values))) if values == &[Value::I32(1), Value::I32(2)]
    ));
    assert_eq!(
        err.to_string(),
        "Target value error (validation): argument should be in allowed values ['1','2']"
    );
}

#[test]
fn disallowed_value_is_replaced_by_default() {
    let mut value = 0;
    Configurator::new().with_disallowed([0]).with_default(1).configure(&mut value).unwrap();

    assert_eq!(value, 1);
}

#[test]
fn violation_without_default_leaves_destination_unchanged() {
    let mut value = 0_i64;
    let err = Configurator::new().with_min(1).configure(&mut value).unwrap_err();

    assert_eq!(err.kind(), "InvalidTarget");
    assert_eq!(value, 0);
}

#[test]
fn default_outside_allowed_is_an_authoring_error() {
    let mut value = 1_u8;
    let err = Configurator::new()
        .with_allowed([1, 2])
        .with_default(0)
        .configure(&mut value)
        .unwrap_err();

    assert_eq!(err.kind(), "InvalidDefault");
    assert_eq!(value, 1);
}

#[test]
fn unconvertible_constraints_name_the_field() {
    let mut value = 3_u32;
    let err = Configurator::new()
        .with_name("workers")
        .with_max("many")
        .configure(&mut value)
        .unwrap_err();

    assert!(matches!(
        err,
        ConfiguratorError::InvalidConstraint { source: InvalidField { field: Field::Max, .. }, .. }
    ));
    assert_eq!(err.context_str(), Some("configuration of 'workers'"));
    assert_eq!(value, 3);
}

#[test]
fn constraints_follow_the_destination_type() {
    let limits = Configurator::new().with_min(0).with_max(300.5);

    let mut narrow = 250_u8;
    limits.configure(&mut narrow).unwrap();
    assert_eq!(narrow, 250);

    let mut wide = 301_i64;
    assert!(limits.configure(&mut wide).is_err());
    assert!(limits.validate(300.25_f32).is_ok());
    assert!(limits.validate(-0.5_f32).is_err());
}

#[test]
fn current_override_replaces_the_destination_value() {
    let mut value = 10_u16;
    Configurator::new().with_max(100).with_current(42).configure(&mut value).unwrap();
    assert_eq!(value, 42);

    let err = Configurator::new().with_current(true).configure(&mut value).unwrap_err();
    assert!(matches!(
        err,
        ConfiguratorError::InvalidConstraint { source: InvalidField { field: Field::Current, .. }, .. }
    ));
}

#[test]
fn value_destinations_follow_references() {
    let mut dest = Value::reference(Value::from("guest"));
    Configurator::new()
        .with_disallowed(["guest", "anonymous"])
        .with_default("admin")
        .configure(&mut dest)
        .unwrap();
    assert_eq!(dest, Value::reference(Value::from("admin")));

    let mut nil = Value::nil();
    let err = Configurator::new().configure(&mut nil).unwrap_err();
    assert_eq!(err.kind(), "NotConfigurable");
    assert_eq!(err.context_str(), Some("configuration"));

    let mut absent: Option<String> = None;
    assert_eq!(Configurator::new().configure(&mut absent).unwrap_err().kind(), "NotConfigurable");
}

#[test]
fn custom_types_use_their_capabilities() {
    let supported = Configurator::new().with_min("v1.4").with_default("v2.0");

    let mut release = Value::custom(Release(1, 10));
    supported.configure(&mut release).unwrap();
    assert_eq!(release.downcast_ref::<Release>(), Some(&Release(1, 10)));

    let mut outdated = Value::custom(Release(1, 2));
    supported.configure(&mut outdated).unwrap();
    assert_eq!(outdated.downcast_ref::<Release>(), Some(&Release(2, 0)));
}

#[test]
fn nested_validators_all_have_to_pass() {
    let not_root = Configurator::new().with_disallowed(["root"]);
    let short = Configurator::new().with_max("zzzz");
    let user = Configurator::new().with_validators([not_root, short]).with_default("nobody");

    let mut name = String::from("root");
    user.configure(&mut name).unwrap();
    assert_eq!(name, "nobody");

    assert!(user.validate("alice").is_ok());
    let err = user.validate("zzzzz").unwrap_err();
    assert!(matches!(err.rejection(), Some(Rejection::Violated(Violation::Max(_)))));
}

#[test]
fn every_configuration_is_logged_by_default() {
    let (logger, lines) = recorder();
    let port = Configurator::new()
        .with_name("port")
        .with_min(1024)
        .with_default(8080)
        .with_logger(logger);

    port.configure(&mut 80_u16).unwrap();
    port.configure(&mut 9000_u16).unwrap();

    assert_eq!(
        *lines.lock().unwrap(),
        [
            "configuration of 'port': min: '1024' default: '8080' input: '80' output: '8080'",
            "configuration of 'port': min: '1024' default: '8080' input: '9000' output: '9000'",
        ]
    );
}

#[test]
fn failed_configurations_are_not_logged() {
    let (logger, lines) = recorder();
    let result = Configurator::new().with_max(1).with_logger(logger).configure(&mut 2_i32);

    assert!(result.is_err());
    assert!(lines.lock().unwrap().is_empty());
}

#[test]
fn loggers_receive_format_arguments_and_context() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let logger = LogFn::new(move |ctx, format, args| {
        let service = ctx.field("service").map(str::to_owned);
        sink.lock().unwrap().push((service, format.to_owned(), args.to_vec()));
    });

    Configurator::new()
        .with_logger(logger)
        .with_context(LogContext::new().with_field("service", "billing"))
        .with_log_value_format("{value}:{type}")
        .configure(&mut 3_u8)
        .unwrap();

    let seen = seen.lock().unwrap();
    let (service, format, args) = &seen[0];
    assert_eq!(service.as_deref(), Some("billing"));
    assert_eq!(format, "configuration: input: {} output: {}");
    assert_eq!(args, &["3:u8", "3:u8"]);
}

#[test]
fn dyn_logger_accepts_plain_message_callbacks() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    let callback: Arc<dyn Fn(&str) + Send + Sync> =
        Arc::new(move |line: &str| sink.lock().unwrap().push(line.to_owned()));

    Configurator::new().with_dyn_logger(&callback).configure(&mut true).unwrap();
    assert_eq!(*lines.lock().unwrap(), ["configuration: input: 'true' output: 'true'"]);
}

#[test]
#[should_panic(expected = "invalid logger function type")]
fn dyn_logger_rejects_unknown_shapes() {
    let callback: Arc<dyn Fn(u8) + Send + Sync> = Arc::new(|_: u8| {});
    let _ = Configurator::new().with_dyn_logger(&callback);
}

#[test]
fn min_follows_the_ordering_capability() {
    let floor = Configurator::new().with_min(10);

    assert!(floor.validate(Value::custom(Niceness(5))).is_ok());
    assert!(floor.validate(Value::custom(Niceness(10))).is_ok());

    let err = floor.validate(Value::custom(Niceness(15))).unwrap_err();
    assert!(matches!(err.rejection(), Some(Rejection::Violated(Violation::Min(_)))));

    let mut niceness = Value::custom(Niceness(15));
    floor.clone().with_default(0).configure(&mut niceness).unwrap();
    assert_eq!(niceness, Value::custom(Niceness(0)));
}
