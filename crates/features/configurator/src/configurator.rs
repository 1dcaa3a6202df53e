use crate::audit::{LogContext, LogFn, Record, ValueFormat};
use crate::destination::{self, Destination};
use crate::error::{ConfiguratorError, ConfiguratorErrorExt, InvalidField, Rejection};
use crate::pipeline::{self, Normalized};
use confine_domain::{Constraints, LogFlags, Value, ValueType};
use confine_kernel::equal;
use std::any::Any;
use std::borrow::Cow;
use tracing::trace;

/// Applies a constraint set to values of any type.
///
/// A configurator is built once with the consuming `with_*` methods and then used any number
/// of times, from any thread. It stores its constraints as given; they are converted to the
/// target's type on every call, so one configurator serves `u16` and `i64` targets alike.
///
/// # Examples
/// ```rust
/// use confine_configurator::Configurator;
///
/// let workers = Configurator::new().with_min(1).with_max(64).with_default(4);
///
/// let mut requested = 0_usize;
/// workers.configure(&mut requested).unwrap();
/// assert_eq!(requested, 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Configurator {
    name: Option<Cow<'static, str>>,
    constraints: Constraints,
    current: Option<Value>,
    validators: Vec<Configurator>,
    logger: Option<LogFn>,
    context: LogContext,
    flags: LogFlags,
    value_format: ValueFormat,
}

impl Configurator {
    /// An unconstrained configurator without a logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An unconstrained configurator auditing through `tracing`.
    #[must_use]
    pub fn standard() -> Self {
        Self::new().with_logger(LogFn::tracing())
    }

    /// [`Configurator::standard`] with every logged value redacted.
    #[must_use]
    pub fn secret() -> Self {
        Self::standard().with_log_secret(true)
    }

    /// Name used in error contexts and audit lines. An empty name clears it.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        self.name = (!name.is_empty()).then_some(name);
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: impl Into<Value>) -> Self {
        self.constraints = self.constraints.with_min(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: impl Into<Value>) -> Self {
        self.constraints = self.constraints.with_max(max);
        self
    }

    #[must_use]
    pub fn with_allowed<I, V>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.constraints = self.constraints.with_allowed(allowed);
        self
    }

    #[must_use]
    pub fn with_disallowed<I, V>(mut self, disallowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.constraints = self.constraints.with_disallowed(disallowed);
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.constraints = self.constraints.with_default(default);
        self
    }

    /// Replaces the whole constraint set.
    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Value to configure instead of the one the destination holds.
    #[must_use]
    pub fn with_current(mut self, current: impl Into<Value>) -> Self {
        self.current = Some(current.into());
        self
    }

    /// Extra configurators every candidate must also satisfy.
    ///
    /// Only their constraints take part (nested validators included); their defaults,
    /// overrides and loggers are ignored.
    #[must_use]
    pub fn with_validators(mut self, validators: impl IntoIterator<Item = Self>) -> Self {
        self.validators = validators.into_iter().collect();
        self
    }

    /// Audit sink. `None` disables audit logging.
    #[must_use]
    pub fn with_logger(mut self, logger: impl Into<Option<LogFn>>) -> Self {
        self.logger = logger.into();
        self
    }

    /// Audit sink from a type-erased callback, see [`LogFn::from_dyn`].
    ///
    /// # Panics
    /// Panics when `registration` has none of the accepted callback shapes. Use
    /// [`LogFn::from_dyn`] directly to handle that case as an error.
    #[must_use]
    pub fn with_dyn_logger(self, registration: &dyn Any) -> Self {
        match LogFn::from_dyn(registration) {
            Ok(logger) => self.with_logger(logger),
            Err(err) => panic!("{err}"),
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    /// Replaces logged values with `*secret*`.
    #[must_use]
    pub fn with_log_secret(mut self, secret: bool) -> Self {
        self.flags.set(LogFlags::SECRET, secret);
        self
    }

    /// Logs only configurations that changed the value.
    #[must_use]
    pub fn with_log_changes_only(mut self, changes_only: bool) -> Self {
        self.flags.set(LogFlags::CHANGES_ONLY, changes_only);
        self
    }

    #[must_use]
    pub fn with_log_flags(mut self, flags: LogFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Template for logged values, see [`ValueFormat`].
    #[must_use]
    pub fn with_log_value_format(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.value_format = ValueFormat::new(template);
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    #[must_use]
    pub const fn flags(&self) -> LogFlags {
        self.flags
    }

    /// Checks `target` against the constraints and validators. Nothing is logged or modified.
    ///
    /// # Errors
    /// * [`ConfiguratorError::NotConfigurable`] when `target` is nil or absent.
    /// * [`ConfiguratorError::InvalidConstraint`] when a constraint does not convert to the
    ///   type of `target`.
    /// * [`ConfiguratorError::InvalidTarget`] when `target` violates the constraints.
    pub fn validate(&self, target: impl Into<Value>) -> Result<(), ConfiguratorError> {
        let target = target.into();
        let label = self.label("validation");
        if target.is_nil() {
            return Err(destination::nil().with_context(label));
        }

        let normalized = self.normalize(&target.value_type()).context(label.clone())?;
        self.check(&target, &normalized.constraints)
            .map_err(|rejection| ConfiguratorError::InvalidTarget { rejection, context: Some(label) })
    }

    /// Reads `destination`, settles on a value satisfying the constraints, logs the attempt
    /// and writes the value back.
    ///
    /// The candidate is the current-value override when set, else the destination's value.
    /// A candidate failing validation is replaced by the default. On error the destination
    /// is left untouched.
    ///
    /// # Errors
    /// * [`ConfiguratorError::NotConfigurable`] when the destination is absent or nil.
    /// * [`ConfiguratorError::InvalidConstraint`] when a constraint does not convert.
    /// * [`ConfiguratorError::InvalidDefault`] when the default violates the constraints.
    /// * [`ConfiguratorError::InvalidTarget`] when the candidate fails and there is no default.
    pub fn configure<D>(&self, destination: &mut D) -> Result<(), ConfiguratorError>
    where
        D: Destination + ?Sized,
    {
        let label = self.label("configuration");

        let input = destination.load().context(label.clone())?;
        let Normalized { constraints, current } =
            self.normalize(&input.value_type()).context(label.clone())?;

        let candidate = current.unwrap_or(input);
        let output =
            pipeline::resolve_with(candidate.clone(), constraints.default_value(), |value| {
                self.check(value, &constraints)
            })
            .context(label.clone())?;

        self.audit(&constraints, &candidate, &output);
        destination.store(output).context(label)
    }

    fn normalize(&self, target: &ValueType) -> Result<Normalized, InvalidField> {
        pipeline::normalize(&self.constraints, self.current.as_ref(), target)
    }

    fn check(&self, value: &Value, constraints: &Constraints) -> Result<(), Rejection> {
        pipeline::validate(value, constraints)?;
        self.validators.iter().try_for_each(|validator| validator.accepts(value))
    }

    /// Nested validation: own constraints in `value`'s type, then own validators.
    fn accepts(&self, value: &Value) -> Result<(), Rejection> {
        let normalized = self.normalize(&value.value_type())?;
        self.check(value, &normalized.constraints)
    }

    fn audit(&self, constraints: &Constraints, input: &Value, output: &Value) {
        let Some(logger) = &self.logger else {
            return;
        };
        if self.flags.contains(LogFlags::CHANGES_ONLY) && equal(input, output) {
            trace!(name = self.name(), "Value unchanged, audit skipped");
            return;
        }

        let record = Record { name: self.name(), constraints, input, output };
        let (format, args) =
            record.layout(&self.value_format, self.flags.contains(LogFlags::SECRET));
        logger.log(&self.context, &format, &args);
    }

    fn label(&self, operation: &'static str) -> Cow<'static, str> {
        self.name
            .as_ref()
            .map_or(Cow::Borrowed(operation), |name| format!("{operation} of '{name}'").into())
    }
}
