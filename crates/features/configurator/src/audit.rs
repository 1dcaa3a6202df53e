//! Audit logging of configuration attempts.
//!
//! A record is handed to the logger as a format string with `{}` slots plus the rendered
//! values, so sinks that keep values as separate fields can do so. [`render`] fills the
//! slots for sinks that only want the final line.

use crate::error::ConfiguratorError;
use confine_domain::{Constraints, Value};
use fxhash::FxHashMap;
use std::any::Any;
use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::sync::Arc;
use tracing::{Span, info};

/// Target of the events emitted by [`LogFn::tracing`].
pub const AUDIT_TARGET: &str = "confine::audit";

/// Replaces every value in secret mode.
pub const SECRET_MARKER: &str = "*secret*";

/// Slot placeholder understood by [`render`].
const SLOT: &str = "{}";

/// Signature of a full audit callback: context, format string and slot values.
pub type LogCallback = dyn Fn(&LogContext, &str, &[String]) + Send + Sync;

/// Callback shapes accepted by [`LogFn::from_dyn`].
pub type ContextMessageCallback = dyn Fn(&LogContext, &str) + Send + Sync;
pub type FormatCallback = dyn Fn(&str, &[String]) + Send + Sync;
pub type MessageCallback = dyn Fn(&str) + Send + Sync;

const ACCEPTED_SHAPES: &str = "Fn(&LogContext, &str, &[String]), Fn(&LogContext, &str), \
                               Fn(&str, &[String]), Fn(&str)";

/// Ambient data passed to every audit callback.
///
/// The span is entered by [`LogFn::tracing`] while the event is emitted, so audit lines
/// inherit request ids and similar fields of the caller.
#[derive(Debug, Clone)]
pub struct LogContext {
    span: Span,
    fields: FxHashMap<Cow<'static, str>, String>,
}

impl Default for LogContext {
    fn default() -> Self {
        Self { span: Span::none(), fields: FxHashMap::default() }
    }
}

impl LogContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context bound to the currently entered span.
    #[must_use]
    pub fn current() -> Self {
        Self::default().with_span(Span::current())
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<Cow<'static, str>>, value: impl ToString) -> Self {
        self.fields.insert(key.into(), value.to_string());
        self
    }

    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Fields sorted by key.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut fields: Vec<_> =
            self.fields.iter().map(|(k, v)| (k.as_ref(), v.as_str())).collect();
        fields.sort_unstable();
        fields.into_iter()
    }
}

/// A shareable audit sink.
#[derive(Clone)]
pub struct LogFn(Arc<LogCallback>);

impl Debug for LogFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LogFn").finish_non_exhaustive()
    }
}

impl LogFn {
    /// Sink receiving the context, the format string and the slot values.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&LogContext, &str, &[String]) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Sink receiving the context and the rendered line.
    pub fn contextual<F>(callback: F) -> Self
    where
        F: Fn(&LogContext, &str) + Send + Sync + 'static,
    {
        Self::new(move |ctx, format, args| callback(ctx, &render(format, args)))
    }

    /// Sink receiving the format string and the slot values.
    pub fn formatted<F>(callback: F) -> Self
    where
        F: Fn(&str, &[String]) + Send + Sync + 'static,
    {
        Self::new(move |_, format, args| callback(format, args))
    }

    /// Sink receiving only the rendered line.
    pub fn message<F>(callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self::new(move |_, format, args| callback(&render(format, args)))
    }

    /// Emits an `INFO` event on [`AUDIT_TARGET`] inside the context's span. Context fields
    /// are attached as one `context` field of `key=value` pairs.
    #[must_use]
    pub fn tracing() -> Self {
        Self::new(|ctx, format, args| {
            let _entered = ctx.span().enter();
            let line = render(format, args);
            let fields = ctx.fields().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>();
            if fields.is_empty() {
                info!(target: AUDIT_TARGET, "{line}");
            } else {
                info!(target: AUDIT_TARGET, context = %fields.join(" "), "{line}");
            }
        })
    }

    /// Builds a sink from a type-erased callback.
    ///
    /// Accepts an `Arc` of any of [`LogCallback`], [`ContextMessageCallback`],
    /// [`FormatCallback`] or [`MessageCallback`], or a `LogFn` itself.
    ///
    /// # Errors
    /// Returns [`ConfiguratorError::InvalidLogger`] for anything else.
    pub fn from_dyn(registration: &dyn Any) -> Result<Self, ConfiguratorError> {
        if let Some(log) = registration.downcast_ref::<Self>() {
            return Ok(log.clone());
        }
        if let Some(callback) = registration.downcast_ref::<Arc<LogCallback>>() {
            return Ok(Self(Arc::clone(callback)));
        }
        if let Some(callback) = registration.downcast_ref::<Arc<ContextMessageCallback>>() {
            let callback = Arc::clone(callback);
            return Ok(Self::contextual(move |ctx, line| callback(ctx, line)));
        }
        if let Some(callback) = registration.downcast_ref::<Arc<FormatCallback>>() {
            let callback = Arc::clone(callback);
            return Ok(Self::formatted(move |format, args| callback(format, args)));
        }
        if let Some(callback) = registration.downcast_ref::<Arc<MessageCallback>>() {
            let callback = Arc::clone(callback);
            return Ok(Self::message(move |line| callback(line)));
        }

        Err(ConfiguratorError::InvalidLogger {
            message: format!("invalid logger function type (type should be in [{ACCEPTED_SHAPES}])")
                .into(),
            context: None,
        })
    }

    pub fn log(&self, ctx: &LogContext, format: &str, args: &[String]) {
        (self.0)(ctx, format, args);
    }
}

/// How a value is rendered in audit lines. `{value}` and `{type}` are substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFormat(Cow<'static, str>);

impl ValueFormat {
    /// `'8080'`
    pub const QUOTED: Self = Self(Cow::Borrowed("'{value}'"));
    /// `'8080' (u16)`
    pub const TYPED: Self = Self(Cow::Borrowed("'{value}' ({type})"));

    /// An empty template falls back to [`ValueFormat::QUOTED`].
    pub fn new(template: impl Into<Cow<'static, str>>) -> Self {
        let template = template.into();
        if template.is_empty() { Self::QUOTED } else { Self(template) }
    }

    #[must_use]
    pub fn apply(&self, value: &Value) -> String {
        self.0.replace("{type}", &value.type_name()).replace("{value}", &value.to_string())
    }
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self::QUOTED
    }
}

/// One configuration attempt, ready to be turned into an audit line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Record<'a> {
    pub(crate) name: Option<&'a str>,
    pub(crate) constraints: &'a Constraints,
    pub(crate) input: &'a Value,
    pub(crate) output: &'a Value,
}

impl Record<'_> {
    /// Format string and slot values.
    ///
    /// In secret mode every value (constraints included) is replaced by [`SECRET_MARKER`]
    /// directly in the format string and no values are produced.
    pub(crate) fn layout(&self, value_format: &ValueFormat, secret: bool) -> (String, Vec<String>) {
        let mut line =
            Line { format: String::from("configuration"), args: Vec::new(), value_format, secret };

        if let Some(name) = self.name {
            line.format.push_str(" of '");
            line.format.push_str(SLOT);
            line.format.push('\'');
            line.args.push(name.to_owned());
        }
        line.format.push(':');

        let c = self.constraints;
        if let Some(min) = c.min() {
            line.value(" min: ", min);
        }
        if let Some(max) = c.max() {
            line.value(" max: ", max);
        }
        if !c.allowed().is_empty() {
            line.list(" allowed: ", c.allowed());
        }
        if !c.disallowed().is_empty() {
            line.list(" disallowed: ", c.disallowed());
        }
        if let Some(default) = c.default_value() {
            line.value(" default: ", default);
        }
        line.value(" input: ", self.input);
        line.value(" output: ", self.output);

        (line.format, line.args)
    }
}

struct Line<'a> {
    format: String,
    args: Vec<String>,
    value_format: &'a ValueFormat,
    secret: bool,
}

impl Line<'_> {
    fn slot(&mut self, value: &Value) {
        if self.secret {
            self.format.push_str(SECRET_MARKER);
        } else {
            self.format.push_str(SLOT);
            self.args.push(self.value_format.apply(value));
        }
    }

    fn value(&mut self, label: &str, value: &Value) {
        self.format.push_str(label);
        self.slot(value);
    }

    fn list(&mut self, label: &str, values: &[Value]) {
        self.format.push_str(label);
        self.format.push('[');
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.format.push(',');
            }
            self.slot(value);
        }
        self.format.push(']');
    }
}

/// Fills the `{}` slots of `format` with `args`, in order.
///
/// Slots without a matching argument are kept verbatim; surplus arguments are ignored.
#[must_use]
pub fn render(format: &str, args: &[String]) -> String {
    let capacity = format.len() + args.iter().map(String::len).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut args = args.iter();
    let mut pieces = format.split(SLOT);

    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for piece in pieces {
        out.push_str(args.next().map_or(SLOT, String::as_str));
        out.push_str(piece);
    }
    out
}
