use std::borrow::Cow;

/// Failures of the conversion and comparison engine.
#[confine_derive::confine_error]
#[derive(Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A value was required but none was given.
    #[error("Missing value{}: argument should not be absent", format_context(.context))]
    Absent { context: Option<Cow<'static, str>> },

    /// The value's type cannot be converted into the target type.
    #[error(
        "Conversion error{}: argument of type '{from}' should be convertible to type '{to}'",
        format_context(.context)
    )]
    Conversion { from: String, to: String, context: Option<Cow<'static, str>> },

    /// An element of a sequence failed to convert.
    #[error("Invalid element at index '{index}'{}: {source}", format_context(.context))]
    Element { index: usize, source: Box<EngineError>, context: Option<Cow<'static, str>> },

    /// Neither a capability nor the native order applies to the pair.
    #[error(
        "Comparison error{}: argument of type '{left}' can not be lower than or greater than value of type '{right}'",
        format_context(.context)
    )]
    Comparison { left: String, right: String, context: Option<Cow<'static, str>> },

    /// A capability could not be invoked for the pair.
    #[error("Capability error{}: {message}", format_context(.context))]
    Capability { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl EngineError {
    pub(crate) fn conversion(from: impl ToString, to: impl ToString) -> Self {
        Self::Conversion { from: from.to_string(), to: to.to_string(), context: None }
    }

    pub(crate) fn capability(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Capability { message: message.into(), context: None }
    }
}
