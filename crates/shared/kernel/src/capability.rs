use crate::equality::indirect;
use crate::error::EngineError;
use confine_domain::{Capability, Invocation, Value};
use tracing::trace;

/// Invokes `capability` on `receiver` with `argument`, after unwrapping shared indirections.
///
/// # Errors
/// [`EngineError::Capability`] when the receiver or the argument is nil, the receiver does not
/// expose the capability, or the argument is not of the receiver's type.
pub fn call_capability(
    capability: Capability,
    receiver: &Value,
    argument: &Value,
) -> Result<bool, EngineError> {
    let (receiver, argument) = indirect(receiver, argument);
    invoke(capability, receiver, argument)
}

/// Like [`call_capability`] on already unwrapped values, with failures reduced to `None`.
pub(crate) fn try_capability(
    capability: Capability,
    receiver: &Value,
    argument: &Value,
) -> Option<bool> {
    invoke(capability, receiver, argument)
        .inspect_err(|err| trace!(%capability, error = %err, "Capability not usable"))
        .ok()
}

fn invoke(capability: Capability, receiver: &Value, argument: &Value) -> Result<bool, EngineError> {
    if receiver.is_nil() {
        return Err(EngineError::capability(format!(
            "method '{capability}' should not be called with nil receiver"
        )));
    }
    if argument.is_nil() {
        return Err(EngineError::capability(format!(
            "method '{capability}' should not be called with nil argument"
        )));
    }

    let Value::Custom(custom) = receiver else {
        return Err(missing(capability, receiver));
    };
    match custom.dyn_invoke(capability, argument) {
        Invocation::Answered(answer) => Ok(answer),
        Invocation::Unsupported => Err(missing(capability, receiver)),
        Invocation::Mismatched => Err(EngineError::capability(format!(
            "method '{capability}' of type '{}' can not accept argument of type '{}'",
            receiver.type_name(),
            argument.type_name(),
        ))),
    }
}

fn missing(capability: Capability, receiver: &Value) -> EngineError {
    EngineError::capability(format!(
        "type '{}' has no method '{capability}'",
        receiver.type_name()
    ))
}
