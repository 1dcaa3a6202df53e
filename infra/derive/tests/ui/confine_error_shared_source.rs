use confine_derive::confine_error;
use std::borrow::Cow;

#[confine_error]
pub enum DemoError {
    #[error("Read error{}: {source}", format_context(.context))]
    Read { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Write error{}: {source}", format_context(.context))]
    Write { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Rejected: {reason}")]
    Rejected { reason: String },
}

fn main() {
    let err = DemoError::Rejected { reason: "nope".to_owned() }.with_context("ignored");
    assert_eq!(err.kind(), "Rejected");
    assert!(err.context_str().is_none());
}
