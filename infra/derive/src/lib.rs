#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared across the workspace.
//! Today this is the error attribute every crate uses to declare its error enum,
//! giving all of them the same `context` plumbing and message layout.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! confine-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro that turns an enum into a workspace error type.
///
/// Every variant must use named fields. A variant carrying a source (a field named
/// `source`, or marked `#[source]` / `#[from]`) must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// The attribute:
/// 1. Derives `Debug` and `thiserror::Error` unless already derived.
/// 2. Generates a `<Name>Ext` trait with `.context(..)` for `Result<T, Name>` and for
///    `Result<T, Source>` of every source type.
/// 3. Implements `From<Source>` for source types that appear in exactly one variant whose
///    only fields are the source and its context. A source type shared by several variants,
///    or living next to other fields, gets no `From`; build the variant explicitly.
/// 4. Implements `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///    variant exists.
/// 5. Adds inherent helpers: `kind()` (variant name), `context_str()` and `with_context(..)`.
/// 6. Emits a module level `format_context` helper rendering `" (context)"` or nothing.
///
/// # Example
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[confine_derive::confine_error]
/// pub enum LoadError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<(), LoadError> {
///     build().context("Building settings")?; // config::ConfigError -> LoadError::Config
///     Err("unreachable state".into())         // &str -> LoadError::Internal
/// }
/// ```
#[proc_macro_attribute]
pub fn confine_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
