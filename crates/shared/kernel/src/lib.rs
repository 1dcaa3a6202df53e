//! Engine shared by every configurator.
//! Keep this crate stateless; it answers three questions about pairs of runtime-typed values:
//! can one be converted into the other's type, are they equal, and how do they order.
//!
//! ## Conversion
//! ```rust
//! # use confine_kernel::{convert, domain::{Value, ValueType}};
//! let port = convert(&ValueType::U16, Some(&Value::I64(8080))).unwrap();
//! assert_eq!(port, Value::U16(8080));
//! ```
//!
//! ## Ordering
//! User types exposing `Lower`/`Before`/`Greater`/`After` are compared through those
//! capabilities first; everything else falls back to the native order of its kind.
//! ```rust
//! # use confine_kernel::{compare, domain::Value};
//! # use std::cmp::Ordering;
//! assert_eq!(compare(&Value::I8(-1), &Value::U64(3)).unwrap(), Ordering::Less);
//! ```
//!
//! ## Config loading (non-wasm)
//! ```rust,ignore
//! #[cfg(not(target_arch = "wasm32"))]
//! # {
//!     use confine_kernel::config::load_settings;
//!     let settings = load_settings(Some("confine")).unwrap();
//! # }
//! ```
mod capability;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
mod convert;
mod equality;
mod error;
mod ordering;

pub use crate::capability::call_capability;
pub use crate::convert::{convert, convert_optional, convert_sequence};
pub use crate::equality::{equal, has_equal, indirect};
pub use crate::error::{EngineError, EngineErrorExt};
pub use crate::ordering::compare;

pub use confine_domain as domain;
