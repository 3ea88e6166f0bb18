//! Typed shapes for OpenAPI 2.0 (Swagger) and OpenAPI 3.0 documents.
//!
//! The shapes derive `serde::Serialize` and `serde::Deserialize`, so any
//! serde format crate can read and write them. Rules the types cannot
//! express are reported by [`Document::check`] and the per-family `check`
//! methods.

pub mod check;
pub mod config;
mod de;
pub mod document;
pub mod error;
pub mod extensions;
pub mod format;
pub mod http;
pub mod reference;
pub mod v2;
pub mod v3;

pub use check::{Check, Checker};
pub use config::{CheckOptions, StatusCodePolicy};
pub use document::Document;
pub use error::{InvalidStatusKey, Severity, ShapeError, Violation, Violations};
pub use extensions::Extensions;
pub use format::DataFormat;
pub use http::{HttpMethod, StatusClass, StatusCode};
pub use reference::ReferenceOr;
