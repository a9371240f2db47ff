//! Best-effort lookup of diagnostic fields inside a parsed error record.
//!
//! The record shape is not fixed, so every lookup is allowed to come back
//! empty. Absence is reported as data, never as an error.

pub mod fields;
pub mod path;

pub use fields::{
    DIAGNOSTIC_FIELDS, DiagnosticReport, default_paths, find_diagnostic_fields, object_keys,
};
pub use path::{FieldPath, Lookup, resolve};
