//! Pure validators: untrusted JSON in, validated draft or a complete
//! per-field error report out. No storage access happens here.

pub mod field_errors;
pub mod member;
pub mod poll;

pub use field_errors::FieldErrors;
