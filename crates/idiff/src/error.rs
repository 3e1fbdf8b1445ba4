//! Error types for the idiff crate.
//!
//! Comparison itself never fails: every mismatch is a diff entry. Errors only
//! arise when a value has to be converted before it can be compared.

/// Errors that can occur while preparing values for a diff.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A value could not be serialized into a comparable form.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
