//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors cover unparseable navigation input.
/// Lookup misses are not errors; the controller absorbs them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid level: {0} (expected CRO, HCF, PCP or PATIENT)")]
    InvalidLevel(String),

    #[error("invalid breadcrumb tag: {0}")]
    InvalidStepTag(String),

    #[error("invalid navigation mode: {0} (expected guided or free)")]
    InvalidMode(String),

    #[error("invalid step policy: {0} (expected hold or advance)")]
    InvalidStepPolicy(String),

    #[error("invalid navigation step: {step}: {message}")]
    InvalidStep { step: String, message: String },
}
