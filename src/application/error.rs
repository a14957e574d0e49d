//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("research study not found: {0}")]
    StudyNotFound(String),

    #[error("candidate not found: {0}")]
    CandidateNotFound(String),

    #[error("no candidate id given")]
    MissingCandidateId,

    #[error("no CRO selected for study {0}")]
    NoCrosSelected(String),

    #[error("the selected research study has no ongoing processes at this time: {0}")]
    NoOngoingProcesses(String),

    #[error("invalid dataset {path}: {message}")]
    InvalidDataset { path: PathBuf, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// Wrap a collaborator failure with the action that triggered it.
    pub fn collaborator(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::OperationFailed {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
