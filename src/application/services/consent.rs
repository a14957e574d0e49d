//! Consent status service
//!
//! Accept/reject flows write a fixed enrollment status through the
//! status updater and report the outcome for display.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::traits::EnrollmentStatusUpdater;
use crate::infrastructure::InfraError;

pub const ENROLLMENT_ACCEPTED: &str = "Enrollment Accepted";
pub const ENROLLMENT_REJECTED: &str = "Enrollment Rejected";

/// Result of a successful status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentOutcome {
    pub candidate_id: String,
    pub status: String,
    pub message: String,
}

/// Service for updating a candidate's enrollment status.
pub struct ConsentService {
    updater: Arc<dyn EnrollmentStatusUpdater>,
}

impl ConsentService {
    pub fn new(updater: Arc<dyn EnrollmentStatusUpdater>) -> Self {
        Self { updater }
    }

    pub fn accept(&self, candidate_id: &str) -> ApplicationResult<ConsentOutcome> {
        self.update(candidate_id, ENROLLMENT_ACCEPTED)
    }

    pub fn reject(&self, candidate_id: &str) -> ApplicationResult<ConsentOutcome> {
        self.update(candidate_id, ENROLLMENT_REJECTED)
    }

    /// Set an arbitrary enrollment status.
    #[instrument(level = "debug", skip(self))]
    pub fn update(&self, candidate_id: &str, status: &str) -> ApplicationResult<ConsentOutcome> {
        if candidate_id.trim().is_empty() {
            return Err(ApplicationError::MissingCandidateId);
        }
        self.updater
            .update_enrollment_status(candidate_id, status)
            .map_err(|e| match e {
                InfraError::Application(inner) => inner,
                other => ApplicationError::collaborator(
                    format!("update enrollment status of {}", candidate_id),
                    other,
                ),
            })?;
        debug!("update: {} -> {}", candidate_id, status);

        Ok(ConsentOutcome {
            candidate_id: candidate_id.to_string(),
            status: status.to_string(),
            message: format!("Status updated to {}", status),
        })
    }
}
