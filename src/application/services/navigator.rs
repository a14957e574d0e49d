//! Navigator service
//!
//! Bridges the hierarchy source and the selection controller. Results are
//! applied all-or-nothing: a failed fetch leaves the controller untouched
//! and only records a display message.

use std::error::Error;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::services::{ConsentOutcome, ConsentService};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::HierarchySelectionController;
use crate::infrastructure::traits::{HierarchySource, Summary};
use crate::infrastructure::InfraError;

/// Service driving a `HierarchySelectionController` from a `HierarchySource`.
pub struct NavigatorService {
    source: Arc<dyn HierarchySource>,
    controller: HierarchySelectionController,
    last_error: Option<String>,
}

impl NavigatorService {
    pub fn new(source: Arc<dyn HierarchySource>, controller: HierarchySelectionController) -> Self {
        Self {
            source,
            controller,
            last_error: None,
        }
    }

    pub fn controller(&self) -> &HierarchySelectionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut HierarchySelectionController {
        &mut self.controller
    }

    /// Message of the last failed collaborator call, for display.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn studies(&self) -> ApplicationResult<Vec<Summary>> {
        self.source
            .list_studies()
            .map_err(|e| Self::lift("list research studies", e))
    }

    /// CROs of a study; a study without CROs has nothing to navigate.
    pub fn cros(&self, study_id: &str) -> ApplicationResult<Vec<Summary>> {
        let cros = self
            .source
            .list_cros(study_id)
            .map_err(|e| Self::lift("list CROs", e))?;
        if cros.is_empty() {
            return Err(ApplicationError::NoOngoingProcesses(study_id.to_string()));
        }
        Ok(cros)
    }

    /// Fetch the hierarchy for the selected CROs and install it.
    ///
    /// Returns whether a tree was installed; an empty result keeps the current one.
    #[instrument(level = "debug", skip(self))]
    pub fn open(&mut self, study_id: &str, cro_ids: &[String]) -> ApplicationResult<bool> {
        if cro_ids.is_empty() {
            return Err(ApplicationError::NoCrosSelected(study_id.to_string()));
        }
        let studies = match self.source.fetch_study_hierarchy(study_id, cro_ids) {
            Ok(studies) => studies,
            Err(e) => return Err(self.record(Self::lift("fetch study hierarchy", e))),
        };
        self.last_error = None;
        let installed = self.controller.load_tree(&studies);
        debug!("open: study={} installed={}", study_id, installed);
        Ok(installed)
    }

    /// Write a status through `consent` and mirror it locally on success.
    #[instrument(level = "debug", skip(self, consent))]
    pub fn update_status(
        &mut self,
        consent: &ConsentService,
        candidate_id: &str,
        status: &str,
    ) -> ApplicationResult<ConsentOutcome> {
        match consent.update(candidate_id, status) {
            Ok(outcome) => {
                self.last_error = None;
                self.refresh_status(&outcome.candidate_id, &outcome.status);
                Ok(outcome)
            }
            Err(e) => Err(self.record(e)),
        }
    }

    /// Patch the local copy after a status change made elsewhere.
    pub fn refresh_status(&mut self, candidate_id: &str, status: &str) -> bool {
        self.controller.apply_enrollment_status(candidate_id, status)
    }

    /// Keep a one-line message with the whole cause chain for display.
    fn record(&mut self, error: ApplicationError) -> ApplicationError {
        let mut message = error.to_string();
        let mut cause = Error::source(&error);
        while let Some(inner) = cause {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            cause = inner.source();
        }
        warn!("{}", message);
        self.last_error = Some(message);
        error
    }

    fn lift(context: &str, error: InfraError) -> ApplicationError {
        match error {
            InfraError::Application(inner) => inner,
            other => ApplicationError::collaborator(context, other),
        }
    }
}
