//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use crate::application::services::{ConsentService, NavigatorService};
use crate::config::Settings;
use crate::domain::HierarchySelectionController;
use crate::infrastructure::traits::{
    EnrollmentStatusUpdater, FileSystem, HierarchySource, RealFileSystem,
};
use crate::infrastructure::JsonStudyStore;

/// Container holding the settings and collaborators for one dataset.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Study hierarchy source
    pub source: Arc<dyn HierarchySource>,

    /// Enrollment status updater
    pub updater: Arc<dyn EnrollmentStatusUpdater>,
}

impl ServiceContainer {
    /// Create a container backed by a JSON dataset on the real filesystem.
    pub fn new(settings: Settings, dataset: &Path) -> Self {
        Self::with_fs(settings, dataset, Arc::new(RealFileSystem))
    }

    /// Create a container over a custom filesystem (for testing).
    pub fn with_fs(settings: Settings, dataset: &Path, fs: Arc<dyn FileSystem>) -> Self {
        let store = Arc::new(JsonStudyStore::new(fs, dataset));
        Self::with_deps(settings, store.clone(), store)
    }

    /// Create a container with custom collaborators (for testing).
    pub fn with_deps(
        settings: Settings,
        source: Arc<dyn HierarchySource>,
        updater: Arc<dyn EnrollmentStatusUpdater>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            source,
            updater,
        }
    }

    /// Controller configured from settings.
    pub fn controller(&self) -> HierarchySelectionController {
        HierarchySelectionController::new(self.settings.mode)
            .with_step_policy(self.settings.miss_policy)
            .with_eligible_status(self.settings.eligible_status.clone())
    }

    pub fn navigator(&self) -> NavigatorService {
        NavigatorService::new(self.source.clone(), self.controller())
    }

    pub fn consent(&self) -> ConsentService {
        ConsentService::new(self.updater.clone())
    }
}
