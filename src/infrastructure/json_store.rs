//! JSON dataset store
//!
//! A dataset file is an array of studies in the platform's wrapper format.
//! The store serves hierarchy reads and persists enrollment status updates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, IoResultExt};
use crate::domain::Study;
use crate::infrastructure::traits::{
    EnrollmentStatusUpdater, FileSystem, HierarchySource, RealFileSystem, Summary,
};
use crate::infrastructure::{InfraError, InfraResult};

/// File-backed `HierarchySource` and `EnrollmentStatusUpdater`.
pub struct JsonStudyStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonStudyStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Store over the real filesystem.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(RealFileSystem), path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole dataset.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> InfraResult<Vec<Study>> {
        if !self.fs.exists(&self.path) {
            return Err(ApplicationError::InvalidDataset {
                path: self.path.clone(),
                message: "file does not exist".to_string(),
            }
            .into());
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read dataset", &self.path)?;
        let studies: Vec<Study> = serde_json::from_str(&content)
            .map_err(|e| InfraError::json(format!("parse {}", self.path.display()), e))?;
        debug!("load: {} studies", studies.len());
        Ok(studies)
    }

    fn save(&self, studies: &[Study]) -> InfraResult<()> {
        let content = serde_json::to_string_pretty(studies)
            .map_err(|e| InfraError::json(format!("serialize {}", self.path.display()), e))?;
        self.fs
            .write(&self.path, &content)
            .map_err(|e| InfraError::io(format!("write {}", self.path.display()), e))
    }

    fn find_study(studies: Vec<Study>, study_id: &str) -> InfraResult<Study> {
        studies
            .into_iter()
            .find(|s| s.id == study_id)
            .ok_or_else(|| ApplicationError::StudyNotFound(study_id.to_string()).into())
    }
}

impl HierarchySource for JsonStudyStore {
    fn list_studies(&self) -> InfraResult<Vec<Summary>> {
        Ok(self
            .load()?
            .into_iter()
            .map(|s| Summary {
                id: s.id,
                name: s.name,
            })
            .collect())
    }

    fn list_cros(&self, study_id: &str) -> InfraResult<Vec<Summary>> {
        let study = Self::find_study(self.load()?, study_id)?;
        Ok(study
            .cros
            .into_iter()
            .map(|c| Summary {
                id: c.id,
                name: c.name,
            })
            .collect())
    }

    #[instrument(level = "debug", skip(self))]
    fn fetch_study_hierarchy(
        &self,
        study_id: &str,
        cro_ids: &[String],
    ) -> InfraResult<Vec<Study>> {
        let mut study = Self::find_study(self.load()?, study_id)?;
        study.cros.retain(|c| cro_ids.contains(&c.id));
        debug!("fetch_study_hierarchy: {} CROs selected", study.cros.len());
        Ok(vec![study])
    }
}

impl EnrollmentStatusUpdater for JsonStudyStore {
    #[instrument(level = "debug", skip(self))]
    fn update_enrollment_status(&self, candidate_id: &str, status: &str) -> InfraResult<()> {
        let mut studies = self.load()?;
        let candidate = studies
            .iter_mut()
            .find_map(|s| s.find_candidate_mut(candidate_id))
            .ok_or_else(|| ApplicationError::CandidateNotFound(candidate_id.to_string()))?;
        candidate.enrollment_status = Some(status.to_string());
        self.save(&studies)
    }
}
