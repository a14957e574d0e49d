//! I/O boundary traits for testability
//!
//! These traits abstract the collaborators the navigator talks to, allowing
//! services to be tested with mock implementations.

use std::io;
use std::path::Path;

use crate::domain::Study;
use crate::infrastructure::InfraResult;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Id and display name of a study or CRO, for pick lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub id: String,
    pub name: String,
}

/// Supplies study hierarchies.
pub trait HierarchySource: Send + Sync {
    /// All research studies.
    fn list_studies(&self) -> InfraResult<Vec<Summary>>;

    /// CROs participating in a study.
    fn list_cros(&self, study_id: &str) -> InfraResult<Vec<Summary>>;

    /// Study hierarchy restricted to the selected CROs.
    ///
    /// Returned as a collection; callers use the first element.
    fn fetch_study_hierarchy(&self, study_id: &str, cro_ids: &[String])
        -> InfraResult<Vec<Study>>;
}

/// Writes a candidate's enrollment status back to the system of record.
pub trait EnrollmentStatusUpdater: Send + Sync {
    fn update_enrollment_status(&self, candidate_id: &str, status: &str) -> InfraResult<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
