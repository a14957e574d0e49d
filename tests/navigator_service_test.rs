//! Tests for NavigatorService and ConsentService with mock collaborators

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rstest::rstest;

use trialnav::application::services::{
    ConsentService, NavigatorService, ENROLLMENT_ACCEPTED, ENROLLMENT_REJECTED,
};
use trialnav::application::ApplicationError;
use trialnav::domain::{HierarchySelectionController, Level, NavigationMode, Study};
use trialnav::infrastructure::traits::{EnrollmentStatusUpdater, HierarchySource, Summary};
use trialnav::infrastructure::{InfraError, InfraResult};
use trialnav::util::testing::{init_test_setup, sample_study};

// ============================================================
// Mocks
// ============================================================

/// Serves `sample_study` until `fail` is set.
#[derive(Default)]
struct MockSource {
    fail: AtomicBool,
    no_cros: bool,
    empty_fetch: bool,
}

impl MockSource {
    fn check(&self) -> InfraResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(InfraError::io(
                "connect",
                io::Error::new(io::ErrorKind::ConnectionRefused, "service down"),
            ));
        }
        Ok(())
    }
}

impl HierarchySource for MockSource {
    fn list_studies(&self) -> InfraResult<Vec<Summary>> {
        self.check()?;
        Ok(vec![Summary {
            id: "rs-1".into(),
            name: "Oncology Phase II".into(),
        }])
    }

    fn list_cros(&self, _study_id: &str) -> InfraResult<Vec<Summary>> {
        self.check()?;
        if self.no_cros {
            return Ok(Vec::new());
        }
        Ok(sample_study()
            .cros
            .into_iter()
            .map(|c| Summary {
                id: c.id,
                name: c.name,
            })
            .collect())
    }

    fn fetch_study_hierarchy(
        &self,
        _study_id: &str,
        cro_ids: &[String],
    ) -> InfraResult<Vec<Study>> {
        self.check()?;
        if self.empty_fetch {
            return Ok(Vec::new());
        }
        let mut study = sample_study();
        study.cros.retain(|c| cro_ids.contains(&c.id));
        Ok(vec![study])
    }
}

/// Records every write; fails when `fail` is set.
#[derive(Default)]
struct RecordingUpdater {
    fail: bool,
    writes: Mutex<Vec<(String, String)>>,
}

impl EnrollmentStatusUpdater for RecordingUpdater {
    fn update_enrollment_status(&self, candidate_id: &str, status: &str) -> InfraResult<()> {
        if self.fail {
            return Err(InfraError::io(
                "post status",
                io::Error::new(io::ErrorKind::TimedOut, "timed out"),
            ));
        }
        self.writes
            .lock()
            .unwrap()
            .push((candidate_id.to_string(), status.to_string()));
        Ok(())
    }
}

fn navigator(source: Arc<MockSource>) -> NavigatorService {
    init_test_setup();
    NavigatorService::new(
        source,
        HierarchySelectionController::new(NavigationMode::Guided),
    )
}

fn all_cros() -> Vec<String> {
    vec!["cro-1".to_string(), "cro-2".to_string()]
}

// ============================================================
// NavigatorService::open()
// ============================================================

#[test]
fn given_selected_cros_when_opening_then_installs_tree() {
    // Arrange
    let mut service = navigator(Arc::new(MockSource::default()));

    // Act
    let installed = service.open("rs-1", &all_cros()).unwrap();

    // Assert
    assert!(installed);
    assert_eq!(service.controller().visible_children(Level::Cro).len(), 2);
    assert!(service.last_error().is_none());
}

#[test]
fn given_one_cro_when_opening_then_auto_selects_it() {
    let mut service = navigator(Arc::new(MockSource::default()));

    service.open("rs-1", &["cro-2".to_string()]).unwrap();

    assert_eq!(
        service.controller().selection_path().ids(),
        &["cro-2".to_string()]
    );
}

#[test]
fn given_no_cros_when_opening_then_refuses_before_fetching() {
    let source = Arc::new(MockSource::default());
    source.fail.store(true, Ordering::SeqCst);
    let mut service = navigator(source);

    let result = service.open("rs-1", &[]);

    assert!(matches!(result, Err(ApplicationError::NoCrosSelected(_))));
    assert!(service.last_error().is_none());
}

#[test]
fn given_failing_source_when_opening_then_controller_is_untouched() {
    // Arrange
    let source = Arc::new(MockSource::default());
    let mut service = navigator(source.clone());
    service.open("rs-1", &all_cros()).unwrap();
    service.controller_mut().select(Level::Cro, "cro-1");
    service.controller_mut().select(Level::Hcf, "hf-1");
    let before = service.controller().view();
    source.fail.store(true, Ordering::SeqCst);

    // Act
    let result = service.open("rs-1", &all_cros());

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::OperationFailed { .. })
    ));
    assert_eq!(service.controller().view(), before);
    let message = service.last_error().expect("error recorded");
    assert!(message.contains("fetch study hierarchy"), "{message}");
    assert!(message.contains("service down"), "{message}");
}

#[test]
fn given_recorded_error_when_opening_succeeds_then_error_is_cleared() {
    let source = Arc::new(MockSource::default());
    let mut service = navigator(source.clone());
    source.fail.store(true, Ordering::SeqCst);
    assert!(service.open("rs-1", &all_cros()).is_err());

    source.fail.store(false, Ordering::SeqCst);
    service.open("rs-1", &all_cros()).unwrap();

    assert!(service.last_error().is_none());
}

#[test]
fn given_empty_fetch_when_opening_then_keeps_current_tree() {
    let mut service = navigator(Arc::new(MockSource {
        empty_fetch: true,
        ..Default::default()
    }));

    let installed = service.open("rs-1", &all_cros()).unwrap();

    assert!(!installed);
    assert!(service.controller().tree().is_none());
}

// ============================================================
// NavigatorService listing
// ============================================================

#[test]
fn given_source_when_listing_studies_then_returns_summaries() {
    let service = navigator(Arc::new(MockSource::default()));

    let studies = service.studies().unwrap();

    assert_eq!(studies.len(), 1);
    assert_eq!(studies[0].id, "rs-1");
}

#[test]
fn given_study_without_cros_when_listing_cros_then_no_ongoing_processes() {
    let service = navigator(Arc::new(MockSource {
        no_cros: true,
        ..Default::default()
    }));

    let result = service.cros("rs-1");

    assert!(matches!(
        result,
        Err(ApplicationError::NoOngoingProcesses(id)) if id == "rs-1"
    ));
}

// ============================================================
// ConsentService
// ============================================================

#[rstest]
#[case::accept(true, ENROLLMENT_ACCEPTED)]
#[case::reject(false, ENROLLMENT_REJECTED)]
fn given_candidate_when_deciding_consent_then_writes_fixed_status(
    #[case] accept: bool,
    #[case] expected: &str,
) {
    // Arrange
    init_test_setup();
    let updater = Arc::new(RecordingUpdater::default());
    let consent = ConsentService::new(updater.clone());

    // Act
    let outcome = if accept {
        consent.accept("pt-1")
    } else {
        consent.reject("pt-1")
    }
    .unwrap();

    // Assert
    assert_eq!(outcome.status, expected);
    assert_eq!(outcome.message, format!("Status updated to {}", expected));
    assert_eq!(
        *updater.writes.lock().unwrap(),
        vec![("pt-1".to_string(), expected.to_string())]
    );
}

#[rstest]
#[case("")]
#[case("   ")]
fn given_blank_candidate_id_when_updating_then_rejects_without_writing(#[case] id: &str) {
    let updater = Arc::new(RecordingUpdater::default());
    let consent = ConsentService::new(updater.clone());

    let result = consent.accept(id);

    assert!(matches!(result, Err(ApplicationError::MissingCandidateId)));
    assert!(updater.writes.lock().unwrap().is_empty());
}

#[test]
fn given_open_detail_when_updating_status_then_local_copy_follows() {
    // Arrange
    let mut service = navigator(Arc::new(MockSource::default()));
    service.open("rs-1", &all_cros()).unwrap();
    for (level, id) in [(Level::Cro, "cro-1"), (Level::Hcf, "hf-1"), (Level::Pcp, "pcp-1")] {
        service.controller_mut().select(level, id);
    }
    service.controller_mut().select_candidate(0);
    let consent = ConsentService::new(Arc::new(RecordingUpdater::default()));

    // Act
    let outcome = service
        .update_status(&consent, "pt-1", ENROLLMENT_ACCEPTED)
        .unwrap();

    // Assert
    assert_eq!(outcome.candidate_id, "pt-1");
    let detail = service.controller().detail().expect("detail open");
    assert_eq!(detail.enrollment_status.as_deref(), Some(ENROLLMENT_ACCEPTED));
}

#[test]
fn given_failing_updater_when_updating_status_then_local_copy_is_kept() {
    // Arrange
    let mut service = navigator(Arc::new(MockSource::default()));
    service.open("rs-1", &all_cros()).unwrap();
    let consent = ConsentService::new(Arc::new(RecordingUpdater {
        fail: true,
        ..Default::default()
    }));

    // Act
    let result = service.update_status(&consent, "pt-1", ENROLLMENT_REJECTED);

    // Assert
    assert!(result.is_err());
    let local = service.controller().tree().and_then(|t| t.find_candidate("pt-1"));
    assert!(local.is_some_and(|c| c.enrollment_status.is_none()));
    assert!(service
        .last_error()
        .is_some_and(|m| m.contains("timed out")));
}
