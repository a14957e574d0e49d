use std::env;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{Candidate, Cro, Facility, FacilityStatus, Provider, Study};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    let env_filter = env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("trialnav=debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Candidate with just an id and a name.
pub fn candidate(id: &str, name: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

/// Two-CRO study used across tests:
///
/// ```text
/// Oncology Phase II (rs-1)
/// ├── Acme (cro-1)
/// │   ├── General (hf-1, Identified)
/// │   │   ├── Dr. X (pcp-1): Jane (pt-1), John (pt-2)
/// │   │   └── Dr. Y (pcp-2): Mary (pt-3)
/// │   ├── North (hf-2, Identified)
/// │   │   └── Dr. Z (pcp-3): (none)
/// │   └── Harbor (hf-3, Pending)
/// │       └── Dr. W (pcp-4): Ann (pt-4)
/// └── Beta (cro-2)
///     └── Lakeside (hf-4, Identified)
/// ```
pub fn sample_study() -> Study {
    let facility = |id: &str, name: &str, status: &str, providers: Vec<Provider>| Facility {
        id: id.to_string(),
        name: name.to_string(),
        status: FacilityStatus::from(status),
        css_class: None,
        providers,
    };
    let provider = |id: &str, name: &str, candidates: Vec<Candidate>| Provider {
        id: id.to_string(),
        name: name.to_string(),
        candidates,
    };

    Study {
        id: "rs-1".to_string(),
        name: "Oncology Phase II".to_string(),
        cros: vec![
            Cro {
                id: "cro-1".to_string(),
                name: "Acme".to_string(),
                facilities: vec![
                    facility(
                        "hf-1",
                        "General",
                        "Identified",
                        vec![
                            provider(
                                "pcp-1",
                                "Dr. X",
                                vec![candidate("pt-1", "Jane"), candidate("pt-2", "John")],
                            ),
                            provider("pcp-2", "Dr. Y", vec![candidate("pt-3", "Mary")]),
                        ],
                    ),
                    facility(
                        "hf-2",
                        "North",
                        "Identified",
                        vec![provider("pcp-3", "Dr. Z", vec![])],
                    ),
                    facility(
                        "hf-3",
                        "Harbor",
                        "Pending",
                        vec![provider("pcp-4", "Dr. W", vec![candidate("pt-4", "Ann")])],
                    ),
                ],
            },
            Cro {
                id: "cro-2".to_string(),
                name: "Beta".to_string(),
                facilities: vec![facility("hf-4", "Lakeside", "Identified", vec![])],
            },
        ],
    }
}

/// Same study restricted to its first CRO.
pub fn single_cro_study() -> Study {
    let mut study = sample_study();
    study.cros.truncate(1);
    study
}

// test
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn test_sample_study_shape() {
        let study = sample_study();
        assert_eq!(study.cros.len(), 2);
        assert_eq!(study.cros[0].facilities.len(), 3);
        assert_eq!(single_cro_study().cros.len(), 1);
    }
}
