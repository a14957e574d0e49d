//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (HierarchySource, EnrollmentStatusUpdater)
//! but are themselves concrete structs, not traits.

mod consent;
mod navigator;

pub use consent::{ConsentOutcome, ConsentService, ENROLLMENT_ACCEPTED, ENROLLMENT_REJECTED};
pub use navigator::NavigatorService;
