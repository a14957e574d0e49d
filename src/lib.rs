//! trialnav: drill-down navigation over clinical-trial enrollment hierarchies
//!
//! Research Study -> CRO -> Healthcare Facility -> Principal Care Provider -> Candidate.
//! The core is [`domain::HierarchySelectionController`]; the remaining layers load
//! datasets, update enrollment status and expose everything on the command line.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
