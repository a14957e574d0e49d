//! Domain layer: entities and navigation logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod controller;
pub mod detail;
pub mod entities;
pub mod error;
pub mod level;
pub mod selection;
pub mod step;
pub mod view;

pub use controller::{HierarchySelectionController, Listener, Selection, SubscriptionId};
pub use detail::{CandidateDetail, DetailRow};
pub use entities::*;
pub use error::DomainError;
pub use level::{Level, NavigationMode, StepPolicy, StepTag};
pub use selection::{ColumnOffsets, SelectionPath};
pub use step::NavStep;
pub use view::{Breadcrumb, ChildSummary, ViewState};
