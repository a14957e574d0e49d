//! Derived view state handed to the rendering side

use std::fmt;

use serde::Serialize;

use crate::domain::{Candidate, Level, NavigationMode, StepTag};

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub step_tag: StepTag,
}

impl Breadcrumb {
    pub fn new(label: impl Into<String>, step_tag: StepTag) -> Self {
        Self {
            label: label.into(),
            step_tag,
        }
    }
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Child entry as rendered in a list or column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildSummary {
    pub id: String,
    pub name: String,
    /// Part of the current selection path
    pub selected: bool,
    /// False for facilities outside the eligible status (styling hint)
    pub clickable: bool,
}

/// Snapshot of everything the rendering side needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub mode: NavigationMode,
    /// Only tracked in guided mode
    pub current_step: Option<Level>,
    pub selection_path: Vec<String>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub cros: Vec<ChildSummary>,
    pub facilities: Vec<ChildSummary>,
    pub providers: Vec<ChildSummary>,
    pub candidates: Vec<ChildSummary>,
    /// HCF, PCP, PATIENT column offsets (free mode)
    pub column_offsets: [u32; 3],
    pub detail: Option<Candidate>,
    pub show_detail: bool,
}

impl ViewState {
    pub fn children(&self, level: Level) -> &[ChildSummary] {
        match level {
            Level::Cro => &self.cros,
            Level::Hcf => &self.facilities,
            Level::Pcp => &self.providers,
            Level::Patient => &self.candidates,
        }
    }
}
