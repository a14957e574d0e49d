//! Drill-down selection state machine over a study hierarchy
//!
//! The controller owns a private copy of the study and a selection path
//! (CRO -> HCF -> PCP -> PATIENT). Every mutation funnels through the
//! path's `truncate` so a deeper selection never survives a change of
//! one of its ancestors.

use std::fmt;

use tracing::{debug, instrument, trace};

use crate::domain::{
    Breadcrumb, Candidate, ChildSummary, ColumnOffsets, Cro, Facility, Level, NavigationMode,
    Node, Provider, SelectionPath, StepPolicy, StepTag, Study, ViewState, IDENTIFIED,
};

/// Outcome of a `select` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Selected,
    /// The id is not a selectable child of the current parent; the level is now empty.
    Missed,
}

impl Selection {
    pub fn is_selected(self) -> bool {
        self == Selection::Selected
    }
}

/// Handle returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Change listener receiving a fresh view after each state change.
pub type Listener = Box<dyn FnMut(&ViewState)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[derive(Debug)]
pub struct HierarchySelectionController {
    mode: NavigationMode,
    step_policy: StepPolicy,
    eligible_status: String,
    tree: Option<Study>,
    path: SelectionPath,
    current_step: Level,
    offsets: ColumnOffsets,
    detail: Option<Candidate>,
    listeners: Listeners,
}

impl Default for HierarchySelectionController {
    fn default() -> Self {
        Self::new(NavigationMode::default())
    }
}

impl HierarchySelectionController {
    pub fn new(mode: NavigationMode) -> Self {
        Self {
            mode,
            step_policy: StepPolicy::default(),
            eligible_status: IDENTIFIED.to_string(),
            tree: None,
            path: SelectionPath::new(),
            current_step: Level::Cro,
            offsets: ColumnOffsets::default(),
            detail: None,
            listeners: Listeners::default(),
        }
    }

    pub fn with_step_policy(mut self, policy: StepPolicy) -> Self {
        self.step_policy = policy;
        self
    }

    /// Facility status required for a facility to be selectable.
    pub fn with_eligible_status(mut self, status: impl Into<String>) -> Self {
        self.eligible_status = status.into();
        self
    }

    // ============================================================
    // Commands
    // ============================================================

    /// Install the first study of `studies`; an empty slice keeps the current state.
    ///
    /// Returns whether a tree was installed.
    #[instrument(level = "debug", skip(self, studies), fields(count = studies.len()))]
    pub fn load_tree(&mut self, studies: &[Study]) -> bool {
        let Some(study) = studies.first() else {
            debug!("load_tree: empty input, keeping current state");
            return false;
        };
        if studies.len() > 1 {
            trace!("load_tree: ignoring {} extra studies", studies.len() - 1);
        }
        self.install(study.clone());
        true
    }

    /// Install a copy of `study`, resetting all selection state.
    pub fn load_study(&mut self, study: &Study) {
        self.install(study.clone());
    }

    fn install(&mut self, mut study: Study) {
        if self.mode == NavigationMode::Guided {
            study.retain_facilities_with_status(&self.eligible_status);
        }
        debug!(
            "install: study={} cros={} mode={}",
            study.id,
            study.cros.len(),
            self.mode
        );

        self.path.clear();
        self.offsets.reset();
        self.current_step = Level::Cro;
        self.detail = None;

        if let [only] = study.cros.as_slice() {
            debug!("install: auto-selecting single CRO {}", only.id);
            self.path.set(Level::Cro, only.id.clone());
        }
        self.tree = Some(study);
        self.notify();
    }

    /// Select `entity_id` at `level` among the children of the selected parent.
    ///
    /// On a miss the level and everything below it is cleared. Free-mode
    /// offsets of columns that disappear are reset along with the path.
    #[instrument(level = "debug", skip(self))]
    pub fn select(&mut self, level: Level, entity_id: &str) -> Selection {
        let selection = if self.is_selectable(level, entity_id) {
            self.path.set(level, entity_id);
            Selection::Selected
        } else {
            debug!("select: {} not found under current parent", entity_id);
            self.path.truncate(level.depth() - 1);
            Selection::Missed
        };

        match self.mode {
            NavigationMode::Free => self.offsets.truncate(self.path.len()),
            NavigationMode::Guided => {
                self.current_step = match (selection, self.step_policy) {
                    (Selection::Selected, _) | (Selection::Missed, StepPolicy::Advance) => {
                        level.next().unwrap_or(level)
                    }
                    // first level left empty by the miss
                    (Selection::Missed, StepPolicy::Hold) => {
                        Level::from_depth(self.path.len() + 1).unwrap_or(level)
                    }
                };
            }
        }
        self.notify();
        selection
    }

    /// Free-mode click: record the element's vertical offset, then select.
    pub fn select_at(&mut self, level: Level, entity_id: &str, offset: u32) -> Selection {
        if self.mode == NavigationMode::Free {
            self.offsets.record(level, offset);
        }
        self.select(level, entity_id)
    }

    /// Jump back to an ancestor breadcrumb, clearing every level below it.
    ///
    /// Returns false when the tag is not an ancestor of the current path.
    #[instrument(level = "debug", skip(self))]
    pub fn navigate_to_breadcrumb(&mut self, tag: StepTag) -> bool {
        let depth = tag.depth();
        let Some(step) = Level::from_depth(depth + 1) else {
            debug!("navigate_to_breadcrumb: {} has no level below", tag);
            return false;
        };
        if depth > self.path.len() {
            debug!("navigate_to_breadcrumb: {} is not on the current path", tag);
            return false;
        }

        self.path.truncate(depth);
        self.offsets.truncate(depth);
        if self.mode == NavigationMode::Guided {
            self.current_step = step;
        }
        self.notify();
        true
    }

    /// Open a copy of the candidate at `index` of the selected provider.
    ///
    /// Without a provider, or out of bounds, the detail is cleared instead.
    #[instrument(level = "debug", skip(self))]
    pub fn select_candidate(&mut self, index: usize) -> Option<&Candidate> {
        self.detail = self
            .selected_provider()
            .and_then(|p| p.candidates.get(index))
            .cloned();
        if self.detail.is_none() {
            debug!("select_candidate: no candidate at index {}", index);
        }
        self.notify();
        self.detail.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.notify();
    }

    /// Patch a candidate's enrollment status in the local copy after a remote update.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_enrollment_status(&mut self, candidate_id: &str, status: &str) -> bool {
        let Some(candidate) = self
            .tree
            .as_mut()
            .and_then(|t| t.find_candidate_mut(candidate_id))
        else {
            return false;
        };
        candidate.enrollment_status = Some(status.to_string());
        if let Some(detail) = self.detail.as_mut().filter(|d| d.id == candidate_id) {
            detail.enrollment_status = Some(status.to_string());
        }
        self.notify();
        true
    }

    // ============================================================
    // Change notification
    // ============================================================

    pub fn subscribe(&mut self, listener: impl FnMut(&ViewState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.listeners.next_id);
        self.listeners.next_id += 1;
        self.listeners.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; removing twice is harmless and returns false.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.entries.len();
        self.listeners.entries.retain(|(entry, _)| *entry != id);
        before != self.listeners.entries.len()
    }

    fn notify(&mut self) {
        if self.listeners.entries.is_empty() {
            return;
        }
        let view = self.view();
        for (_, listener) in self.listeners.entries.iter_mut() {
            listener(&view);
        }
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn tree(&self) -> Option<&Study> {
        self.tree.as_ref()
    }

    pub fn selection_path(&self) -> &SelectionPath {
        &self.path
    }

    /// Current guided step; `None` in free mode.
    pub fn current_step(&self) -> Option<Level> {
        match self.mode {
            NavigationMode::Guided => Some(self.current_step),
            NavigationMode::Free => None,
        }
    }

    pub fn column_offsets(&self) -> ColumnOffsets {
        self.offsets
    }

    pub fn detail(&self) -> Option<&Candidate> {
        self.detail.as_ref()
    }

    pub fn show_detail(&self) -> bool {
        self.detail.is_some()
    }

    pub fn selected_cro(&self) -> Option<&Cro> {
        let id = self.path.get(Level::Cro)?;
        self.tree.as_ref()?.cros.iter().find(|c| c.id == id)
    }

    pub fn selected_facility(&self) -> Option<&Facility> {
        let id = self.path.get(Level::Hcf)?;
        self.selected_cro()?.facilities.iter().find(|f| f.id == id)
    }

    pub fn selected_provider(&self) -> Option<&Provider> {
        let id = self.path.get(Level::Pcp)?;
        self.selected_facility()?.providers.iter().find(|p| p.id == id)
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        let id = self.path.get(Level::Patient)?;
        self.candidates().iter().find(|c| c.id == id)
    }

    /// Candidates of the selected provider.
    pub fn candidates(&self) -> &[Candidate] {
        self.selected_provider()
            .map(|p| p.candidates.as_slice())
            .unwrap_or_default()
    }

    /// Study first, then one entry per selected level, root to leaf.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let Some(study) = self.tree.as_ref() else {
            return Vec::new();
        };
        let mut crumbs = vec![Breadcrumb::new(study.name.clone(), StepTag::Root)];
        let selected: [Option<&dyn Node>; 4] = [
            self.selected_cro().map(|n| n as &dyn Node),
            self.selected_facility().map(|n| n as &dyn Node),
            self.selected_provider().map(|n| n as &dyn Node),
            self.selected_candidate().map(|n| n as &dyn Node),
        ];
        for (level, node) in Level::ALL.into_iter().zip(selected) {
            match node {
                Some(node) => crumbs.push(Breadcrumb::new(node.name(), level.tag())),
                None => break,
            }
        }
        crumbs
    }

    /// Children shown for `level` under the current selection.
    pub fn visible_children(&self, level: Level) -> Vec<ChildSummary> {
        match level {
            Level::Cro => match self.tree.as_ref() {
                Some(tree) => self.summarize(level, &tree.cros, |_| true),
                None => Vec::new(),
            },
            Level::Hcf => match self.selected_cro() {
                Some(cro) => self.summarize(level, &cro.facilities, |f| self.is_eligible(f)),
                None => Vec::new(),
            },
            Level::Pcp => match self.selected_facility() {
                Some(facility) => self.summarize(level, &facility.providers, |_| true),
                None => Vec::new(),
            },
            Level::Patient => self.summarize(level, self.candidates(), |_| true),
        }
    }

    pub fn view(&self) -> ViewState {
        let offsets = self.offsets;
        ViewState {
            mode: self.mode,
            current_step: self.current_step(),
            selection_path: self.path.ids().to_vec(),
            breadcrumbs: self.breadcrumbs(),
            cros: self.visible_children(Level::Cro),
            facilities: self.visible_children(Level::Hcf),
            providers: self.visible_children(Level::Pcp),
            candidates: self.visible_children(Level::Patient),
            column_offsets: [
                offsets.get(Level::Hcf),
                offsets.get(Level::Pcp),
                offsets.get(Level::Patient),
            ],
            detail: self.detail.clone(),
            show_detail: self.show_detail(),
        }
    }

    fn summarize<T: Node>(
        &self,
        level: Level,
        nodes: &[T],
        clickable: impl Fn(&T) -> bool,
    ) -> Vec<ChildSummary> {
        let selected = self.path.get(level);
        nodes
            .iter()
            .map(|n| ChildSummary {
                id: n.id().to_string(),
                name: n.name().to_string(),
                selected: selected == Some(n.id()),
                clickable: clickable(n),
            })
            .collect()
    }

    fn is_eligible(&self, facility: &Facility) -> bool {
        facility.status.is(&self.eligible_status)
    }

    fn is_selectable(&self, level: Level, id: &str) -> bool {
        match level {
            Level::Cro => self
                .tree
                .as_ref()
                .is_some_and(|t| t.cros.iter().any(|c| c.id == id)),
            // eligibility only gates guided navigation; free mode styles it
            Level::Hcf => self.selected_cro().is_some_and(|c| {
                c.facilities.iter().any(|f| {
                    f.id == id && (self.mode == NavigationMode::Free || self.is_eligible(f))
                })
            }),
            Level::Pcp => self
                .selected_facility()
                .is_some_and(|f| f.providers.iter().any(|p| p.id == id)),
            Level::Patient => self.candidates().iter().any(|c| c.id == id),
        }
    }
}
