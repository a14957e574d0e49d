//! Tests for free (column) navigation
//!
//! Free mode shows every column at once, lists non-eligible facilities
//! without the clickable hint, and tracks vertical offsets per column.

use rstest::{fixture, rstest};

use trialnav::domain::{
    HierarchySelectionController, Level, NavStep, NavigationMode, Selection, StepTag,
};
use trialnav::util::testing::{init_test_setup, sample_study, single_cro_study};

#[fixture]
fn controller() -> HierarchySelectionController {
    init_test_setup();
    let mut controller = HierarchySelectionController::new(NavigationMode::Free);
    controller.load_study(&sample_study());
    controller
}

fn click_through(controller: &mut HierarchySelectionController) {
    assert!(controller.select_at(Level::Cro, "cro-1", 40).is_selected());
    assert!(controller.select_at(Level::Hcf, "hf-1", 80).is_selected());
    assert!(controller.select_at(Level::Pcp, "pcp-1", 120).is_selected());
}

fn offsets(controller: &HierarchySelectionController) -> [u32; 3] {
    controller.view().column_offsets
}

#[rstest]
fn given_free_mode_when_loading_then_no_step_is_tracked(controller: HierarchySelectionController) {
    assert_eq!(controller.current_step(), None);
    assert_eq!(controller.view().current_step, None);
    assert_eq!(offsets(&controller), [0, 0, 0]);
}

#[rstest]
fn given_pending_facility_when_listing_then_visible_but_not_clickable(
    mut controller: HierarchySelectionController,
) {
    controller.select(Level::Cro, "cro-1");

    let harbor = controller
        .visible_children(Level::Hcf)
        .into_iter()
        .find(|c| c.id == "hf-3")
        .expect("pending facility is listed");

    assert!(!harbor.clickable);
    assert_eq!(controller.visible_children(Level::Hcf).len(), 3);
}

#[rstest]
fn given_pending_facility_when_clicking_then_selects_it(
    mut controller: HierarchySelectionController,
) {
    controller.select(Level::Cro, "cro-1");

    let outcome = controller.select(Level::Hcf, "hf-3");

    assert_eq!(outcome, Selection::Selected);
    let providers: Vec<String> = controller
        .visible_children(Level::Pcp)
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(providers, vec!["pcp-4"]);
}

#[rstest]
fn given_pending_facility_when_drilling_then_candidate_detail_opens(
    mut controller: HierarchySelectionController,
) {
    controller.select(Level::Cro, "cro-1");
    controller.select(Level::Hcf, "hf-3");
    controller.select(Level::Pcp, "pcp-4");

    let opened = controller.select_candidate(0).map(|c| c.id.clone());

    assert_eq!(opened.as_deref(), Some("pt-4"));
}

#[rstest]
fn given_clicks_when_drilling_then_records_offset_per_column(
    mut controller: HierarchySelectionController,
) {
    click_through(&mut controller);

    assert_eq!(offsets(&controller), [40, 80, 120]);
    let view = controller.view();
    assert_eq!(view.facilities.len(), 3);
    assert_eq!(view.providers.len(), 2);
    assert_eq!(view.candidates.len(), 2);
}

#[rstest]
fn given_offsets_when_reclicking_cro_then_resets_deeper_columns(
    mut controller: HierarchySelectionController,
) {
    // Arrange
    click_through(&mut controller);

    // Act
    controller.select_at(Level::Cro, "cro-2", 10);

    // Assert
    assert_eq!(offsets(&controller), [10, 0, 0]);
    assert_eq!(controller.selection_path().ids(), &["cro-2".to_string()]);
}

#[rstest]
fn given_offsets_when_selecting_cro_without_offset_then_resets_deeper_columns(
    mut controller: HierarchySelectionController,
) {
    // Arrange
    click_through(&mut controller);

    // Act
    let outcome = controller.select(Level::Cro, "cro-2");

    // Assert
    assert_eq!(outcome, Selection::Selected);
    assert_eq!(controller.selection_path().ids(), &["cro-2".to_string()]);
    assert_eq!(offsets(&controller), [40, 0, 0]);
}

#[rstest]
fn given_offsets_when_selecting_facility_without_offset_then_keeps_its_own_column(
    mut controller: HierarchySelectionController,
) {
    click_through(&mut controller);

    controller.select(Level::Hcf, "hf-2");

    assert_eq!(offsets(&controller), [40, 80, 0]);
}

#[rstest]
#[case::plain(None)]
#[case::with_offset(Some(200))]
fn given_offsets_when_facility_misses_then_resets_columns_below_cro(
    mut controller: HierarchySelectionController,
    #[case] offset: Option<u32>,
) {
    // Arrange
    click_through(&mut controller);

    // Act
    let outcome = match offset {
        Some(offset) => controller.select_at(Level::Hcf, "unknown", offset),
        None => controller.select(Level::Hcf, "unknown"),
    };

    // Assert
    assert_eq!(outcome, Selection::Missed);
    assert_eq!(controller.selection_path().ids(), &["cro-1".to_string()]);
    assert_eq!(offsets(&controller), [40, 0, 0]);
}

#[test]
fn given_offset_script_when_reselecting_cro_then_view_drops_stale_offsets() {
    init_test_setup();
    let mut controller = HierarchySelectionController::new(NavigationMode::Free);
    controller.load_study(&sample_study());

    for step in ["cro:cro-1@40", "hcf:hf-1@80", "cro:cro-2"] {
        step.parse::<NavStep>().unwrap().apply(&mut controller);
    }

    assert_eq!(controller.view().column_offsets, [40, 0, 0]);
}

#[rstest]
#[case(StepTag::Hcf, [40, 80, 0])]
#[case(StepTag::Cro, [40, 0, 0])]
#[case(StepTag::Root, [0, 0, 0])]
fn given_offsets_when_navigating_to_breadcrumb_then_keeps_visible_columns(
    mut controller: HierarchySelectionController,
    #[case] tag: StepTag,
    #[case] expected: [u32; 3],
) {
    click_through(&mut controller);

    assert!(controller.navigate_to_breadcrumb(tag));

    assert_eq!(offsets(&controller), expected);
    assert_eq!(controller.current_step(), None);
}

#[test]
fn given_guided_mode_when_clicking_with_offset_then_offsets_stay_zero() {
    init_test_setup();
    let mut controller = HierarchySelectionController::new(NavigationMode::Guided);
    controller.load_study(&sample_study());

    controller.select_at(Level::Cro, "cro-1", 40);

    assert_eq!(controller.view().column_offsets, [0, 0, 0]);
    assert_eq!(controller.current_step(), Some(Level::Hcf));
}

#[test]
fn given_single_cro_when_loading_free_then_auto_selects_it() {
    init_test_setup();
    let mut controller = HierarchySelectionController::new(NavigationMode::Free);

    controller.load_study(&single_cro_study());

    assert_eq!(controller.selection_path().len(), 1);
    assert_eq!(controller.visible_children(Level::Hcf).len(), 3);
}

#[rstest]
fn given_candidate_column_when_opening_detail_then_view_carries_it(
    mut controller: HierarchySelectionController,
) {
    click_through(&mut controller);

    controller.select_candidate(0);

    let view = controller.view();
    assert!(view.show_detail);
    assert_eq!(view.detail.map(|c| c.id), Some("pt-1".to_string()));
}
