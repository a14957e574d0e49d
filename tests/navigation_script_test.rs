//! Tests for scripted navigation as used by `trialnav navigate`

use rstest::rstest;

use trialnav::domain::{
    CandidateDetail, HierarchySelectionController, NavStep, NavigationMode, ViewState,
};
use trialnav::util::testing::{init_test_setup, sample_study};

fn run(mode: NavigationMode, script: &[&str]) -> (Vec<bool>, ViewState) {
    init_test_setup();
    let mut controller = HierarchySelectionController::new(mode);
    controller.load_study(&sample_study());
    let applied = script
        .iter()
        .map(|s| s.parse::<NavStep>().expect("valid step"))
        .map(|step| step.apply(&mut controller))
        .collect();
    (applied, controller.view())
}

#[rstest]
#[case::drill(
    &["cro:cro-1", "hcf:hf-1", "pcp:pcp-2"],
    &["cro-1", "hf-1", "pcp-2"]
)]
#[case::back_to_cro(
    &["cro:cro-1", "hcf:hf-1", "pcp:pcp-2", "crumb:CRO"],
    &["cro-1"]
)]
#[case::back_to_root(&["cro:cro-2", "hcf:hf-4", "crumb:ROOT"], &[])]
#[case::switch_facility(&["cro:cro-1", "hcf:hf-1", "pcp:pcp-1", "hcf:hf-2"], &["cro-1", "hf-2"])]
fn given_script_when_applied_then_path_matches(#[case] script: &[&str], #[case] path: &[&str]) {
    let (applied, view) = run(NavigationMode::Guided, script);

    assert!(applied.iter().all(|ok| *ok), "{applied:?}");
    assert_eq!(view.selection_path, path);
}

#[test]
fn given_script_with_miss_when_applied_then_reports_which_step_failed() {
    let (applied, view) = run(
        NavigationMode::Guided,
        &["cro:cro-1", "hcf:hf-3", "pcp:pcp-4"],
    );

    assert_eq!(applied, vec![true, false, false]);
    assert_eq!(view.selection_path, vec!["cro-1"]);
}

#[test]
fn given_open_step_when_applied_then_detail_rows_render_candidate() {
    let (_, view) = run(
        NavigationMode::Guided,
        &["cro:cro-1", "hcf:hf-1", "pcp:pcp-1", "open:1"],
    );

    let candidate = view.detail.expect("detail open");
    let detail = CandidateDetail::from(&candidate);
    assert_eq!(detail.header_title(), "John");
    assert!(detail.rows().iter().any(|r| r.value == "John"));
}

#[test]
fn given_free_script_with_offsets_when_applied_then_view_carries_offsets() {
    let (_, view) = run(
        NavigationMode::Free,
        &["cro:cro-1@12", "hcf:hf-2@48", "close"],
    );

    assert_eq!(view.column_offsets, [12, 48, 0]);
    assert!(!view.show_detail);
}

#[test]
fn given_view_when_serializing_then_uses_uppercase_levels() {
    let (_, view) = run(NavigationMode::Guided, &["cro:cro-1"]);

    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["current_step"], "HCF");
    assert_eq!(json["breadcrumbs"][1]["step_tag"], "CRO");
    assert_eq!(json["mode"], "guided");
}
