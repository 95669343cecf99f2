use chips_core::{filter_chips, Chip};
use std::sync::Arc;

fn chip(title: &str) -> Arc<Chip> {
    Arc::new(Chip::new(title).unwrap())
}

fn chip_with_subtitle(title: &str, subtitle: &str) -> Arc<Chip> {
    Arc::new(Chip::new(title).unwrap().with_subtitle(subtitle))
}

fn titles(chips: &[Arc<Chip>]) -> Vec<&str> {
    chips.iter().map(|chip| chip.title()).collect()
}

fn scenario() -> Vec<Arc<Chip>> {
    vec![
        chip("Alice Smith"),
        chip_with_subtitle("Bob Jones", "New  York"),
        chip("Carol"),
    ]
}

#[test]
fn scenario_title_match() {
    let original = scenario();
    assert_eq!(titles(&filter_chips("bo", &original)), vec!["Bob Jones"]);
}

#[test]
fn scenario_subtitle_match_despite_inner_double_space() {
    let original = scenario();
    assert_eq!(titles(&filter_chips("newyork", &original)), vec!["Bob Jones"]);
}

#[test]
fn scenario_no_match_is_empty() {
    let original = scenario();
    assert!(filter_chips("xyz", &original).is_empty());
}

#[test]
fn scenario_empty_constraint_is_identity() {
    let original = scenario();
    assert_eq!(filter_chips("", &original), original);
}

#[test]
fn whitespace_constraint_is_identity_including_grown_original() {
    let mut original = scenario();
    assert_eq!(filter_chips("   ", &original), original);

    original.push(chip("Dave"));
    let displayed = filter_chips(" \t ", &original);
    assert_eq!(displayed, original);
    assert_eq!(displayed.len(), 4);
}

#[test]
fn filtering_is_case_insensitive() {
    let original = vec![chip("Alice Smith"), chip("ALICIA"), chip("Bob")];
    assert_eq!(filter_chips("ALICE", &original), filter_chips("alice", &original));
    assert_eq!(titles(&filter_chips("ALI", &original)), vec!["Alice Smith", "ALICIA"]);
}

#[test]
fn constraint_is_trimmed_before_matching() {
    let original = scenario();
    assert_eq!(titles(&filter_chips("  CAROL\n", &original)), vec!["Carol"]);
}

#[test]
fn subtitle_whitespace_stripping_does_not_apply_to_titles() {
    let original = vec![
        chip_with_subtitle("Bob", "New York"),
        chip("New York"),
    ];

    assert_eq!(titles(&filter_chips("newyork", &original)), vec!["Bob"]);
}

#[test]
fn spaced_constraint_cannot_match_stripped_subtitle() {
    let original = vec![chip_with_subtitle("Bob", "New York")];
    assert!(filter_chips("new york", &original).is_empty());
}

#[test]
fn filtering_is_idempotent() {
    let original = vec![
        chip("Anna"),
        chip_with_subtitle("Ben", "Annapolis"),
        chip("Hannah"),
        chip("Zed"),
    ];

    for constraint in ["", "  ", "an", "ANNA", "zed", "nothing"] {
        let once = filter_chips(constraint, &original);
        let twice = filter_chips(constraint, &once);
        assert_eq!(twice, once, "constraint `{constraint}` is not idempotent");
    }
}

#[test]
fn result_is_ordered_subset_of_original() {
    let original = vec![
        chip("delta"),
        chip("alpha"),
        chip_with_subtitle("gamma", "al pha"),
        chip("beta"),
        chip("alphabet"),
    ];

    let displayed = filter_chips("alph", &original);
    assert_eq!(titles(&displayed), vec!["alpha", "gamma", "alphabet"]);

    let mut cursor = 0;
    for chip in &displayed {
        let index = original[cursor..]
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, chip))
            .expect("every displayed chip must come from original");
        cursor += index + 1;
    }
}
