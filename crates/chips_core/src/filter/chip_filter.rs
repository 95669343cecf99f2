//! Substring matcher for chip titles and subtitles.
//!
//! # Responsibility
//! - Normalize raw constraint text typed by the user.
//! - Select matching chips while keeping their original relative order.
//!
//! # Invariants
//! - A blank constraint yields the complete original sequence.
//! - Filtering is idempotent: re-filtering a result with the same constraint
//!   returns the same sequence.
//! - Titles are compared lower-cased only. Subtitles are lower-cased and have
//!   every whitespace character removed before comparison.

use crate::model::chip::Chip;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Returns chips from `original` matching `constraint`, in original order.
///
/// Never fails; an empty result is a valid outcome.
pub fn filter_chips(constraint: &str, original: &[Arc<Chip>]) -> Vec<Arc<Chip>> {
    let Some(pattern) = normalize_constraint(constraint) else {
        debug!(
            "event=chip_filter module=filter status=ok mode=all original={} displayed={}",
            original.len(),
            original.len()
        );
        return original.to_vec();
    };

    let matched = original
        .iter()
        .filter(|chip| chip_matches(chip, &pattern))
        .cloned()
        .collect::<Vec<_>>();

    debug!(
        "event=chip_filter module=filter status=ok mode=match pattern_chars={} original={} displayed={}",
        pattern.chars().count(),
        original.len(),
        matched.len()
    );
    matched
}

/// Trims and lower-cases constraint text.
///
/// Returns `None` when nothing is left to match against.
pub fn normalize_constraint(constraint: &str) -> Option<String> {
    let trimmed = constraint.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Checks one chip against an already normalized pattern.
pub fn chip_matches(chip: &Chip, pattern: &str) -> bool {
    if chip.title().to_lowercase().contains(pattern) {
        return true;
    }
    // Subtitles like "New  York" must match "newyork"; titles are left as-is.
    chip.subtitle()
        .is_some_and(|subtitle| strip_whitespace(&subtitle.to_lowercase()).contains(pattern))
}

/// Removes every whitespace character, not only leading/trailing runs.
pub fn strip_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value, "").into_owned()
}
