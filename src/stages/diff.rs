//! Stage-to-stage diffs.
//!
//! Counts are numbers of records per label, not durations. A record without a
//! category is counted under [`DEFAULT_CATEGORY`] and one without a project
//! under [`DEFAULT_PROJECT`], matching how the pipeline reports them.

use std::collections::BTreeMap;

use crate::labels::{DEFAULT_CATEGORY, DEFAULT_PROJECT};
use crate::models::{Comparison, Diff, Snapshot, StagePair};

pub type LabelCounts = BTreeMap<String, usize>;

pub fn category_counts(snapshot: &Snapshot) -> LabelCounts {
    count_by(snapshot, |record| record.category_label().unwrap_or(DEFAULT_CATEGORY))
}

pub fn project_counts(snapshot: &Snapshot) -> LabelCounts {
    count_by(snapshot, |record| record.project_label().unwrap_or(DEFAULT_PROJECT))
}

fn count_by<F>(snapshot: &Snapshot, label_of: F) -> LabelCounts
where
    F: Fn(&crate::models::ActivityRecord) -> &str,
{
    let mut counts = LabelCounts::new();
    for record in snapshot.records() {
        *counts.entry(label_of(record).to_string()).or_insert(0) += 1;
    }
    counts
}

/// `after - before` for every label seen on either side. Labels missing on
/// one side count as zero there; zero deltas are kept.
pub fn diff_counts(before: &LabelCounts, after: &LabelCounts) -> BTreeMap<String, i64> {
    before
        .keys()
        .chain(after.keys())
        .map(|label| {
            let delta = count_of(after, label) - count_of(before, label);
            (label.clone(), delta)
        })
        .collect()
}

fn count_of(counts: &LabelCounts, label: &str) -> i64 {
    counts.get(label).map_or(0, |count| *count as i64)
}

pub fn diff(before: &Snapshot, after: &Snapshot) -> Diff {
    Diff {
        category_changes: diff_counts(&category_counts(before), &category_counts(after)),
        project_changes: diff_counts(&project_counts(before), &project_counts(after)),
    }
}

/// Diff two optional stages; either side missing means there is nothing to
/// compare yet.
pub fn compare(before: Option<&Snapshot>, after: Option<&Snapshot>) -> Comparison {
    match (before, after) {
        (Some(before), Some(after)) => Comparison::Comparable(diff(before, after)),
        _ => Comparison::NotComparable,
    }
}

/// Clamp a requested stage into range and pair it with its predecessor.
/// Stage 0 pairs with itself. `None` when there are no stages.
pub fn select_stage_pair(stage_count: usize, requested: usize) -> Option<StagePair> {
    let after = requested.min(stage_count.checked_sub(1)?);
    Some(StagePair {
        before: after.saturating_sub(1),
        after,
    })
}

/// Compare the stage at `requested` (clamped) with the one before it.
pub fn compare_selected(snapshots: &[Snapshot], requested: usize) -> Comparison {
    match select_stage_pair(snapshots.len(), requested) {
        Some(pair) => compare(snapshots.get(pair.before), snapshots.get(pair.after)),
        None => Comparison::NotComparable,
    }
}
