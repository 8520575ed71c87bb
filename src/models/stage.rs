//! Derived stage summaries and stage-to-stage diffs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Summary of one pipeline stage. Recomputed on every snapshot fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageInfo {
    pub index: usize,
    pub name: String,
    pub item_count: usize,
    pub categorized_count: usize,
    pub project_count: usize,
    /// Seconds.
    #[serde(deserialize_with = "crate::utils::lenient::f64_or_zero")]
    pub total_duration: f64,
}

/// Signed change in record counts per label, after minus before.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diff {
    pub category_changes: BTreeMap<String, i64>,
    pub project_changes: BTreeMap<String, i64>,
}

impl Diff {
    /// Non-zero category changes, largest absolute change first.
    pub fn significant_categories(&self) -> Vec<(&str, i64)> {
        significant(&self.category_changes)
    }

    /// Non-zero project changes, largest absolute change first.
    pub fn significant_projects(&self) -> Vec<(&str, i64)> {
        significant(&self.project_changes)
    }

    pub fn is_unchanged(&self) -> bool {
        self.category_changes.values().all(|delta| *delta == 0)
            && self.project_changes.values().all(|delta| *delta == 0)
    }
}

fn significant(changes: &BTreeMap<String, i64>) -> Vec<(&str, i64)> {
    let mut entries: Vec<(&str, i64)> = changes
        .iter()
        .filter(|(_, delta)| **delta != 0)
        .map(|(label, delta)| (label.as_str(), *delta))
        .collect();
    // Stable sort keeps label order for equal magnitudes.
    entries.sort_by(|a, b| b.1.unsigned_abs().cmp(&a.1.unsigned_abs()));
    entries
}

/// Outcome of comparing two stages. `NotComparable` is a normal state, e.g.
/// before any stage has been selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Comparison {
    Comparable(Diff),
    NotComparable,
}

impl Comparison {
    pub fn diff(&self) -> Option<&Diff> {
        match self {
            Comparison::Comparable(diff) => Some(diff),
            Comparison::NotComparable => None,
        }
    }

    pub fn is_comparable(&self) -> bool {
        matches!(self, Comparison::Comparable(_))
    }
}

/// Indices of the two snapshots shown side by side for a selected stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePair {
    pub before: usize,
    pub after: usize,
}
