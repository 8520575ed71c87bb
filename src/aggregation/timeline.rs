use std::collections::{BTreeMap, HashMap};

use chrono::{Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::labels::{OTHER_CATEGORY, UNCATEGORIZED_PROJECT};
use crate::models::ActivityRecord;
use crate::log_debug;

use super::tally::Tally;

const ENABLE_LOGS: bool = false;

/// A labelled total, as consumed by pie and bar charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

impl From<(String, f64)> for NamedValue {
    fn from((name, value): (String, f64)) -> Self {
        Self { name, value }
    }
}

/// Durations that started within one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourBucket {
    /// 0–23 in the aggregation time zone.
    pub hour: u32,
    pub total: f64,
    pub categories: Vec<NamedValue>,
}

/// Project × category cross-tabulation of summed durations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMatrix {
    pub projects: Vec<String>,
    pub categories: Vec<String>,
    /// `values[p][c]` for `projects[p]` and `categories[c]`.
    pub values: Vec<Vec<f64>>,
}

impl CategoryMatrix {
    /// Cell for a pair on both axes; `None` when either label is not an axis
    /// value or a deserialized matrix has no value stored for it.
    pub fn cell(&self, project: &str, category: &str) -> Option<f64> {
        let p = self.projects.iter().position(|name| name == project)?;
        let c = self.categories.iter().position(|name| name == category)?;
        self.values.get(p)?.get(c).copied()
    }

    /// Like [`CategoryMatrix::cell`] but reads 0 for anything not recorded.
    pub fn value(&self, project: &str, category: &str) -> f64 {
        self.cell(project, category).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.categories.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineAggregate {
    pub by_hour: Vec<HourBucket>,
    pub by_category: Vec<NamedValue>,
    pub by_project: Vec<NamedValue>,
    pub matrix: CategoryMatrix,
}

impl TimelineAggregate {
    pub fn total_duration(&self) -> f64 {
        self.by_category.iter().map(|entry| entry.value).sum()
    }
}

/// Aggregate records using the local time zone for hour buckets.
pub fn aggregate(records: &[ActivityRecord], config: &EngineConfig) -> TimelineAggregate {
    aggregate_in(records, config, &Local)
}

/// Aggregate records, bucketing hours in `tz`.
///
/// Records with a malformed timestamp still count toward the category and
/// project totals; only the hourly view needs a start time.
pub fn aggregate_in<Tz: TimeZone>(
    records: &[ActivityRecord],
    config: &EngineConfig,
    tz: &Tz,
) -> TimelineAggregate {
    let is_other_category = |label: &str| label == OTHER_CATEGORY || config.is_uncategorized(Some(label));
    let is_other_project =
        |label: &str| label == UNCATEGORIZED_PROJECT || config.is_uncategorized(Some(label));

    let mut hours: BTreeMap<u32, Tally> = BTreeMap::new();
    let mut categories = Tally::default();
    let mut projects = Tally::default();
    let mut cells: HashMap<(&str, &str), f64> = HashMap::new();
    let mut skipped = 0usize;

    for record in records {
        let duration = record.duration_secs();
        let category = config.category_bucket(record.category_label());
        let project = config.project_bucket(record.project_label());

        categories.add(category, duration);
        projects.add(project, duration);
        *cells.entry((project, category)).or_insert(0.0) += duration;

        match record.start() {
            Some(start) => {
                let hour = start.with_timezone(tz).hour();
                hours.entry(hour).or_default().add(category, duration);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log_debug!("{skipped} records without a usable timestamp left out of hourly buckets");
    }

    let by_hour = hours
        .into_iter()
        .map(|(hour, tally)| {
            let categories: Vec<NamedValue> = tally
                .ranked(is_other_category)
                .into_iter()
                .map(NamedValue::from)
                .collect();
            HourBucket {
                hour,
                total: categories.iter().map(|entry| entry.value).sum(),
                categories,
            }
        })
        .collect();

    let matrix = build_matrix(
        &cells,
        projects.clone().axis(is_other_project),
        categories.clone().axis(is_other_category),
    );

    TimelineAggregate {
        by_hour,
        by_category: categories
            .ranked(is_other_category)
            .into_iter()
            .map(NamedValue::from)
            .collect(),
        by_project: projects
            .ranked(is_other_project)
            .into_iter()
            .map(NamedValue::from)
            .collect(),
        matrix,
    }
}

fn build_matrix(
    cells: &HashMap<(&str, &str), f64>,
    projects: Vec<(String, f64)>,
    categories: Vec<(String, f64)>,
) -> CategoryMatrix {
    let projects: Vec<String> = projects.into_iter().map(|(name, _)| name).collect();
    let categories: Vec<String> = categories.into_iter().map(|(name, _)| name).collect();

    let values = projects
        .iter()
        .map(|project| {
            categories
                .iter()
                .map(|category| {
                    cells
                        .get(&(project.as_str(), category.as_str()))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    CategoryMatrix {
        projects,
        categories,
        values,
    }
}
