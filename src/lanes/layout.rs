use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::aggregation::tally::Tally;
use crate::colors::LaneTone;
use crate::config::EngineConfig;
use crate::labels::OTHER_CATEGORY;
use crate::models::{ActivityRecord, Snapshot};

/// Lane name of the spacer between raw attributes and derived ones.
pub const SEPARATOR_LANE: &str = "---";

/// Values the pipeline writes when it has nothing better; never drawn.
pub const PLACEHOLDER_VALUES: [&str; 3] = ["None", "Unknown", "No Title"];

/// One lane of the attribute layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeLane {
    App,
    Title,
    Url,
    File,
    Language,
    Separator,
    Project,
    Category,
    Client,
}

impl AttributeLane {
    pub const ALL: [AttributeLane; 9] = [
        AttributeLane::App,
        AttributeLane::Title,
        AttributeLane::Url,
        AttributeLane::File,
        AttributeLane::Language,
        AttributeLane::Separator,
        AttributeLane::Project,
        AttributeLane::Category,
        AttributeLane::Client,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AttributeLane::App => "App",
            AttributeLane::Title => "Title",
            AttributeLane::Url => "URL",
            AttributeLane::File => "File",
            AttributeLane::Language => "Language",
            AttributeLane::Separator => SEPARATOR_LANE,
            AttributeLane::Project => "Project",
            AttributeLane::Category => "Category",
            AttributeLane::Client => "Client",
        }
    }

    /// HSL tone for hash-colored lanes. The category lane uses category
    /// colors and the separator is never drawn, so both have none.
    pub fn tone(self) -> Option<LaneTone> {
        match self {
            AttributeLane::App => Some(LaneTone::new(0, 65, 55)),
            AttributeLane::Title => Some(LaneTone::new(40, 45, 65)),
            AttributeLane::Url => Some(LaneTone::new(200, 70, 45)),
            AttributeLane::File => Some(LaneTone::new(120, 55, 50)),
            AttributeLane::Language => Some(LaneTone::new(280, 75, 55)),
            AttributeLane::Project => Some(LaneTone::new(160, 60, 45)),
            AttributeLane::Client => Some(LaneTone::new(320, 50, 40)),
            AttributeLane::Category | AttributeLane::Separator => None,
        }
    }

    /// The record's raw value for this lane, if it has a drawable one.
    pub fn value(self, record: &ActivityRecord) -> Option<&str> {
        let raw = match self {
            AttributeLane::App => Some(record.app.as_str()),
            AttributeLane::Title => Some(record.title.as_str()),
            AttributeLane::Url => record.url.as_deref(),
            AttributeLane::File => record.file.as_deref(),
            AttributeLane::Language => record.language.as_deref(),
            AttributeLane::Separator => None,
            AttributeLane::Project => record.project.as_deref(),
            AttributeLane::Category => record.category.as_deref(),
            AttributeLane::Client => record.metadata.client.as_deref(),
        };
        raw.filter(|value| !is_placeholder(value))
    }
}

pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || PLACEHOLDER_VALUES.contains(&value)
}

/// Lane arrangement for one snapshot, chosen once before any rectangle is
/// placed.
#[derive(Debug, Clone, PartialEq)]
pub enum LaneLayout {
    /// One lane per raw source, AFK first, the rest alphabetical.
    Source(Vec<String>),
    /// The fixed attribute lanes.
    Attribute(&'static [AttributeLane]),
    /// One lane per category, largest total first and "Other" last.
    Category(Vec<String>),
}

impl LaneLayout {
    /// Source layout for raw captures, attribute layout for everything else.
    pub fn for_stage(snapshot: &Snapshot, is_source_stage: bool) -> Self {
        if is_source_stage {
            Self::source(snapshot)
        } else {
            Self::attribute()
        }
    }

    pub fn source(snapshot: &Snapshot) -> Self {
        let distinct: BTreeSet<&str> = snapshot.records().iter().map(source_lane_key).collect();

        let mut lanes: Vec<String> = distinct.into_iter().map(str::to_string).collect();
        // Only the first AFK-like lane is pinned; any others stay alphabetical.
        if let Some(position) = lanes.iter().position(|lane| is_afk_like(lane)) {
            let afk = lanes.remove(position);
            lanes.insert(0, afk);
        }
        Self::Source(lanes)
    }

    pub fn attribute() -> Self {
        Self::Attribute(&AttributeLane::ALL)
    }

    pub fn category(snapshot: &Snapshot, config: &EngineConfig) -> Self {
        let mut totals = Tally::default();
        for record in snapshot.records() {
            totals.add(config.category_bucket(record.category_label()), record.duration_secs());
        }
        let lanes = totals
            .axis(|label| label == OTHER_CATEGORY || config.is_uncategorized(Some(label)))
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        Self::Category(lanes)
    }

    pub fn lane_names(&self) -> Vec<String> {
        match self {
            LaneLayout::Source(lanes) | LaneLayout::Category(lanes) => lanes.clone(),
            LaneLayout::Attribute(lanes) => lanes.iter().map(|lane| lane.label().to_string()).collect(),
        }
    }
}

/// Lane a raw record belongs to in the source layout: its raw-source
/// category (`Source: Window`), else its source, else "Other".
pub fn source_lane_key(record: &ActivityRecord) -> &str {
    record
        .category_label()
        .or_else(|| record.source_label())
        .unwrap_or(OTHER_CATEGORY)
}

pub fn is_afk_like(label: &str) -> bool {
    label.to_ascii_lowercase().contains("afk")
}
