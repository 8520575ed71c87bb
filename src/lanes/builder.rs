//! Places records of one snapshot onto timeline lanes as colored rectangles.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::colors::{ColorAssigner, LaneTone};
use crate::config::{ClientDirectory, EngineConfig};
use crate::log_debug;
use crate::models::{ActivityRecord, Snapshot};

use super::layout::{is_afk_like, source_lane_key, AttributeLane, LaneLayout};

const ENABLE_LOGS: bool = false;

/// AFK status colors in source timelines.
pub const AFK_COLOR: &str = "#d1d5db";
pub const NOT_AFK_COLOR: &str = "#22c55e";

const SOURCE_CATEGORY_TONE: LaneTone = LaneTone::new(20, 70, 50);
const SOURCE_ACTIVITY_TONE: LaneTone = LaneTone::new(0, 55, 60);

const WINDOW_LIKE_SOURCES: [&str; 2] = ["window", "web"];
const SOURCE_CATEGORY_PREFIX: &str = "Source:";

/// One record (or one attribute of a record) on one lane.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect<'a> {
    pub lane_index: usize,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: f64,
    pub color: String,
    #[serde(rename = "originalRecord")]
    pub record: &'a ActivityRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneChart<'a> {
    pub lanes: Vec<String>,
    pub rects: Vec<Rect<'a>>,
}

impl<'a> LaneChart<'a> {
    pub fn rects_in_lane(&self, lane_index: usize) -> impl Iterator<Item = &Rect<'a>> {
        self.rects.iter().filter(move |rect| rect.lane_index == lane_index)
    }
}

/// Lays records out on lanes using one engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct LaneBuilder<'c> {
    colors: ColorAssigner<'c>,
    clients: Option<&'c ClientDirectory>,
}

impl<'c> LaneBuilder<'c> {
    pub fn new(config: &'c EngineConfig) -> Self {
        Self {
            colors: ColorAssigner::new(config),
            clients: None,
        }
    }

    /// Show client display names instead of identifiers on the client lane.
    pub fn with_clients(mut self, clients: &'c ClientDirectory) -> Self {
        self.clients = Some(clients);
        self
    }

    /// Records whose timestamp cannot be parsed are skipped.
    pub fn build<'a>(&self, snapshot: &'a Snapshot, layout: &LaneLayout) -> LaneChart<'a> {
        let mut rects = Vec::new();
        let mut skipped = 0usize;

        match layout {
            LaneLayout::Source(lanes) => {
                let index = lane_index(lanes);
                for record in snapshot.records() {
                    let Some(&lane) = index.get(source_lane_key(record)) else {
                        continue;
                    };
                    match make_rect(record, lane, || self.source_color(record)) {
                        Some(rect) => rects.push(rect),
                        None => skipped += 1,
                    }
                }
            }
            LaneLayout::Attribute(lanes) => {
                for record in snapshot.records() {
                    if record.interval().is_none() {
                        skipped += 1;
                        continue;
                    }
                    for (lane, attribute) in lanes.iter().enumerate() {
                        let Some(value) = attribute.value(record) else {
                            continue;
                        };
                        rects.extend(make_rect(record, lane, || self.attribute_color(*attribute, value)));
                    }
                }
            }
            LaneLayout::Category(lanes) => {
                let index = lane_index(lanes);
                let config = self.colors.config();
                for record in snapshot.records() {
                    let bucket = config.category_bucket(record.category_label());
                    let Some(&lane) = index.get(bucket) else {
                        continue;
                    };
                    let color = || self.colors.category_color(record.category_label()).to_string();
                    match make_rect(record, lane, color) {
                        Some(rect) => rects.push(rect),
                        None => skipped += 1,
                    }
                }
            }
        }

        if skipped > 0 {
            log_debug!("{skipped} records in {:?} have no usable timestamp", snapshot.name);
        }

        LaneChart {
            lanes: layout.lane_names(),
            rects,
        }
    }

    /// Color priority for raw captures: AFK state, then a concrete category,
    /// then the activity itself.
    fn source_color(&self, record: &ActivityRecord) -> String {
        if is_afk_record(record) {
            match record.status.as_deref().map(str::trim) {
                Some(status) if status.eq_ignore_ascii_case("afk") => return AFK_COLOR.to_string(),
                Some(status) if status.eq_ignore_ascii_case("not-afk") => return NOT_AFK_COLOR.to_string(),
                _ => {}
            }
        }

        let config = self.colors.config();
        if let Some(category) = record
            .category_label()
            .filter(|category| !category.starts_with(SOURCE_CATEGORY_PREFIX))
            .filter(|category| !config.is_uncategorized(Some(*category)))
        {
            return match self.colors.known_category_color(category) {
                Some(color) => color.to_string(),
                None => self.colors.tone_color(category, SOURCE_CATEGORY_TONE),
            };
        }

        self.colors
            .tone_color(activity_key(record, config), SOURCE_ACTIVITY_TONE)
    }

    fn attribute_color(&self, lane: AttributeLane, value: &str) -> String {
        match (lane, lane.tone()) {
            (AttributeLane::Category, _) | (_, None) => self.colors.category_color(Some(value)).to_string(),
            (AttributeLane::Client, Some(tone)) => {
                let name = self.clients.map_or(value, |clients| clients.display_name(value));
                self.colors.tone_color(name, tone)
            }
            (_, Some(tone)) => self.colors.tone_color(value, tone),
        }
    }
}

/// Source layout for raw capture stages, attribute layout otherwise.
pub fn build_lanes<'a>(snapshot: &'a Snapshot, is_source_stage: bool, config: &EngineConfig) -> LaneChart<'a> {
    let layout = LaneLayout::for_stage(snapshot, is_source_stage);
    LaneBuilder::new(config).build(snapshot, &layout)
}

fn lane_index(lanes: &[String]) -> HashMap<&str, usize> {
    lanes
        .iter()
        .enumerate()
        .map(|(index, lane)| (lane.as_str(), index))
        .collect()
}

fn make_rect<'a, F>(record: &'a ActivityRecord, lane_index: usize, color: F) -> Option<Rect<'a>>
where
    F: FnOnce() -> String,
{
    let (start_time, end_time) = record.interval()?;
    Some(Rect {
        lane_index,
        start_time,
        end_time,
        duration_seconds: record.duration_secs(),
        color: color(),
        record,
    })
}

/// Source name of a raw record: the `source` field, or the name carried in a
/// `Source: X` category.
fn raw_source(record: &ActivityRecord) -> Option<&str> {
    record.source_label().or_else(|| {
        record
            .category_label()
            .and_then(|category| category.strip_prefix(SOURCE_CATEGORY_PREFIX))
            .map(str::trim)
    })
}

fn is_afk_record(record: &ActivityRecord) -> bool {
    raw_source(record).is_some_and(is_afk_like)
}

fn is_window_like(record: &ActivityRecord) -> bool {
    record.url.as_deref().is_some_and(|url| !url.is_empty())
        || raw_source(record).is_some_and(|source| {
            WINDOW_LIKE_SOURCES
                .iter()
                .any(|known| known.eq_ignore_ascii_case(source))
        })
}

/// What an uncategorized raw record is colored by. Window and browser
/// records group by project or site so related activity clusters visually.
fn activity_key<'r>(record: &'r ActivityRecord, config: &EngineConfig) -> &'r str {
    if is_window_like(record) {
        let project = record
            .project_label()
            .filter(|project| !config.is_uncategorized(Some(*project)));
        let host = record.url.as_deref().and_then(url_host);
        if let Some(key) = project.or(host) {
            return key;
        }
    }
    record.app.as_str()
}

fn url_host(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = host.split(':').next()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    (!host.is_empty()).then_some(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::NEUTRAL_COLOR;

    fn record(ts: &str, app: &str) -> ActivityRecord {
        ActivityRecord::new(ts, 60.0, app, "title")
    }

    #[test]
    fn extracts_url_hosts() {
        assert_eq!(url_host("https://www.github.com/org/repo?x=1"), Some("github.com"));
        assert_eq!(url_host("http://user@localhost:8080/path"), Some("localhost"));
        assert_eq!(url_host("docs.rs/chrono"), Some("docs.rs"));
        assert_eq!(url_host("https://"), None);
    }

    #[test]
    fn source_mode_colors_afk_states() {
        let config = EngineConfig::default();
        let snapshot = Snapshot::new(
            "Raw Data Sources",
            vec![
                record("2024-02-02T09:00:00Z", "afk").with_category("Source: AFK").with_status("afk"),
                record("2024-02-02T09:01:00Z", "afk").with_category("Source: AFK").with_status("not-afk"),
            ],
        );

        let chart = build_lanes(&snapshot, true, &config);
        assert_eq!(chart.lanes, ["Source: AFK"]);
        assert_eq!(chart.rects[0].color, AFK_COLOR);
        assert_eq!(chart.rects[1].color, NOT_AFK_COLOR);
    }

    #[test]
    fn source_mode_prefers_concrete_categories() {
        let mut config = EngineConfig::default();
        config.set_category_colors([("Deep Work".to_string(), "#123456".to_string())]);
        let colors = ColorAssigner::new(&config);

        let snapshot = Snapshot::new(
            "Raw Data Sources",
            vec![
                record("2024-02-02T09:00:00Z", "Code").with_category("Deep Work").with_source("Window"),
                record("2024-02-02T09:01:00Z", "Code").with_category("Coding").with_source("Window"),
                record("2024-02-02T09:02:00Z", "Code").with_category("Pottery").with_source("Window"),
            ],
        );

        let chart = build_lanes(&snapshot, true, &config);
        assert_eq!(chart.rects[0].color, "#123456");
        assert_eq!(chart.rects[1].color, colors.category_color(Some("Coding")));
        assert_eq!(chart.rects[2].color, colors.tone_color("Pottery", SOURCE_CATEGORY_TONE));
    }

    #[test]
    fn source_mode_clusters_window_records_by_project_or_site() {
        let config = EngineConfig::default();
        let colors = ColorAssigner::new(&config);
        let snapshot = Snapshot::new(
            "Raw Data Sources",
            vec![
                record("2024-02-02T09:00:00Z", "Chrome")
                    .with_category("Source: Web")
                    .with_url("https://github.com/a"),
                record("2024-02-02T09:01:00Z", "Firefox")
                    .with_category("Source: Web")
                    .with_url("https://github.com/b"),
                record("2024-02-02T09:02:00Z", "Code")
                    .with_category("Source: Window")
                    .with_project("Reporter"),
                record("2024-02-02T09:03:00Z", "Code").with_category("Source: VSCode"),
            ],
        );

        let chart = build_lanes(&snapshot, true, &config);
        assert_eq!(chart.rects[0].color, chart.rects[1].color);
        assert_eq!(chart.rects[0].color, colors.tone_color("github.com", SOURCE_ACTIVITY_TONE));
        assert_eq!(chart.rects[2].color, colors.tone_color("Reporter", SOURCE_ACTIVITY_TONE));
        assert_eq!(chart.rects[3].color, colors.tone_color("Code", SOURCE_ACTIVITY_TONE));
    }

    #[test]
    fn attribute_mode_emits_one_rect_per_present_attribute() {
        let config = EngineConfig::default();
        let clients = ClientDirectory::from_entries([("c1".to_string(), "Acme".to_string())]);
        let mut full = record("2024-02-02T09:00:00Z", "Code")
            .with_category("Coding")
            .with_project("Reporter")
            .with_client("c1");
        full.file = Some("src/main.rs".to_string());
        full.language = Some("rust".to_string());
        let mut sparse = record("2024-02-02T09:05:00Z", "Unknown");
        sparse.title = "No Title".to_string();
        let snapshot = Snapshot::new("After Rules", vec![full, sparse]);

        let chart = LaneBuilder::new(&config)
            .with_clients(&clients)
            .build(&snapshot, &LaneLayout::attribute());

        let lanes: Vec<usize> = chart.rects.iter().map(|rect| rect.lane_index).collect();
        // App, Title, File, Language, Project, Category, Client for the first
        // record; nothing for the placeholder-only second record.
        assert_eq!(lanes, [0, 1, 3, 4, 6, 7, 8]);
        assert_eq!(chart.rects_in_lane(5).count(), 0);

        let colors = ColorAssigner::new(&config);
        let category_rect = chart.rects_in_lane(7).next().expect("category rect");
        assert_eq!(category_rect.color, colors.category_color(Some("Coding")));
        let client_rect = chart.rects_in_lane(8).next().expect("client rect");
        assert_eq!(
            client_rect.color,
            colors.tone_color("Acme", AttributeLane::Client.tone().expect("client tone"))
        );
    }

    #[test]
    fn same_value_differs_between_attribute_lanes() {
        let config = EngineConfig::default();
        let mut record = record("2024-02-02T09:00:00Z", "Reporter").with_project("Reporter");
        record.title = "Reporter".to_string();
        let snapshot = Snapshot::new("After Rules", vec![record]);

        let chart = build_lanes(&snapshot, false, &config);
        let app = &chart.rects_in_lane(0).next().expect("app").color;
        let project = &chart.rects_in_lane(6).next().expect("project").color;
        assert_ne!(app, project);
    }

    #[test]
    fn category_mode_places_records_on_their_bucket() {
        let config = EngineConfig::default();
        let snapshot = Snapshot::new(
            "After Rules",
            vec![
                record("2024-02-02T09:00:00Z", "Code").with_category("Coding"),
                record("2024-02-02T09:01:00Z", "Code").with_category("unknown"),
            ],
        );

        let layout = LaneLayout::category(&snapshot, &config);
        let chart = LaneBuilder::new(&config).build(&snapshot, &layout);
        assert_eq!(chart.lanes, ["Coding", "Other"]);
        assert_eq!(chart.rects[1].lane_index, 1);
        assert_eq!(chart.rects[1].color, NEUTRAL_COLOR);
    }

    #[test]
    fn malformed_timestamps_are_skipped_silently() {
        let config = EngineConfig::default();
        let snapshot = Snapshot::new(
            "Raw Data Sources",
            vec![
                record("not-a-time", "Code").with_category("Source: Window"),
                record("2024-02-02T09:00:00Z", "Code").with_category("Source: Window"),
            ],
        );

        let source = build_lanes(&snapshot, true, &config);
        assert_eq!(source.rects.len(), 1);
        assert_eq!(source.rects[0].record.timestamp, "2024-02-02T09:00:00Z");

        let attribute = build_lanes(&snapshot, false, &config);
        assert!(attribute
            .rects
            .iter()
            .all(|rect| rect.record.timestamp == "2024-02-02T09:00:00Z"));
    }

    #[test]
    fn rect_spans_record_interval() {
        let config = EngineConfig::default();
        let snapshot = Snapshot::new("After Rules", vec![record("2024-02-02T09:00:00Z", "Code")]);
        let chart = build_lanes(&snapshot, false, &config);
        let rect = &chart.rects[0];
        assert_eq!((rect.end_time - rect.start_time).num_seconds(), 60);
        assert_eq!(rect.duration_seconds, 60.0);
    }
}
