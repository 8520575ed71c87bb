//! Snapshot and pipeline-preview payload models.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{ActivityRecord, Diff, StageInfo};

/// Plugin name the backend uses for the raw capture stages.
pub const SOURCE_STAGE_PLUGIN: &str = "Data Sources";
const SOURCE_STAGE_PREFIX: &str = "Raw Data Sources";

/// Record set as it existed after one pipeline stage finished.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub name: String,
    pub timeline: Vec<ActivityRecord>,
    pub plugin: Option<String>,
}

impl Snapshot {
    pub fn new(name: impl Into<String>, timeline: Vec<ActivityRecord>) -> Self {
        Self {
            name: name.into(),
            timeline,
            plugin: None,
        }
    }

    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = Some(plugin.into());
        self
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.timeline
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// True for raw, not-yet-merged captures.
    pub fn is_source_stage(&self) -> bool {
        self.plugin.as_deref() == Some(SOURCE_STAGE_PLUGIN)
            || self.name.starts_with(SOURCE_STAGE_PREFIX)
    }
}

/// Response of the pipeline-preview endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewPayload {
    pub stages: Vec<StageInfo>,
    pub before: Option<Snapshot>,
    pub after: Option<Snapshot>,
    pub diff: Option<Diff>,
    pub selected_stage: Option<usize>,
    pub snapshots: Vec<Snapshot>,
}

impl PreviewPayload {
    /// Parse either the current object response or the legacy bare array of
    /// snapshots. The shape is chosen up front so a bad field is reported
    /// with its position.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim_start().starts_with('[') {
            let snapshots: Vec<Snapshot> =
                serde_json::from_str(raw).context("failed to parse legacy pipeline preview array")?;
            return Ok(Self {
                snapshots,
                ..Self::default()
            });
        }

        serde_json::from_str(raw).context("failed to parse pipeline preview payload")
    }

    /// Stage descriptors as sent, or recomputed when the payload carried none.
    pub fn stage_infos(&self) -> Vec<StageInfo> {
        if self.stages.is_empty() {
            crate::stages::stage_infos(&self.snapshots)
        } else {
            self.stages.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_raw_source_stages() {
        assert!(Snapshot::new("Raw Data Sources", vec![]).is_source_stage());
        assert!(Snapshot::new("Raw Data Sources (Filled)", vec![]).is_source_stage());
        assert!(Snapshot::new("Capture", vec![])
            .with_plugin(SOURCE_STAGE_PLUGIN)
            .is_source_stage());
        assert!(!Snapshot::new("Raw Data", vec![])
            .with_plugin("Context Merger")
            .is_source_stage());
    }

    #[test]
    fn parses_object_response() {
        let raw = r#"{
            "stages": [{"index": 0, "name": "Raw Data", "item_count": 1, "categorized_count": 0, "project_count": 0, "total_duration": 5.0}],
            "before": null,
            "after": {"name": "Raw Data", "timeline": [], "plugin": "Context Merger"},
            "diff": {"category_changes": {"Coding": 2}, "project_changes": {}},
            "selected_stage": 0,
            "snapshots": [{"name": "Raw Data", "timeline": [{"timestamp": "2024-02-02T09:00:00Z", "duration": 5, "app": "Code", "title": "x"}]}]
        }"#;

        let payload = PreviewPayload::from_json(raw).expect("payload parses");
        assert_eq!(payload.stages.len(), 1);
        assert_eq!(payload.snapshots[0].timeline.len(), 1);
        assert_eq!(payload.selected_stage, Some(0));
        let diff = payload.diff.expect("diff present");
        assert_eq!(diff.category_changes.get("Coding"), Some(&2));
    }

    #[test]
    fn parses_legacy_array_response_and_derives_stages() {
        let raw = r#"[
            {"name": "Raw Data", "timeline": [{"timestamp": "2024-02-02T09:00:00Z", "duration": 5, "app": "Code", "title": "x", "category": "Coding"}]},
            {"name": "After Compression", "timeline": []}
        ]"#;

        let payload = PreviewPayload::from_json(raw).expect("legacy payload parses");
        assert_eq!(payload.snapshots.len(), 2);

        let stages = payload.stage_infos();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].categorized_count, 1);
        assert_eq!(stages[1].item_count, 0);
    }

    #[test]
    fn rejects_non_json() {
        assert!(PreviewPayload::from_json("<html>").is_err());
    }

    #[test]
    fn null_fields_from_the_backend_keep_the_preview() {
        let raw = r#"{
            "snapshots": [{"name": "Raw Data", "timeline": [
                {"timestamp": "2024-02-02T09:00:00Z", "duration": 60, "app": "Code", "title": "x"},
                {"timestamp": "2024-02-02T09:01:00Z", "duration": null, "app": "Code", "title": "y"},
                {"timestamp": null, "duration": 30, "app": "Code", "title": "z"}
            ]}]
        }"#;

        let payload = PreviewPayload::from_json(raw).expect("payload parses");
        let records = payload.snapshots[0].records();
        assert_eq!(records.len(), 3);
        assert!(records[0].interval().is_some());
        assert_eq!(records[1].duration_secs(), 0.0);
        assert!(records[2].start().is_none());
        assert_eq!(payload.stage_infos()[0].total_duration, 90.0);
    }

    #[test]
    fn legacy_array_tolerates_nulls_too() {
        let raw = r#"[{"name": "Raw Data", "timeline": [{"timestamp": null, "duration": null, "app": "Code", "title": "x"}]}]"#;
        let payload = PreviewPayload::from_json(raw).expect("legacy payload parses");
        assert_eq!(payload.snapshots[0].timeline.len(), 1);
    }

    #[test]
    fn errors_point_at_the_bad_field() {
        let object = PreviewPayload::from_json(r#"{"snapshots": [{"name": "Raw", "timeline": 5}]}"#)
            .expect_err("timeline must be a list");
        assert!(format!("{object:#}").contains("line 1 column"));

        let legacy = PreviewPayload::from_json(r#"[{"name": "Raw", "timeline": 5}]"#).expect_err("timeline must be a list");
        let message = format!("{legacy:#}");
        assert!(message.contains("legacy"));
        assert!(message.contains("line 1 column"));
    }
}
