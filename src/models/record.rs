//! Activity record data model.
//!
//! One observed interval as emitted by the report pipeline. Records are
//! received as JSON and never modified afterwards; every derived view
//! (buckets, lanes, diffs) is built from borrowed records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::{lenient, parse_timestamp, seconds_to_duration};

/// Rule that produced a record's categorization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchedRule {
    pub keyword: Option<String>,
    pub target: Option<String>,
    pub rule_category: Option<String>,
    pub rule_project: Option<String>,
}

/// Free-form metadata attached by pipeline processors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordMetadata {
    /// Opaque client identifier assigned by project mapping.
    pub client: Option<String>,
    pub matched_rule: Option<MatchedRule>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityRecord {
    /// Start of the interval, kept verbatim; see [`ActivityRecord::start`].
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub timestamp: String,
    /// Seconds. `null` or non-numeric input reads as 0.
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub duration: f64,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub app: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub title: String,
    pub url: Option<String>,
    pub file: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub project: Option<String>,
    pub status: Option<String>,
    /// Raw data source (`Window`, `Web`, `VSCode`, `AFK`).
    pub source: Option<String>,
    pub context: Vec<String>,
    pub metadata: RecordMetadata,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActivityRecord {
    pub fn new(timestamp: impl Into<String>, duration: f64, app: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            duration,
            app: app.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.metadata.client = Some(client.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Parsed start instant, `None` when the timestamp is malformed.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// `[start, start + duration]`, `None` when the timestamp is malformed
    /// or the end falls outside the representable range.
    pub fn interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.start()?;
        let end = start.checked_add_signed(seconds_to_duration(self.duration))?;
        Some((start, end))
    }

    /// Duration usable for sums: negative and non-finite values count as zero.
    pub fn duration_secs(&self) -> f64 {
        if self.duration.is_finite() {
            self.duration.max(0.0)
        } else {
            0.0
        }
    }

    pub fn category_label(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn project_label(&self) -> Option<&str> {
        non_empty(&self.project)
    }

    pub fn client_id(&self) -> Option<&str> {
        non_empty(&self.metadata.client)
    }

    pub fn source_label(&self) -> Option<&str> {
        non_empty(&self.source)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_item_and_keeps_unknown_fields() {
        let json = r#"{
            "timestamp": "2024-02-02T09:00:00+00:00",
            "duration": 42.5,
            "app": "Code",
            "title": "main.rs",
            "category": "Coding",
            "project": null,
            "source": "Window",
            "metadata": {
                "client": "acme",
                "matched_rule": {"keyword": "main", "target": "title", "rule_category": "Coding", "rule_project": null},
                "git_branch": "main"
            },
            "plugin_note": 7
        }"#;

        let record: ActivityRecord = serde_json::from_str(json).expect("record parses");
        assert_eq!(record.category_label(), Some("Coding"));
        assert_eq!(record.project_label(), None);
        assert_eq!(record.client_id(), Some("acme"));
        let rule = record.metadata.matched_rule.as_ref().expect("rule");
        assert_eq!(rule.keyword.as_deref(), Some("main"));
        assert_eq!(record.metadata.extra.get("git_branch"), Some(&Value::from("main")));
        assert_eq!(record.extra.get("plugin_note"), Some(&Value::from(7)));
    }

    #[test]
    fn null_duration_and_timestamp_do_not_reject_the_record() {
        let record: ActivityRecord = serde_json::from_str(
            r#"{"timestamp": null, "duration": null, "app": null, "title": "main.rs", "category": "Coding"}"#,
        )
        .expect("record parses");

        assert_eq!(record.timestamp, "");
        assert_eq!(record.duration_secs(), 0.0);
        assert_eq!(record.app, "");
        assert!(record.start().is_none());
        assert_eq!(record.category_label(), Some("Coding"));
    }

    #[test]
    fn numeric_timestamp_is_treated_as_malformed() {
        let record: ActivityRecord =
            serde_json::from_str(r#"{"timestamp": 1706864400, "duration": "90", "app": "Code", "title": "x"}"#)
                .expect("record parses");

        assert!(record.interval().is_none());
        assert_eq!(record.duration, 90.0);
    }

    #[test]
    fn interval_spans_duration() {
        let record = ActivityRecord::new("2024-02-02T09:00:00Z", 90.0, "Code", "main.rs");
        let (start, end) = record.interval().expect("valid interval");
        assert_eq!((end - start).num_seconds(), 90);
    }

    #[test]
    fn malformed_timestamp_has_no_interval() {
        let record = ActivityRecord::new("not a time", 90.0, "Code", "main.rs");
        assert!(record.interval().is_none());
    }

    #[test]
    fn empty_labels_are_treated_as_absent() {
        let record = ActivityRecord::new("2024-02-02T09:00:00Z", 1.0, "Code", "")
            .with_category("")
            .with_project("");
        assert_eq!(record.category_label(), None);
        assert_eq!(record.project_label(), None);
    }
}
