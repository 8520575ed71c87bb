//! Inspection and alignment of activity-report pipeline stages.
//!
//! The engine takes pipeline-preview snapshots (one ordered record list per
//! stage) and turns them into chart-ready data: stage summaries and diffs,
//! hourly and category×project aggregates, deterministic label colors, and
//! lane layouts on a shared time axis. Nothing here performs I/O except the
//! keyword loader and the settings helpers used by the binary.

pub mod aggregation;
pub mod colors;
pub mod config;
pub mod labels;
pub mod lanes;
pub mod models;
pub mod stages;
pub mod utils;

pub use aggregation::{aggregate, resolve_client_colors, TimelineAggregate};
pub use colors::ColorAssigner;
pub use config::{ConfigStore, EngineConfig};
pub use lanes::{build_lanes, compute_domain, LaneChart, OpenSnapshot, TimeDomain};
pub use models::{ActivityRecord, Comparison, Diff, PreviewPayload, Snapshot, StageInfo};
pub use stages::{compare, diff, stage_infos};
