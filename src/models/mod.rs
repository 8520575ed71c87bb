pub mod record;
pub mod snapshot;
pub mod stage;

pub use record::{ActivityRecord, MatchedRule, RecordMetadata};
pub use snapshot::{PreviewPayload, Snapshot, SOURCE_STAGE_PLUGIN};
pub use stage::{Comparison, Diff, StageInfo, StagePair};
