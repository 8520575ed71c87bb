pub mod diff;
pub mod stats;

pub use diff::{
    category_counts, compare, compare_selected, diff, diff_counts, project_counts,
    select_stage_pair, LabelCounts,
};
pub use stats::{stage_infos, stats_for};
