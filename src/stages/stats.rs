use crate::models::{Snapshot, StageInfo};

/// Summary of one snapshot in a single pass over its records.
pub fn stats_for(index: usize, snapshot: &Snapshot) -> StageInfo {
    snapshot.records().iter().fold(
        StageInfo {
            index,
            name: snapshot.name.clone(),
            ..StageInfo::default()
        },
        |mut info, record| {
            info.item_count += 1;
            if record.category_label().is_some() {
                info.categorized_count += 1;
            }
            if record.project_label().is_some() {
                info.project_count += 1;
            }
            info.total_duration += record.duration_secs();
            info
        },
    )
}

/// Stage descriptors for every snapshot, indexed by position.
pub fn stage_infos(snapshots: &[Snapshot]) -> Vec<StageInfo> {
    snapshots
        .iter()
        .enumerate()
        .map(|(index, snapshot)| stats_for(index, snapshot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityRecord;

    #[test]
    fn counts_truthy_labels_and_sums_durations() {
        let snapshot = Snapshot::new(
            "After Rule Matching",
            vec![
                ActivityRecord::new("2024-02-02T09:00:00Z", 30.0, "Code", "a").with_category("Coding"),
                ActivityRecord::new("2024-02-02T09:01:00Z", 15.5, "Code", "b")
                    .with_category("Coding")
                    .with_project("Reporter"),
                ActivityRecord::new("2024-02-02T09:02:00Z", 4.5, "Slack", "c").with_category(""),
            ],
        );

        let info = stats_for(3, &snapshot);
        assert_eq!(info.index, 3);
        assert_eq!(info.name, "After Rule Matching");
        assert_eq!(info.item_count, 3);
        assert_eq!(info.categorized_count, 2);
        assert_eq!(info.project_count, 1);
        assert_eq!(info.total_duration, 50.0);
    }

    #[test]
    fn stage_infos_follow_snapshot_order() {
        let snapshots = vec![Snapshot::new("Raw Data", vec![]), Snapshot::new("After AFK", vec![])];
        let infos = stage_infos(&snapshots);
        assert_eq!(infos.iter().map(|i| (i.index, i.name.as_str())).collect::<Vec<_>>(), [(0, "Raw Data"), (1, "After AFK")]);
    }
}
