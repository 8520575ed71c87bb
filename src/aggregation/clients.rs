//! Client coloring.
//!
//! A client has no palette of its own: it takes the color of the project
//! that dominates its billed time, so a client and that project always read
//! as related in charts that show both.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::colors::ColorAssigner;
use crate::config::{ClientDirectory, EngineConfig};
use crate::models::ActivityRecord;

use super::tally::Tally;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DominantProject {
    pub client_id: String,
    pub project: String,
    /// Seconds the client spent on `project`.
    pub duration: f64,
}

/// Dominant project per client, in order of each client's first record.
///
/// The project with strictly the largest summed duration wins; on a tie the
/// project seen first for that client wins.
pub fn dominant_projects(records: &[ActivityRecord], config: &EngineConfig) -> Vec<DominantProject> {
    let mut order: Vec<&str> = Vec::new();
    let mut per_client: HashMap<&str, Tally> = HashMap::new();

    for record in records {
        let Some(client_id) = record.client_id() else {
            continue;
        };
        let project = config.project_bucket(record.project_label());

        per_client
            .entry(client_id)
            .or_insert_with(|| {
                order.push(client_id);
                Tally::default()
            })
            .add(project, record.duration_secs());
    }

    order
        .into_iter()
        .filter_map(|client_id| {
            let (project, duration) = per_client.get(client_id)?.leader()?;
            Some(DominantProject {
                client_id: client_id.to_string(),
                project: project.to_string(),
                duration,
            })
        })
        .collect()
}

/// Color per client display name. Clients without records are absent.
pub fn resolve_client_colors(
    records: &[ActivityRecord],
    clients: &ClientDirectory,
    config: &EngineConfig,
) -> BTreeMap<String, String> {
    let colors = ColorAssigner::new(config);

    dominant_projects(records, config)
        .into_iter()
        .map(|dominant| {
            (
                clients.display_name(&dominant.client_id).to_string(),
                colors.project_color(Some(dominant.project.as_str())).to_string(),
            )
        })
        .collect()
}
