use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use stagelens_lib::aggregation::{aggregate, dominant_projects, resolve_client_colors, DominantProject};
use stagelens_lib::config::{load_settings_file, ConfigStore, EngineConfig};
use stagelens_lib::labels::{FileConstantsSource, KeywordLoader};
use stagelens_lib::lanes::{compute_domain, LaneBuilder, LaneLayout, OpenSnapshot};
use stagelens_lib::models::{PreviewPayload, Snapshot};
use stagelens_lib::stages::{compare, compare_selected, select_stage_pair};
use stagelens_lib::utils::init_logging;

#[derive(Parser)]
#[command(name = "stagelens")]
#[command(about = "Inspect activity-report pipeline stages", long_about = None)]
struct Cli {
    /// Pipeline preview JSON (object response or legacy snapshot array)
    preview: PathBuf,

    /// User settings JSON with category colors and client names
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Constants JSON carrying `uncategorized_keywords`
    #[arg(long, global = true)]
    constants: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-stage record counts and durations
    Stages,
    /// Label count changes between a stage and the one before it
    Diff {
        #[arg(long, default_value_t = 0)]
        stage: usize,
    },
    /// Hourly, category, project and matrix totals for one stage
    Aggregate {
        #[arg(long, default_value_t = 0)]
        stage: usize,
    },
    /// Lane layout and rectangles for one stage
    Lanes {
        #[arg(long, default_value_t = 0)]
        stage: usize,
        #[arg(long, value_enum, default_value_t = LaneMode::Auto)]
        mode: LaneMode,
    },
    /// Shared time domain over the given stages (all when none are given)
    Domain {
        #[arg(long = "open")]
        open: Vec<usize>,
    },
    /// Dominant project and color per client for one stage
    Clients {
        #[arg(long, default_value_t = 0)]
        stage: usize,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LaneMode {
    /// Source lanes for raw captures, attribute lanes otherwise
    Auto,
    Source,
    Attribute,
    Category,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientReport {
    dominant: Vec<DominantProject>,
    colors: BTreeMap<String, String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => load_settings_file(path)?,
        None => Default::default(),
    };
    let store = ConfigStore::new(EngineConfig::from_settings(&settings));

    if let Some(path) = &cli.constants {
        // One-shot process: wait so the output reflects the loaded keywords.
        KeywordLoader::new()
            .load_once(&store, &FileConstantsSource::new(path))
            .await;
    }

    let raw = tokio::fs::read_to_string(&cli.preview)
        .await
        .with_context(|| format!("Failed to read preview from {}", cli.preview.display()))?;
    let payload = PreviewPayload::from_json(&raw)?;
    let config = store.snapshot();

    match cli.command {
        Commands::Stages => print_json(&payload.stage_infos()),
        Commands::Diff { stage } => {
            let comparison = if payload.snapshots.is_empty() {
                compare(payload.before.as_ref(), payload.after.as_ref())
            } else {
                compare_selected(&payload.snapshots, stage)
            };
            print_json(&comparison)
        }
        Commands::Aggregate { stage } => {
            let snapshot = stage_snapshot(&payload, stage)?;
            print_json(&aggregate(snapshot.records(), &config))
        }
        Commands::Lanes { stage, mode } => {
            let snapshot = stage_snapshot(&payload, stage)?;
            let layout = match mode {
                LaneMode::Auto => LaneLayout::for_stage(snapshot, snapshot.is_source_stage()),
                LaneMode::Source => LaneLayout::source(snapshot),
                LaneMode::Attribute => LaneLayout::attribute(),
                LaneMode::Category => LaneLayout::category(snapshot, &config),
            };
            let clients = settings.client_directory();
            let chart = LaneBuilder::new(&config)
                .with_clients(&clients)
                .build(snapshot, &layout);
            print_json(&chart)
        }
        Commands::Domain { open } => {
            let lanes = payload
                .snapshots
                .iter()
                .enumerate()
                .map(|(index, snapshot)| OpenSnapshot::new(snapshot, open.is_empty() || open.contains(&index)));
            print_json(&compute_domain(lanes))
        }
        Commands::Clients { stage } => {
            let snapshot = stage_snapshot(&payload, stage)?;
            let report = ClientReport {
                dominant: dominant_projects(snapshot.records(), &config),
                colors: resolve_client_colors(snapshot.records(), &settings.client_directory(), &config),
            };
            print_json(&report)
        }
    }
}

/// The requested stage (clamped), or the payload's `after` snapshot when the
/// response carries no stage list.
fn stage_snapshot(payload: &PreviewPayload, requested: usize) -> Result<&Snapshot> {
    if let Some(pair) = select_stage_pair(payload.snapshots.len(), requested) {
        if let Some(snapshot) = payload.snapshots.get(pair.after) {
            return Ok(snapshot);
        }
    }
    match payload.after.as_ref() {
        Some(snapshot) => Ok(snapshot),
        None => bail!("preview contains no snapshots"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}
