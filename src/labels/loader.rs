//! One-time load of the uncategorized keyword list from the backend's
//! constants document (`{ "uncategorized_keywords": [...] }`).
//!
//! The load is fire-and-forget: aggregation never waits for it and keeps
//! using whatever keywords the [`ConfigStore`] currently holds. A failed load
//! is logged and never retried.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::ConfigStore;
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantsPayload {
    pub uncategorized_keywords: Option<Vec<String>>,
}

/// Where the constants document comes from.
pub trait ConstantsSource {
    fn fetch_constants(&self) -> impl Future<Output = Result<ConstantsPayload>> + Send;
}

/// Constants document stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileConstantsSource {
    path: PathBuf,
}

impl FileConstantsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConstantsSource for FileConstantsSource {
    fn fetch_constants(&self) -> impl Future<Output = Result<ConstantsPayload>> + Send {
        let path = self.path.clone();
        async move {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read constants from {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid constants document in {}", path.display()))
        }
    }
}

/// In-memory source, for embedding hosts and tests.
#[derive(Debug, Clone)]
pub struct StaticConstantsSource {
    outcome: std::result::Result<ConstantsPayload, String>,
}

impl StaticConstantsSource {
    pub fn keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outcome: Ok(ConstantsPayload {
                uncategorized_keywords: Some(keywords.into_iter().map(Into::into).collect()),
            }),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

impl ConstantsSource for StaticConstantsSource {
    fn fetch_constants(&self) -> impl Future<Output = Result<ConstantsPayload>> + Send {
        let outcome = self.outcome.clone();
        async move { outcome.map_err(|message| anyhow!(message)) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed,
}

/// Guards the keyword load so it happens at most once.
#[derive(Debug, Clone)]
pub struct KeywordLoader {
    inner: Arc<Mutex<LoadState>>,
}

impl Default for KeywordLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordLoader {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(LoadState::Pending)),
        }
    }

    pub async fn state(&self) -> LoadState {
        *self.inner.lock().await
    }

    /// Fetch and apply the keyword list unless a previous call already
    /// finished (successfully or not). Concurrent callers wait for the first
    /// one and then observe its outcome.
    pub async fn load_once<S>(&self, store: &ConfigStore, source: &S) -> LoadState
    where
        S: ConstantsSource,
    {
        let mut state = self.inner.lock().await;
        if *state != LoadState::Pending {
            return *state;
        }

        *state = match fetch_keywords(source).await {
            Ok(keywords) => {
                log_info!("loaded {} uncategorized keywords", keywords.len());
                store.replace_keywords(keywords);
                LoadState::Loaded
            }
            Err(err) => {
                log_warn!("keeping default uncategorized keywords: {err:#}");
                LoadState::Failed
            }
        };
        *state
    }

    /// Run [`KeywordLoader::load_once`] on the tokio runtime without waiting.
    pub fn spawn_load<S>(&self, store: Arc<ConfigStore>, source: S) -> JoinHandle<LoadState>
    where
        S: ConstantsSource + Send + Sync + 'static,
    {
        let loader = self.clone();
        tokio::spawn(async move { loader.load_once(&store, &source).await })
    }
}

async fn fetch_keywords<S>(source: &S) -> Result<Vec<String>>
where
    S: ConstantsSource,
{
    let payload = source.fetch_constants().await?;
    payload
        .uncategorized_keywords
        .ok_or_else(|| anyhow!("constants document has no uncategorized_keywords"))
}
