use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::EngineConfig;

/// Shared, replaceable engine configuration.
///
/// Readers take a cheap [`Arc`] snapshot and run against it; writers swap in a
/// modified copy. An aggregation that started before an update keeps using
/// the snapshot it took.
#[derive(Debug, Default)]
pub struct ConfigStore {
    data: RwLock<Arc<EngineConfig>>,
}

impl ConfigStore {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            data: RwLock::new(Arc::new(config)),
        }
    }

    pub fn snapshot(&self) -> Arc<EngineConfig> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Apply `change` to a copy of the current config and publish the copy.
    pub fn update<F>(&self, change: F)
    where
        F: FnOnce(&mut EngineConfig),
    {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = EngineConfig::clone(&guard);
        change(&mut next);
        *guard = Arc::new(next);
    }

    pub fn replace_keywords<I, S>(&self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.update(|config| config.uncategorized_keywords.replace(keywords));
    }

    /// Returns how many overrides passed validation.
    pub fn set_category_colors(&self, colors: BTreeMap<String, String>) -> usize {
        let mut accepted = 0;
        self.update(|config| accepted = config.set_category_colors(colors));
        accepted
    }

    pub fn reset(&self) {
        self.update(EngineConfig::reset);
    }
}
