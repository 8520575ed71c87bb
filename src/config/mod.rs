//! Engine configuration.
//!
//! Everything the engine would otherwise keep in process-wide caches (the
//! uncategorized keyword set and the custom category colors) lives in an
//! [`EngineConfig`] that callers pass into every operation. Hosts that need a
//! shared, updatable copy wrap it in a [`ConfigStore`].

pub mod settings;
pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::colors::DEFAULT_SEED;
use crate::labels::{UncategorizedKeywords, OTHER_CATEGORY, UNCATEGORIZED_PROJECT};
use crate::log_warn;

pub use settings::{load_settings_file, ClientDirectory, UserSettings};
pub use store::ConfigStore;

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Seed of the label hash. Changing it re-colors every label at once.
    pub seed: i32,
    pub uncategorized_keywords: UncategorizedKeywords,
    /// User-chosen colors keyed by exact category label.
    pub category_colors: BTreeMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            uncategorized_keywords: UncategorizedKeywords::default(),
            category_colors: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Build a config from the user settings document. Invalid colors are
    /// dropped with a warning.
    pub fn from_settings(settings: &UserSettings) -> Self {
        let mut config = Self::default();
        if let Some(seed) = settings.color_seed {
            config.seed = seed;
        }
        config.set_category_colors(settings.category_colors.clone());
        config
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.uncategorized_keywords.replace(keywords);
        self
    }

    pub fn is_uncategorized(&self, label: Option<&str>) -> bool {
        self.uncategorized_keywords.is_uncategorized(label)
    }

    /// Category label as shown in aggregates: uncategorized values collapse
    /// to [`OTHER_CATEGORY`].
    pub fn category_bucket<'a>(&self, label: Option<&'a str>) -> &'a str {
        match label {
            Some(label) if !self.is_uncategorized(Some(label)) => label,
            _ => OTHER_CATEGORY,
        }
    }

    /// Project label as shown in aggregates: uncategorized values collapse
    /// to [`UNCATEGORIZED_PROJECT`].
    pub fn project_bucket<'a>(&self, label: Option<&'a str>) -> &'a str {
        match label {
            Some(label) if !self.is_uncategorized(Some(label)) => label,
            _ => UNCATEGORIZED_PROJECT,
        }
    }

    /// Replace the override map. Entries whose color fails validation are
    /// skipped; returns how many overrides were accepted.
    pub fn set_category_colors<I>(&mut self, colors: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.category_colors.clear();
        for (category, color) in colors {
            match settings::validation::validate_color(&color) {
                Ok(()) => {
                    self.category_colors.insert(category, color);
                }
                Err(err) => {
                    log_warn!("ignoring color override for category {category:?}: {err}");
                }
            }
        }
        self.category_colors.len()
    }

    pub fn category_override(&self, category: &str) -> Option<&str> {
        self.category_colors.get(category).map(String::as_str)
    }

    /// Back to built-in keywords, no overrides and the default seed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_collapse_uncategorized_labels() {
        let config = EngineConfig::default();
        assert_eq!(config.category_bucket(None), OTHER_CATEGORY);
        assert_eq!(config.category_bucket(Some("unknown")), OTHER_CATEGORY);
        assert_eq!(config.category_bucket(Some("Coding")), "Coding");
        assert_eq!(config.project_bucket(Some("")), UNCATEGORIZED_PROJECT);
        assert_eq!(config.project_bucket(Some("Reporter")), "Reporter");
    }

    #[test]
    fn invalid_override_colors_are_dropped() {
        let mut config = EngineConfig::default();
        let accepted = config.set_category_colors([
            ("Coding".to_string(), "#ff8800".to_string()),
            ("Meeting".to_string(), "not a color".to_string()),
            ("Browsing".to_string(), "hsl(200, 50%, 50%)".to_string()),
        ]);

        assert_eq!(accepted, 2);
        assert_eq!(config.category_override("Coding"), Some("#ff8800"));
        assert_eq!(config.category_override("Meeting"), None);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut config = EngineConfig::default().with_seed(7).with_keywords(["misc"]);
        config.set_category_colors([("Coding".to_string(), "#123456".to_string())]);

        config.reset();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn deserializes_partial_documents() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"seed": 11, "uncategorizedKeywords": ["misc"]}"#).expect("parses");
        assert_eq!(config.seed, 11);
        assert!(config.is_uncategorized(Some("MISC")));
        assert!(!config.is_uncategorized(Some("other")));
        assert!(config.category_colors.is_empty());
    }
}
