use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Canonical bucket for uncategorized categories in aggregates.
pub const OTHER_CATEGORY: &str = "Other";
/// Canonical bucket for uncategorized projects in aggregates.
pub const UNCATEGORIZED_PROJECT: &str = "Uncategorized";

/// Label the backend gives records that carry no category (stage diffs).
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
/// Label the backend gives records that carry no project (stage diffs).
pub const DEFAULT_PROJECT: &str = "Unknown";

/// Built-in keyword list, already lowercased.
pub const DEFAULT_UNCATEGORIZED_KEYWORDS: [&str; 9] = [
    "unknown",
    "uncategorized",
    "unclassified",
    "non-billable",
    "(none)",
    "",
    "other",
    "その他",
    "未分類",
];

/// Keywords that mark a label as "uncategorized".
///
/// Matching is case-insensitive and ignores surrounding whitespace. The empty
/// string is always part of the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct UncategorizedKeywords {
    keywords: BTreeSet<String>,
}

impl Default for UncategorizedKeywords {
    fn default() -> Self {
        Self::from_keywords(DEFAULT_UNCATEGORIZED_KEYWORDS)
    }
}

impl UncategorizedKeywords {
    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: BTreeSet<String> = keywords.into_iter().map(|k| normalize(k.as_ref())).collect();
        set.insert(String::new());
        Self { keywords: set }
    }

    /// `None` and blank labels are always uncategorized.
    pub fn is_uncategorized(&self, label: Option<&str>) -> bool {
        match label {
            None => true,
            Some(label) => self.keywords.contains(&normalize(label)),
        }
    }

    /// Swap the whole keyword list, e.g. after loading it from the backend.
    pub fn replace<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        *self = Self::from_keywords(keywords);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for UncategorizedKeywords {
    fn from(keywords: Vec<String>) -> Self {
        Self::from_keywords(keywords)
    }
}

impl From<UncategorizedKeywords> for Vec<String> {
    fn from(keywords: UncategorizedKeywords) -> Self {
        keywords.keywords.into_iter().collect()
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}
