use crate::config::EngineConfig;

use super::palette::{color_for, CATEGORY_PALETTE, NEUTRAL_COLOR, PROJECT_PALETTE};
use super::tone::{hsl_color, LaneTone};

/// Categories the dashboard treats as first-class in raw source timelines.
const WELL_KNOWN_CATEGORIES: [&str; 10] = [
    "Coding",
    "Browsing",
    "Communication",
    "Meeting",
    "Documentation",
    "Design",
    "Research",
    "Writing",
    "Entertainment",
    "Social",
];

/// Label-to-color mapping bound to one engine configuration.
///
/// The mapping is a pure function of the label and the config: it does not
/// depend on call order or on which labels were colored before.
#[derive(Debug, Clone, Copy)]
pub struct ColorAssigner<'a> {
    config: &'a EngineConfig,
}

impl<'a> ColorAssigner<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Uncategorized → neutral; user override by exact label; warm palette.
    pub fn category_color(&self, label: Option<&str>) -> &'a str {
        let Some(label) = label.filter(|l| !self.config.is_uncategorized(Some(*l))) else {
            return NEUTRAL_COLOR;
        };
        if let Some(custom) = self.config.category_override(label) {
            return custom;
        }
        color_for(label, &CATEGORY_PALETTE, self.config.seed).unwrap_or(NEUTRAL_COLOR)
    }

    /// Uncategorized → neutral; cool palette otherwise. Clients reuse the
    /// color of their dominant project.
    pub fn project_color(&self, label: Option<&str>) -> &'a str {
        match label {
            Some(label) if !self.config.is_uncategorized(Some(label)) => {
                color_for(label, &PROJECT_PALETTE, self.config.seed).unwrap_or(NEUTRAL_COLOR)
            }
            _ => NEUTRAL_COLOR,
        }
    }

    /// Color for a category that has an override or is well known.
    pub fn known_category_color(&self, label: &str) -> Option<&'a str> {
        if self.config.is_uncategorized(Some(label)) {
            return None;
        }
        if let Some(custom) = self.config.category_override(label) {
            return Some(custom);
        }
        WELL_KNOWN_CATEGORIES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(label))
            .then(|| self.category_color(Some(label)))
    }

    pub fn tone_color(&self, value: &str, tone: LaneTone) -> String {
        hsl_color(value, self.config.seed, tone)
    }
}
