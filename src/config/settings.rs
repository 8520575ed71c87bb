//! User settings consumed by the engine.
//!
//! Only the pieces that influence coloring and client naming are modelled;
//! the rest of the settings document is ignored.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientEntry {
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub category_colors: BTreeMap<String, String>,
    pub clients: BTreeMap<String, ClientEntry>,
    pub color_seed: Option<i32>,
}

impl UserSettings {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse user settings")
    }

    pub fn client_directory(&self) -> ClientDirectory {
        ClientDirectory::from_entries(
            self.clients
                .iter()
                .filter_map(|(id, entry)| entry.name.clone().map(|name| (id.clone(), name))),
        )
    }
}

/// Read a settings document from disk. A missing file yields defaults.
pub fn load_settings_file(path: &Path) -> Result<UserSettings> {
    if !path.exists() {
        return Ok(UserSettings::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    UserSettings::from_json(&contents)
        .with_context(|| format!("Invalid settings in {}", path.display()))
}

/// Client identifier to display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDirectory {
    names: HashMap<String, String>,
}

impl ClientDirectory {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            names: entries.into_iter().collect(),
        }
    }

    /// Display name for a client, falling back to the identifier itself.
    pub fn display_name<'a>(&'a self, client_id: &'a str) -> &'a str {
        self.names
            .get(client_id)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(client_id)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Validation for user-supplied color strings.
pub mod validation {
    use anyhow::{bail, Result};

    const FUNCTIONAL_PREFIXES: [&str; 4] = ["rgb(", "rgba(", "hsl(", "hsla("];
    const MAX_COLOR_LEN: usize = 64;

    /// Accepts `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb()/rgba()/hsl()/hsla()`
    /// and bare CSS color names.
    pub fn validate_color(color: &str) -> Result<()> {
        let color = color.trim();
        if color.is_empty() {
            bail!("Color is empty");
        }
        if color.len() > MAX_COLOR_LEN {
            bail!("Color value too long (max {MAX_COLOR_LEN} chars)");
        }

        if let Some(hex_part) = color.strip_prefix('#') {
            if !matches!(hex_part.len(), 3 | 6 | 8) {
                bail!("Invalid color format. Must be hex (#RGB, #RRGGBB or #RRGGBBAA)");
            }
            if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
                bail!("Invalid color format. Must be hex (#RRGGBB)");
            }
            return Ok(());
        }

        let lowered = color.to_ascii_lowercase();
        if FUNCTIONAL_PREFIXES.iter().any(|prefix| lowered.starts_with(prefix)) {
            if !lowered.ends_with(')') {
                bail!("Unterminated color function");
            }
            return Ok(());
        }

        if lowered.chars().all(|c| c.is_ascii_alphabetic()) {
            return Ok(());
        }

        bail!("Unrecognized color {color:?}")
    }
}
