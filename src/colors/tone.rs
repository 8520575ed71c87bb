use serde::{Deserialize, Serialize};

use super::palette::label_hash;

/// Hue shift plus fixed saturation/lightness for hash-derived HSL colors.
/// Each timeline lane gets its own tone so the same value never renders the
/// same on two lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneTone {
    pub hue_offset: u32,
    pub saturation: u8,
    pub lightness: u8,
}

impl LaneTone {
    pub const fn new(hue_offset: u32, saturation: u8, lightness: u8) -> Self {
        Self {
            hue_offset,
            saturation,
            lightness,
        }
    }
}

pub fn hsl_color(value: &str, seed: i32, tone: LaneTone) -> String {
    let hue = (u64::from(label_hash(value, seed)) + u64::from(tone.hue_offset)) % 360;
    format!("hsl({hue}, {}%, {}%)", tone.saturation, tone.lightness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::DEFAULT_SEED;

    #[test]
    fn formats_css_hsl() {
        // label_hash("a", 5381) = 177604; 177604 % 360 = 124
        let color = hsl_color("a", DEFAULT_SEED, LaneTone::new(0, 65, 55));
        assert_eq!(color, "hsl(124, 65%, 55%)");
    }

    #[test]
    fn hue_offset_rotates_and_wraps() {
        let color = hsl_color("a", DEFAULT_SEED, LaneTone::new(300, 40, 60));
        assert_eq!(color, "hsl(64, 40%, 60%)");
    }
}
