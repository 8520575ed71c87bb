pub mod assigner;
pub mod palette;
pub mod tone;

pub use assigner::ColorAssigner;
pub use palette::{
    color_for, label_hash, palette_index, CATEGORY_PALETTE, DEFAULT_SEED, NEUTRAL_COLOR,
    PROJECT_PALETTE,
};
pub use tone::{hsl_color, LaneTone};
