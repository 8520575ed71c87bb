//! Fixed palettes and the seeded label hash.
//!
//! The hash replays the dashboard's accumulator bit for bit: start at the
//! seed, then `hash = (hash * 33) ^ unit` over the label's UTF-16 code units
//! with 32-bit wrap-around, and take the absolute value at the end.

/// Default hash seed. Changing it re-colors every label.
pub const DEFAULT_SEED: i32 = 5381;

/// Color for anything classified as uncategorized.
pub const NEUTRAL_COLOR: &str = "#9ca3af";

/// Warm hues for categories.
pub const CATEGORY_PALETTE: [&str; 12] = [
    "#ef4444", "#f97316", "#f59e0b", "#eab308", "#dc2626", "#ea580c",
    "#d97706", "#fb7185", "#e11d48", "#f43f5e", "#c2410c", "#facc15",
];

/// Cool hues for projects and clients.
pub const PROJECT_PALETTE: [&str; 12] = [
    "#3b82f6", "#06b6d4", "#14b8a6", "#10b981", "#6366f1", "#8b5cf6",
    "#0ea5e9", "#22d3ee", "#2563eb", "#0891b2", "#0d9488", "#7c3aed",
];

pub fn label_hash(label: &str, seed: i32) -> u32 {
    let hash = label
        .encode_utf16()
        .fold(seed, |hash, unit| hash.wrapping_mul(33) ^ i32::from(unit));
    hash.unsigned_abs()
}

/// Palette slot for a label. An empty palette always maps to slot 0.
pub fn palette_index(label: &str, seed: i32, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    label_hash(label, seed) as usize % palette_len
}

/// Pick a palette member for `label`. Returns `None` only for an empty
/// palette.
pub fn color_for<'p>(label: &str, palette: &[&'p str], seed: i32) -> Option<&'p str> {
    palette.get(palette_index(label, seed, palette.len())).copied()
}
