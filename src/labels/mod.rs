pub mod classifier;
pub mod loader;

pub use classifier::{
    UncategorizedKeywords, DEFAULT_CATEGORY, DEFAULT_PROJECT, DEFAULT_UNCATEGORIZED_KEYWORDS,
    OTHER_CATEGORY, UNCATEGORIZED_PROJECT,
};
pub use loader::{
    ConstantsPayload, ConstantsSource, FileConstantsSource, KeywordLoader, LoadState,
    StaticConstantsSource,
};
