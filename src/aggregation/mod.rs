pub mod clients;
pub mod tally;
pub mod timeline;

pub use clients::{dominant_projects, resolve_client_colors, DominantProject};
pub use timeline::{aggregate, aggregate_in, CategoryMatrix, HourBucket, NamedValue, TimelineAggregate};
