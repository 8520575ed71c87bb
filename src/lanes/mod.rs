pub mod builder;
pub mod domain;
pub mod layout;

pub use builder::{build_lanes, LaneBuilder, LaneChart, Rect, AFK_COLOR, NOT_AFK_COLOR};
pub use domain::{compute_domain, domain_or_local, local_bounds, OpenSnapshot, TimeDomain};
pub use layout::{is_placeholder, AttributeLane, LaneLayout, PLACEHOLDER_VALUES, SEPARATOR_LANE};
