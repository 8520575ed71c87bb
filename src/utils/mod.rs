pub mod lenient;
pub mod logging;
pub mod time;

pub use logging::init_logging;
pub use time::{parse_timestamp, seconds_to_duration};
