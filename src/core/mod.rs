//! Core data structures for load series.

mod point;
mod series;
mod timestamp;

pub use point::LoadPoint;
pub use series::LoadSeries;
pub use timestamp::{
    display_time, normalize_timestamp, parse_timestamp, timestamp_key, CANONICAL_FORMAT,
};
