pub mod filter;

pub use filter::{HeadsFilter, TimeRangeFilter};
