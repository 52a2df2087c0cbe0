pub mod dupe_tracker;

pub use dupe_tracker::{DupeSummary, DupeTracker};
