pub mod api;
pub mod models;
pub mod processors;
pub mod sources;

pub use api::fetch_live_events;
pub use models::{ErrorRecord, Event, LiveListings};
pub use processors::{compare_channels, is_live, merge_duplicates, sort_events};
