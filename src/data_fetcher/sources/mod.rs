//! One adapter per upstream schedule API. Each adapter fetches its source's
//! full current schedule and normalizes it into canonical [`Event`]s; none
//! of them filter for liveness, that happens centrally in the pipeline.

pub mod onesoccer;
pub mod sportsnet;
pub mod tsn;

use crate::config::Config;
use crate::data_fetcher::models::Event;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use reqwest::Client;

pub use onesoccer::OneSoccer;
pub use sportsnet::Sportsnet;
pub use tsn::Tsn;

/// The capability shared by all source adapters: produce zero or more
/// normalized events from one upstream schedule.
///
/// `now` is injected so adapters that build time-windowed queries
/// (Sportsnet) stay deterministic under test; adapters that don't need it
/// ignore it.
pub trait ScheduleSource: Send + Sync {
    /// Short source label used in error records and logs, e.g. "TSN".
    fn label(&self) -> &'static str;

    /// Fetches and normalizes the source's current schedule.
    fn fetch<'a>(
        &'a self,
        client: &'a Client,
        config: &'a Config,
        now: DateTime<Utc>,
    ) -> BoxFuture<'a, Result<Vec<Event>, AppError>>;
}

/// All known sources in invocation order. The order is not significant for
/// output (the sort stage is authoritative) but keeps logs and error lists
/// deterministic.
pub fn all_sources() -> Vec<Box<dyn ScheduleSource>> {
    vec![Box::new(Tsn), Box::new(Sportsnet), Box::new(OneSoccer)]
}

/// Parses an upstream ISO-8601 timestamp into a UTC instant, mapping parse
/// failures to a structure error naming the offending source and value.
pub(crate) fn parse_instant(
    raw: &str,
    source: &str,
    url: &str,
) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            AppError::api_unexpected_structure(
                format!("{source} returned unparseable timestamp {raw:?}: {e}"),
                url,
            )
        })
}
