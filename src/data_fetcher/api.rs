//! HTTP fetch plumbing and the pipeline entry point.

use crate::config::Config;
use crate::data_fetcher::models::{ErrorRecord, Event, LiveListings};
use crate::data_fetcher::processors::{filter_live, merge_duplicates, sort_events};
use crate::data_fetcher::sources::all_sources;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

/// Fetches `url` and deserializes the JSON body into `T`.
///
/// Non-success statuses become typed errors carrying the status code and
/// response body text; a body that fails to deserialize becomes a parse
/// error. Either way the caller gets a single `AppError` to handle at the
/// source boundary.
#[instrument(skip(client))]
pub(crate) async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    debug!("Fetching data from URL: {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    debug!("Response status: {}", status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("Request to {} failed with status {}: {}", url, status, body);
        return Err(match status.as_u16() {
            404 => AppError::api_not_found(url),
            429 => AppError::api_rate_limit(body, url),
            code if status.is_server_error() => AppError::api_server_error(code, body, url),
            code => AppError::api_client_error(code, body, url),
        });
    }

    let response_text = response.text().await?;
    debug!("Response length: {} bytes", response_text.len());

    serde_json::from_str::<T>(&response_text).map_err(|e| {
        error!(
            "Failed to parse API response: {} (URL: {}, first 200 chars: {})",
            e,
            url,
            response_text.chars().take(200).collect::<String>()
        );
        AppError::ApiParse(e)
    })
}

/// Runs the whole aggregation pipeline once: fan out to every source
/// concurrently, fan in the settled results, then filter to what's live at
/// `now`, merge duplicate broadcasts and sort for display.
///
/// A failing source never fails the run. Its error is logged, recorded as
/// an [`ErrorRecord`] and it simply contributes zero events, so the caller
/// always gets whatever the healthy sources produced. There are no retries
/// and no per-call timeout beyond the client's own.
#[instrument(skip(client, config))]
pub async fn fetch_live_events(
    client: &Client,
    config: &Config,
    now: DateTime<Utc>,
) -> LiveListings {
    let sources = all_sources();
    let results = futures::future::join_all(
        sources
            .iter()
            .map(|source| async move { (source.label(), source.fetch(client, config, now).await) }),
    )
    .await;

    let mut events: Vec<Event> = Vec::new();
    let mut errors: Vec<ErrorRecord> = Vec::new();
    for (source, result) in results {
        match result {
            Ok(batch) => {
                info!("{} contributed {} events", source, batch.len());
                events.extend(batch);
            }
            Err(e) => {
                warn!("{} failed, continuing without it: {}", source, e);
                errors.push(ErrorRecord {
                    source,
                    message: e.to_string(),
                });
            }
        }
    }

    let live = filter_live(events, now);
    let merged = merge_duplicates(live);
    let sorted = sort_events(merged);
    info!(
        "Pipeline produced {} live events with {} source errors",
        sorted.len(),
        errors.len()
    );

    LiveListings {
        events: sorted,
        errors,
    }
}
