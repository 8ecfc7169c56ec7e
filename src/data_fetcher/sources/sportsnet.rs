use super::ScheduleSource;
use crate::config::Config;
use crate::constants::SPORTSNET_WINDOW_SECONDS;
use crate::data_fetcher::api::fetch;
use crate::data_fetcher::models::{Event, SportsnetEvent, SportsnetResponse};
use crate::error::AppError;
use chrono::{DateTime, TimeZone, Utc};
use futures::future::BoxFuture;
use reqwest::Client;
use tracing::{info, instrument};

/// Sportsnet's schedule-admin API. The endpoint wants an explicit
/// `day_start`/`day_end` window in Unix seconds; we straddle `now` by eight
/// hours on each side so anything currently airing is always inside it.
pub struct Sportsnet;

impl ScheduleSource for Sportsnet {
    fn label(&self) -> &'static str {
        "Sportsnet"
    }

    fn fetch<'a>(
        &'a self,
        client: &'a Client,
        config: &'a Config,
        now: DateTime<Utc>,
    ) -> BoxFuture<'a, Result<Vec<Event>, AppError>> {
        Box::pin(fetch_sportsnet_events(client, config, now))
    }
}

/// Builds the windowed events URL around `now`
fn build_events_url(base: &str, now: DateTime<Utc>) -> String {
    let day_start = now.timestamp() - SPORTSNET_WINDOW_SECONDS;
    let day_end = now.timestamp() + SPORTSNET_WINDOW_SECONDS;
    format!("{base}?day_start={day_start}&day_end={day_end}")
}

#[instrument(skip(client, config))]
async fn fetch_sportsnet_events(
    client: &Client,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<Vec<Event>, AppError> {
    let url = build_events_url(&config.sportsnet_events_url, now);
    let response: SportsnetResponse = fetch(client, &url).await?;
    info!("Sportsnet returned {} events in window", response.data.len());
    response
        .data
        .into_iter()
        .map(|event| event_to_event(event, &url))
        .collect()
}

fn event_to_event(event: SportsnetEvent, url: &str) -> Result<Event, AppError> {
    Ok(Event {
        channel: joined_broadcasters(&event),
        name: event.event_name,
        duration: event.event_duration,
        start_time: instant_from_unix(event.start_time_utc, url)?,
        end_time: instant_from_unix(event.end_time_utc, url)?,
    })
}

fn instant_from_unix(seconds: i64, url: &str) -> Result<DateTime<Utc>, AppError> {
    Utc.timestamp_opt(seconds, 0).single().ok_or_else(|| {
        AppError::api_unexpected_structure(
            format!("Sportsnet returned out-of-range Unix timestamp {seconds}"),
            url,
        )
    })
}

/// Joins the filled broadcaster slots with ", ". The result is a single
/// atomic channel token as far as duplicate merging is concerned.
fn joined_broadcasters(event: &SportsnetEvent) -> String {
    [
        &event.primary_broadcaster,
        &event.secondary_broadcaster,
        &event.tertiary_broadcaster,
    ]
    .into_iter()
    .filter_map(|b| b.as_deref())
    .map(str::trim)
    .filter(|b| !b.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snet_event() -> SportsnetEvent {
        SportsnetEvent {
            event_name: "NHL Hockey: Oilers vs. Flames".to_string(),
            event_duration: 10800.0,
            start_time_utc: 1736899200,
            end_time_utc: 1736910000,
            primary_broadcaster: Some("Sportsnet West".to_string()),
            secondary_broadcaster: None,
            tertiary_broadcaster: None,
        }
    }

    #[test]
    fn test_window_straddles_now_by_eight_hours() {
        let now: DateTime<Utc> = "2025-01-15T12:00:00Z".parse().unwrap();
        let url = build_events_url("http://mock/v1/events", now);
        let day_start = now.timestamp() - 8 * 3600;
        let day_end = now.timestamp() + 8 * 3600;
        assert_eq!(
            url,
            format!("http://mock/v1/events?day_start={day_start}&day_end={day_end}")
        );
        assert_eq!(day_end - day_start, 16 * 3600);
    }

    #[test]
    fn test_unix_seconds_become_utc_instants() {
        let event = event_to_event(snet_event(), "http://mock").expect("maps");
        assert_eq!(event.start_time.to_rfc3339(), "2025-01-15T00:00:00+00:00");
        assert_eq!(event.end_time.to_rfc3339(), "2025-01-15T03:00:00+00:00");
    }

    #[test]
    fn test_all_broadcasters_joined_in_slot_order() {
        let mut raw = snet_event();
        raw.secondary_broadcaster = Some("Sportsnet East".to_string());
        raw.tertiary_broadcaster = Some("SN NOW+ 1".to_string());
        let event = event_to_event(raw, "http://mock").expect("maps");
        assert_eq!(event.channel, "Sportsnet West, Sportsnet East, SN NOW+ 1");
    }

    #[test]
    fn test_empty_broadcaster_slots_are_dropped() {
        let mut raw = snet_event();
        raw.primary_broadcaster = Some(String::new());
        raw.secondary_broadcaster = Some("Sportsnet One".to_string());
        let event = event_to_event(raw, "http://mock").expect("maps");
        assert_eq!(event.channel, "Sportsnet One");
    }

    #[test]
    fn test_out_of_range_timestamp_is_a_structure_error() {
        let mut raw = snet_event();
        raw.start_time_utc = i64::MAX;
        let err = event_to_event(raw, "http://mock").unwrap_err();
        assert!(matches!(err, AppError::ApiUnexpectedStructure { .. }));
    }
}
