use super::{ScheduleSource, parse_instant};
use crate::config::Config;
use crate::data_fetcher::api::fetch;
use crate::data_fetcher::models::{Event, TsnScheduleItem};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use reqwest::Client;
use tracing::{info, instrument};

/// TSN's schedule API. A single GET returns the whole current schedule as a
/// flat JSON array; items map 1:1 onto canonical events.
pub struct Tsn;

impl ScheduleSource for Tsn {
    fn label(&self) -> &'static str {
        "TSN"
    }

    fn fetch<'a>(
        &'a self,
        client: &'a Client,
        config: &'a Config,
        _now: DateTime<Utc>,
    ) -> BoxFuture<'a, Result<Vec<Event>, AppError>> {
        Box::pin(fetch_tsn_events(client, config))
    }
}

#[instrument(skip(client, config))]
async fn fetch_tsn_events(client: &Client, config: &Config) -> Result<Vec<Event>, AppError> {
    let url = &config.tsn_schedule_url;
    let items: Vec<TsnScheduleItem> = fetch(client, url).await?;
    info!("TSN schedule returned {} items", items.len());
    items.into_iter().map(|item| item_to_event(item, url)).collect()
}

fn item_to_event(item: TsnScheduleItem, url: &str) -> Result<Event, AppError> {
    Ok(Event {
        name: item.headlines.basic,
        duration: item.duration,
        start_time: parse_instant(&item.start_time, "TSN", url)?,
        end_time: parse_instant(&item.end_time, "TSN", url)?,
        channel: item.channel_name,
    })
}
