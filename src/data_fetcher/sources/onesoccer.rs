use super::{ScheduleSource, parse_instant};
use crate::config::Config;
use crate::data_fetcher::api::fetch;
use crate::data_fetcher::models::{Event, OneSoccerItem, OneSoccerPage};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use reqwest::Client;
use tracing::{info, instrument};

/// Index of the page entry that carries the schedule rail. OneSoccer has no
/// schedule API; the schedule rides inside the home page content, and its
/// position among the entries is an upstream editorial decision. If they
/// reorder the page this breaks, which is why the access is guarded with a
/// descriptive structure error instead of a bare index.
const SCHEDULE_ENTRY_INDEX: usize = 1;

const CHANNEL_NAME: &str = "OneSoccer";

/// OneSoccer's page-content API, queried with `path=/` for the home page.
pub struct OneSoccer;

impl ScheduleSource for OneSoccer {
    fn label(&self) -> &'static str {
        "OneSoccer"
    }

    fn fetch<'a>(
        &'a self,
        client: &'a Client,
        config: &'a Config,
        _now: DateTime<Utc>,
    ) -> BoxFuture<'a, Result<Vec<Event>, AppError>> {
        Box::pin(fetch_onesoccer_events(client, config))
    }
}

#[instrument(skip(client, config))]
async fn fetch_onesoccer_events(client: &Client, config: &Config) -> Result<Vec<Event>, AppError> {
    let url = format!("{}?path=/", config.onesoccer_page_url);
    let page: OneSoccerPage = fetch(client, &url).await?;
    let items = schedule_items(&page, &url)?;
    info!("OneSoccer schedule rail has {} items", items.len());
    items.iter().map(|item| item_to_event(item, &url)).collect()
}

/// Digs the schedule rail out of the page entries, failing with a clear
/// structure error if the page no longer looks the way we assume.
fn schedule_items<'a>(
    page: &'a OneSoccerPage,
    url: &str,
) -> Result<&'a [OneSoccerItem], AppError> {
    let entry = page.entries.get(SCHEDULE_ENTRY_INDEX).ok_or_else(|| {
        AppError::api_unexpected_structure(
            format!(
                "OneSoccer page has {} entries, expected the schedule rail at index {}",
                page.entries.len(),
                SCHEDULE_ENTRY_INDEX
            ),
            url,
        )
    })?;
    let list = entry.list.as_ref().ok_or_else(|| {
        AppError::api_unexpected_structure(
            format!("OneSoccer page entry {SCHEDULE_ENTRY_INDEX} carries no list"),
            url,
        )
    })?;
    Ok(&list.items)
}

fn item_to_event(item: &OneSoccerItem, url: &str) -> Result<Event, AppError> {
    Ok(Event {
        name: item.title.clone(),
        duration: item.duration,
        start_time: parse_instant(&item.event_start_date, CHANNEL_NAME, url)?,
        end_time: parse_instant(&item.event_end_date, CHANNEL_NAME, url)?,
        channel: CHANNEL_NAME.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::{OneSoccerEntry, OneSoccerList};

    fn rail_item() -> OneSoccerItem {
        OneSoccerItem {
            title: "CPL: Forge FC vs. Cavalry FC".to_string(),
            duration: 7200.0,
            event_start_date: "2025-01-15T00:00:00Z".to_string(),
            event_end_date: "2025-01-15T02:00:00Z".to_string(),
        }
    }

    fn page_with(entries: Vec<OneSoccerEntry>) -> OneSoccerPage {
        OneSoccerPage { entries }
    }

    #[test]
    fn test_channel_is_always_onesoccer() {
        let event = item_to_event(&rail_item(), "http://mock").expect("maps");
        assert_eq!(event.channel, "OneSoccer");
        assert_eq!(event.name, "CPL: Forge FC vs. Cavalry FC");
    }

    #[test]
    fn test_missing_schedule_entry_is_a_structure_error() {
        let page = page_with(vec![OneSoccerEntry { list: None }]);
        let err = schedule_items(&page, "http://mock").unwrap_err();
        assert!(err.to_string().contains("expected the schedule rail at index 1"));
    }

    #[test]
    fn test_entry_without_list_is_a_structure_error() {
        let page = page_with(vec![
            OneSoccerEntry { list: None },
            OneSoccerEntry { list: None },
        ]);
        let err = schedule_items(&page, "http://mock").unwrap_err();
        assert!(err.to_string().contains("carries no list"));
    }

    #[test]
    fn test_schedule_rail_items_are_returned() {
        let page = page_with(vec![
            OneSoccerEntry { list: None },
            OneSoccerEntry {
                list: Some(OneSoccerList {
                    items: vec![rail_item()],
                }),
            },
        ]);
        let items = schedule_items(&page, "http://mock").expect("finds rail");
        assert_eq!(items.len(), 1);
    }
}
