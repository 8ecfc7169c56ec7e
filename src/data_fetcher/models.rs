use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Canonical broadcast listing, the common shape every source adapter
/// normalizes into.
///
/// Two events describe the same broadcast iff `name`, `start_time` and
/// `end_time` are all exactly equal; the merge step in
/// [`crate::data_fetcher::processors::merge_duplicates`] relies on that
/// identity. Before merging, `channel` is a single channel name; after
/// merging it may be a comma-joined list and must be treated as an opaque
/// display string.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    /// Source-reported duration, informational only
    pub duration: f64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub channel: String,
}

impl Event {
    /// Identity key for duplicate merging. `start_time < end_time` is
    /// assumed from upstream and not validated here.
    pub fn broadcast_key(&self) -> (String, DateTime<Utc>, DateTime<Utc>) {
        (self.name.clone(), self.start_time, self.end_time)
    }
}

/// One source's failure during a pipeline run. Carries a display string
/// only; the structured cause has already been logged at the fetch boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub source: &'static str,
    pub message: String,
}

/// Everything one pipeline run produces: sorted live events plus the
/// per-source failures that occurred along the way. A non-empty `errors`
/// list never suppresses the events that were fetched successfully.
#[derive(Debug, Clone, Default)]
pub struct LiveListings {
    pub events: Vec<Event>,
    pub errors: Vec<ErrorRecord>,
}

/// One item of TSN's schedule array. The headline lives one level down in
/// an ANS-style `headlines.basic` field.
#[derive(Debug, Clone, Deserialize)]
pub struct TsnScheduleItem {
    pub headlines: TsnHeadlines,
    #[serde(rename = "channelName")]
    pub channel_name: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TsnHeadlines {
    pub basic: String,
}

/// Envelope of the Sportsnet events endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SportsnetResponse {
    #[serde(default)]
    pub data: Vec<SportsnetEvent>,
}

/// One Sportsnet event. Timestamps are Unix seconds; up to three
/// broadcaster slots may be filled, the rest are null or empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SportsnetEvent {
    pub event_name: String,
    #[serde(default)]
    pub event_duration: f64,
    pub start_time_utc: i64,
    pub end_time_utc: i64,
    #[serde(default)]
    pub primary_broadcaster: Option<String>,
    #[serde(default)]
    pub secondary_broadcaster: Option<String>,
    #[serde(default)]
    pub tertiary_broadcaster: Option<String>,
}

/// OneSoccer's page-content response. The schedule is not a first-class
/// resource; it rides along inside a CMS page as one entry among several,
/// so most fields here are optional and only the entry that actually holds
/// the schedule rail carries a `list`.
#[derive(Debug, Clone, Deserialize)]
pub struct OneSoccerPage {
    #[serde(default)]
    pub entries: Vec<OneSoccerEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OneSoccerEntry {
    #[serde(default)]
    pub list: Option<OneSoccerList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OneSoccerList {
    #[serde(default)]
    pub items: Vec<OneSoccerItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OneSoccerItem {
    pub title: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(rename = "eventStartDate")]
    pub event_start_date: String,
    #[serde(rename = "eventEndDate")]
    pub event_end_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().expect("valid RFC 3339 instant")
    }

    #[test]
    fn test_broadcast_key_ignores_channel_and_duration() {
        let a = Event {
            name: "NHL on TSN".to_string(),
            duration: 10800.0,
            start_time: instant("2025-01-15T00:00:00Z"),
            end_time: instant("2025-01-15T03:00:00Z"),
            channel: "TSN1".to_string(),
        };
        let b = Event {
            duration: 0.0,
            channel: "TSN4".to_string(),
            ..a.clone()
        };
        assert_eq!(a.broadcast_key(), b.broadcast_key());
    }

    #[test]
    fn test_tsn_item_deserializes_from_upstream_shape() {
        let raw = r#"{
            "headlines": { "basic": "NHL Hockey: Leafs vs. Canadiens" },
            "channelName": "TSN4",
            "startTime": "2025-01-15T00:00:00Z",
            "endTime": "2025-01-15T03:00:00Z",
            "duration": 10800
        }"#;
        let item: TsnScheduleItem = serde_json::from_str(raw).expect("deserializes");
        assert_eq!(item.headlines.basic, "NHL Hockey: Leafs vs. Canadiens");
        assert_eq!(item.channel_name, "TSN4");
        assert_eq!(item.duration, 10800.0);
    }

    #[test]
    fn test_sportsnet_event_tolerates_missing_broadcasters() {
        let raw = r#"{
            "event_name": "NBA Basketball",
            "start_time_utc": 1736899200,
            "end_time_utc": 1736910000,
            "primary_broadcaster": "Sportsnet One"
        }"#;
        let event: SportsnetEvent = serde_json::from_str(raw).expect("deserializes");
        assert_eq!(event.primary_broadcaster.as_deref(), Some("Sportsnet One"));
        assert!(event.secondary_broadcaster.is_none());
        assert!(event.tertiary_broadcaster.is_none());
        assert_eq!(event.event_duration, 0.0);
        assert_eq!(
            Utc.timestamp_opt(event.start_time_utc, 0).single(),
            Some(instant("2025-01-15T00:00:00Z"))
        );
    }

    #[test]
    fn test_onesoccer_page_tolerates_entries_without_lists() {
        let raw = r#"{
            "entries": [
                { "title": "Hero banner" },
                { "list": { "items": [ {
                    "title": "CPL: Forge FC vs. Cavalry FC",
                    "duration": 7200,
                    "eventStartDate": "2025-01-15T00:00:00Z",
                    "eventEndDate": "2025-01-15T02:00:00Z"
                } ] } }
            ]
        }"#;
        let page: OneSoccerPage = serde_json::from_str(raw).expect("deserializes");
        assert!(page.entries[0].list.is_none());
        let list = page.entries[1].list.as_ref().expect("schedule rail");
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].title, "CPL: Forge FC vs. Cavalry FC");
    }
}
