//! Pure pipeline stages between fetch and display: liveness filtering,
//! duplicate merging and the display sort. Everything here takes `now` as a
//! parameter instead of reading the clock, so the stages are deterministic
//! under test.

use crate::constants::LOW_PRIORITY_CHANNEL_PREFIXES;
use crate::data_fetcher::models::Event;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Returns true when the event's time window contains `now`. Both bounds
/// are inclusive: a broadcast starting or ending at exactly `now` is live.
pub fn is_live(event: &Event, now: DateTime<Utc>) -> bool {
    event.start_time <= now && now <= event.end_time
}

/// Keeps only the events that are live at `now`, preserving input order.
pub fn filter_live(events: Vec<Event>, now: DateTime<Utc>) -> Vec<Event> {
    events.into_iter().filter(|e| is_live(e, now)).collect()
}

fn is_low_priority(channel: &str) -> bool {
    LOW_PRIORITY_CHANNEL_PREFIXES
        .iter()
        .any(|prefix| channel.starts_with(prefix))
}

/// The one channel ordering used everywhere: overflow feeds (`SN NOW+`,
/// `TSN+` prefixes) sort after everything else, then plain lexicographic
/// comparison within a tier.
///
/// Both the channel join inside [`merge_duplicates`] and the event sort in
/// [`sort_events`] go through this function; keeping a single comparator is
/// what guarantees the merged channel string and the listing order can't
/// drift apart.
pub fn compare_channels(a: &str, b: &str) -> Ordering {
    is_low_priority(a)
        .cmp(&is_low_priority(b))
        .then_with(|| a.cmp(b))
}

/// Coalesces events describing the same broadcast (identical name, start
/// and end) into one entry whose `channel` is the comparator-sorted,
/// comma-joined list of all contributing channels.
///
/// Channel values that are already joined lists (Sportsnet reports up to
/// three broadcasters as one string) are treated as atomic tokens; merging
/// never re-splits them. An event with no duplicates still has its channel
/// rebuilt through the single-element join, which makes the whole operation
/// idempotent. Output order follows first appearance of each broadcast and
/// is not significant; [`sort_events`] is authoritative.
pub fn merge_duplicates(events: Vec<Event>) -> Vec<Event> {
    let mut representatives: Vec<Event> = Vec::new();
    let mut channels: Vec<Vec<String>> = Vec::new();
    let mut index: HashMap<(String, DateTime<Utc>, DateTime<Utc>), usize> = HashMap::new();

    for event in events {
        match index.get(&event.broadcast_key()) {
            Some(&slot) => channels[slot].push(event.channel),
            None => {
                index.insert(event.broadcast_key(), representatives.len());
                channels.push(vec![event.channel.clone()]);
                representatives.push(event);
            }
        }
    }

    representatives
        .into_iter()
        .zip(channels)
        .map(|(mut event, mut names)| {
            names.sort_by(|a, b| compare_channels(a, b));
            event.channel = names.join(", ");
            event
        })
        .collect()
}

/// Orders events for display by their channel string, overflow feeds last.
/// The sort is stable, so events with equal channels keep their relative
/// input order.
pub fn sort_events(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by(|a, b| compare_channels(&a.channel, &b.channel));
    events
}
