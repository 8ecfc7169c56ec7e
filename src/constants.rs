//! Shared constants for upstream endpoints, the Sportsnet fetch window, and
//! display ordering policy.

/// TSN's public schedule endpoint. Returns a JSON array of scheduled
/// broadcasts with headline, channel name and ISO timestamps.
pub const TSN_SCHEDULE_URL: &str =
    "https://www.tsn.ca/pf/api/v3/content/fetch/sports-schedule-custom";

/// Sportsnet's schedule-admin events endpoint. Takes `day_start`/`day_end`
/// Unix-second query parameters.
pub const SPORTSNET_EVENTS_URL: &str = "https://schedule-admin.sportsnet.ca/v1/events";

/// OneSoccer's page-content endpoint. Queried with `path=/`; the live
/// schedule rail is buried inside the page entries.
pub const ONESOCCER_PAGE_URL: &str = "https://www.onesoccer.ca/api/v1/page-content";

/// Half-width of the Sportsnet fetch window in seconds. The window is
/// `[now - 8h, now + 8h]`, wide enough that anything currently on the air
/// falls inside it regardless of event length.
pub const SPORTSNET_WINDOW_SECONDS: i64 = 8 * 60 * 60;

/// Channel name prefixes that are pushed to the bottom of the listing.
/// These are the streaming overflow feeds; the broadcast channels are what
/// people scan for first. Matching is literal and case-sensitive.
pub const LOW_PRIORITY_CHANNEL_PREFIXES: [&str; 2] = ["SN NOW+", "TSN+"];

/// Default HTTP timeout in seconds for upstream requests
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// User agent sent on all upstream requests
pub const USER_AGENT: &str = concat!("onair/", env!("CARGO_PKG_VERSION"));
