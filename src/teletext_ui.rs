// src/teletext_ui.rs - teletext-style rendering of the live listings

use crate::data_fetcher::models::{ErrorRecord, Event};
use chrono::{DateTime, Local, Utc};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::Write;

// Constants for teletext appearance
const HEADER_BG: Color = Color::Blue;
const HEADER_FG: Color = Color::White;
const NAME_FG: Color = Color::White;
const CHANNEL_FG: Color = Color::Green;
const TIME_FG: Color = Color::Yellow;
const WARNING_FG: Color = Color::Red;
const PAGE_WIDTH: usize = 56;

/// One rendered page of live listings. Presentation only: events arrive
/// already filtered, merged and sorted, and `channel` is treated as an
/// opaque display string that may hold several comma-joined names.
pub struct TeletextPage {
    title: String,
    rows: Vec<TeletextRow>,
    plain: bool,
}

pub enum TeletextRow {
    Listing {
        name: String,
        channel: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    },
    Warning(String),
}

impl TeletextPage {
    pub fn new(title: String, plain: bool) -> Self {
        TeletextPage {
            title,
            rows: Vec::new(),
            plain,
        }
    }

    pub fn add_listing(&mut self, event: &Event) {
        self.rows.push(TeletextRow::Listing {
            name: event.name.clone(),
            channel: event.channel.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
        });
    }

    /// Adds a per-source warning row. Warnings never displace listings;
    /// they render after them.
    pub fn add_warning(&mut self, record: &ErrorRecord) {
        self.rows.push(TeletextRow::Warning(format!(
            "{}: {}",
            record.source, record.message
        )));
    }

    pub fn add_message(&mut self, message: &str) {
        self.rows.push(TeletextRow::Warning(message.to_string()));
    }

    /// Returns whether the page contains a warning with the given text.
    /// Used by tests to verify error surfacing without rendering.
    pub fn has_warning(&self, text: &str) -> bool {
        self.rows.iter().any(|row| match row {
            TeletextRow::Warning(msg) => msg.contains(text),
            _ => false,
        })
    }

    /// Number of listing rows on the page
    pub fn listing_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, TeletextRow::Listing { .. }))
            .count()
    }

    /// Renders the whole page into `writer` in one buffered pass.
    pub fn render_buffered<W: Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        self.render_header(writer)?;
        for row in &self.rows {
            match row {
                TeletextRow::Listing {
                    name,
                    channel,
                    start_time,
                    end_time,
                } => self.render_listing(writer, name, channel, *start_time, *end_time)?,
                TeletextRow::Warning(message) => self.render_warning(writer, message)?,
            }
        }
        writer.flush()
    }

    fn render_header<W: Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        if self.plain {
            writeln!(writer, "{}", self.title)?;
            writeln!(writer, "{}", "-".repeat(self.title.len()))?;
            return Ok(());
        }
        queue!(
            writer,
            SetBackgroundColor(HEADER_BG),
            SetForegroundColor(HEADER_FG),
            Print(format!("{:<PAGE_WIDTH$}", self.title)),
            ResetColor,
            Print("\n"),
        )
    }

    fn render_listing<W: Write>(
        &self,
        writer: &mut W,
        name: &str,
        channel: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<(), std::io::Error> {
        let window = format_time_window(start_time, end_time);
        if self.plain {
            writeln!(writer, "\n{name}")?;
            writeln!(writer, "  {channel}  {window}")?;
            return Ok(());
        }
        queue!(
            writer,
            Print("\n"),
            SetForegroundColor(NAME_FG),
            Print(name),
            Print("\n  "),
            SetForegroundColor(CHANNEL_FG),
            Print(channel),
            Print("  "),
            SetForegroundColor(TIME_FG),
            Print(window),
            ResetColor,
            Print("\n"),
        )
    }

    fn render_warning<W: Write>(&self, writer: &mut W, message: &str) -> Result<(), std::io::Error> {
        if self.plain {
            writeln!(writer, "\n! {message}")?;
            return Ok(());
        }
        queue!(
            writer,
            Print("\n"),
            SetForegroundColor(WARNING_FG),
            Print(format!("! {message}")),
            ResetColor,
            Print("\n"),
        )
    }
}

/// Formats an event's window as local wall-clock times, e.g. "7:00 PM - 10:00 PM"
fn format_time_window(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> String {
    let start = start_time.with_timezone(&Local);
    let end = end_time.with_timezone(&Local);
    format!("{} - {}", start.format("%-I:%M %p"), end.format("%-I:%M %p"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        Event {
            name: "NHL Hockey: Leafs vs. Canadiens".to_string(),
            duration: 10800.0,
            start_time: "2025-01-15T00:00:00Z".parse().unwrap(),
            end_time: "2025-01-15T03:00:00Z".parse().unwrap(),
            channel: "Sportsnet, TSN4".to_string(),
        }
    }

    #[test]
    fn test_plain_render_contains_name_channel_and_window() {
        let mut page = TeletextPage::new("ON AIR NOW".to_string(), true);
        page.add_listing(&sample_event());

        let mut buf = Vec::new();
        page.render_buffered(&mut buf).expect("renders");
        let text = String::from_utf8(buf).expect("utf8");

        assert!(text.contains("ON AIR NOW"));
        assert!(text.contains("NHL Hockey: Leafs vs. Canadiens"));
        // channel string is opaque, rendered exactly as merged
        assert!(text.contains("Sportsnet, TSN4"));
        assert!(text.contains(" - "));
    }

    #[test]
    fn test_warnings_render_after_listings() {
        let mut page = TeletextPage::new("ON AIR NOW".to_string(), true);
        page.add_listing(&sample_event());
        page.add_warning(&ErrorRecord {
            source: "OneSoccer",
            message: "API server error (503)".to_string(),
        });

        assert!(page.has_warning("OneSoccer"));
        assert_eq!(page.listing_count(), 1);

        let mut buf = Vec::new();
        page.render_buffered(&mut buf).expect("renders");
        let text = String::from_utf8(buf).expect("utf8");
        let listing_at = text.find("NHL Hockey").expect("listing present");
        let warning_at = text.find("! OneSoccer").expect("warning present");
        assert!(listing_at < warning_at);
    }

    #[test]
    fn test_colored_render_does_not_fail() {
        let mut page = TeletextPage::new("ON AIR NOW".to_string(), false);
        page.add_listing(&sample_event());
        page.add_message("Nothing live right now");

        let mut buf = Vec::new();
        page.render_buffered(&mut buf).expect("renders");
        assert!(!buf.is_empty());
    }
}
