//! What's live right now on Canadian sports TV
//!
//! This library aggregates the public schedule APIs of TSN, Sportsnet and
//! OneSoccer into one deduplicated, display-ordered list of broadcasts that
//! are on the air at a given instant.
//!
//! # Examples
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use onair::config::Config;
//! use onair::data_fetcher::fetch_live_events;
//! use onair::teletext_ui::TeletextPage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load().await?;
//!     let client = reqwest::Client::new();
//!
//!     let listings = fetch_live_events(&client, &config, Utc::now()).await;
//!
//!     let mut page = TeletextPage::new("ON AIR NOW".to_string(), false);
//!     for event in &listings.events {
//!         page.add_listing(event);
//!     }
//!     for error in &listings.errors {
//!         page.add_warning(error);
//!     }
//!
//!     let mut stdout = std::io::stdout();
//!     page.render_buffered(&mut stdout)?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod logging;
pub mod teletext_ui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::fetch_live_events;
pub use data_fetcher::models::{ErrorRecord, Event, LiveListings};
pub use error::AppError;
pub use teletext_ui::TeletextPage;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
