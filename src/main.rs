// src/main.rs
use chrono::Utc;
use clap::Parser;
use onair::cli::Args;
use onair::config::Config;
use onair::data_fetcher::fetch_live_events;
use onair::error::AppError;
use onair::logging::setup_logging;
use onair::teletext_ui::TeletextPage;
use std::io::stdout;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Handle configuration operations before any fetching
    if args.list_config {
        Config::display().await?;
        return Ok(());
    }

    if args.new_log_file_path.is_some() || args.clear_log_file_path {
        let mut config = Config::load().await.unwrap_or_default();

        if let Some(new_log_path) = args.new_log_file_path {
            config.log_file_path = Some(new_log_path);
        } else if args.clear_log_file_path {
            config.log_file_path = None;
            println!("Custom log file path cleared. Using default location.");
        }

        config.save().await?;
        println!("Config updated successfully!");
        return Ok(());
    }

    let (log_file_path, _guard) = setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    let config = Config::load().await?;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .user_agent(onair::constants::USER_AGENT)
        .build()?;

    // One fresh run per invocation; a failing source degrades to a warning
    // row instead of failing the whole listing.
    let listings = fetch_live_events(&client, &config, Utc::now()).await;

    let mut page = TeletextPage::new("ON AIR NOW".to_string(), args.plain);
    if listings.events.is_empty() && listings.errors.is_empty() {
        page.add_message("Nothing live right now");
    }
    for event in &listings.events {
        page.add_listing(event);
    }
    for error in &listings.errors {
        page.add_warning(error);
    }

    page.render_buffered(&mut stdout())?;
    println!();

    Ok(())
}
