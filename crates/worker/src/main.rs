use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timesync_pipeline::{SyncOptions, SyncOutcome};
use timesync_sloneek::api::SloneekApi;
use timesync_toggl::api::TogglApi;

mod config;

/// Sync Toggl Track time entries into Sloneek scheduled events.
#[derive(Parser)]
#[command(name = "timesync")]
#[command(version)]
struct Cli {
    /// Bearer token obtained after logging in to the Sloneek app.
    #[arg(long)]
    bearer: String,

    /// First day of the range to sync (inclusive), e.g. 2024-08-01.
    #[arg(long)]
    since: NaiveDate,

    /// End of the range to sync, passed to Toggl as end_date.
    #[arg(long)]
    until: NaiveDate,

    /// Upload the mapped entries to Sloneek instead of only reporting.
    #[arg(long)]
    submit: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = config::WorkerConfig::from_env()?;

    let toggl = TogglApi::new(config.toggl_api_url, config.toggl_api_token);
    let sloneek = SloneekApi::new(config.sloneek_api_url, cli.bearer);

    let options = SyncOptions {
        since: cli.since,
        until: cli.until,
        submit: cli.submit,
    };

    let outcome = timesync_pipeline::run(&toggl, &sloneek, &options).await?;
    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &SyncOutcome) {
    if outcome.submitted > 0 {
        println!("Uploaded {} entries to Sloneek.", outcome.submitted);
    }

    if outcome.totals.is_empty() {
        println!("No mappable time entries in the selected range.");
    } else {
        println!("Hours per activity:");
        for total in &outcome.totals {
            println!("  {:<30} {:>7.2}", total.name, total.hours);
        }
    }

    if !outcome.failures.is_empty() {
        println!("Skipped {} entries:", outcome.failures.len());
        for failure in &outcome.failures {
            let description = failure.description.as_deref().unwrap_or("<no description>");
            println!("  #{} ({}): {}", failure.entry_id, description, failure.error);
        }
    }
}
