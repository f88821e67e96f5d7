//! Sequential Toggl → Sloneek sync pipeline.
//!
//! Fetches everything up front, plans locally (rounding + mapping over
//! the fetched catalogs), and only talks to Sloneek again for
//! submission. The run is strictly sequential: one fetch after another,
//! one upload after another, no retries anywhere.

use chrono::NaiveDate;
use timesync_core::error::CoreError;
use timesync_core::mapping::map_entry;
use timesync_core::report::{summarize, ActivityTotal};
use timesync_core::rounding::round_entry;
use timesync_core::types::{Activity, Category, PlannedEntry, Project, TimeEntry};
use timesync_sloneek::api::{SloneekApi, SloneekApiError};
use timesync_toggl::api::{TogglApi, TogglApiError};

/// Parameters for one sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// First day of the range (inclusive).
    pub since: NaiveDate,
    /// End of the range, passed through as Toggl's `end_date`.
    /// Date-only granularity.
    pub until: NaiveDate,
    /// Upload the planned entries instead of only reporting them.
    pub submit: bool,
}

/// A source entry the plan could not place, with the reason.
#[derive(Debug)]
pub struct EntryFailure {
    pub entry_id: i64,
    pub description: Option<String>,
    pub error: CoreError,
}

/// Result of the planning step over one batch of fetched data.
#[derive(Debug)]
pub struct SyncPlan {
    /// Entries resolved against the catalogs, in source order.
    pub planned: Vec<PlannedEntry>,
    /// Entries that could not be rounded or mapped, in source order.
    pub failures: Vec<EntryFailure>,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct SyncOutcome {
    /// Hours per activity over the successfully planned entries.
    pub totals: Vec<ActivityTotal>,
    /// Entries skipped in report-only mode (always empty after a
    /// submission run, which refuses to start with a dirty plan).
    pub failures: Vec<EntryFailure>,
    /// Number of entries uploaded to Sloneek.
    pub submitted: usize,
}

/// Errors that abort a sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Toggl request failed: {0}")]
    Toggl(#[from] TogglApiError),

    #[error("Sloneek request failed: {0}")]
    Sloneek(#[from] SloneekApiError),

    /// In submit mode any unmappable entry aborts the run before
    /// anything is uploaded.
    #[error("Cannot map time entry {entry_id}: {source}")]
    Mapping { entry_id: i64, source: CoreError },

    /// The report referenced an identifier missing from both catalogs.
    #[error("Report aggregation failed: {0}")]
    Report(#[from] CoreError),
}

/// Round and map every fetched entry, in order.
///
/// Pure with respect to I/O: operates only on the already-fetched
/// collections. A failure does not stop the loop; the caller decides
/// what failures mean for the run.
pub fn plan_entries(
    entries: Vec<TimeEntry>,
    projects: &[Project],
    activities: &[Activity],
    categories: &[Category],
) -> SyncPlan {
    let mut plan = SyncPlan {
        planned: Vec::with_capacity(entries.len()),
        failures: Vec::new(),
    };

    for mut entry in entries {
        let result = round_entry(&mut entry)
            .and_then(|()| map_entry(&entry, projects, activities, categories));

        match result {
            Ok(planned) => plan.planned.push(planned),
            Err(error) => {
                tracing::warn!(entry_id = entry.id, %error, "Cannot plan time entry");
                plan.failures.push(EntryFailure {
                    entry_id: entry.id,
                    description: entry.description.clone(),
                    error,
                });
            }
        }
    }

    plan
}

/// Run a full sync: fetch, plan, optionally submit, aggregate.
///
/// Submission is all-or-nothing at the planning stage: a single
/// unmappable entry aborts the run before anything is uploaded, because
/// Sloneek has no dedup key and a rerun after a partial upload would
/// duplicate entries. A failing upload still stops the loop mid-way;
/// entries already uploaded stay uploaded.
pub async fn run(
    toggl: &TogglApi,
    sloneek: &SloneekApi,
    options: &SyncOptions,
) -> Result<SyncOutcome, SyncError> {
    let entries = toggl.get_time_entries(options.since, options.until).await?;
    let projects = toggl.get_projects().await?;
    let activities = sloneek.get_activities().await?;
    let categories = sloneek.get_categories().await?;

    tracing::info!(
        entries = entries.len(),
        projects = projects.len(),
        activities = activities.len(),
        categories = categories.len(),
        "Fetched source entries and catalogs"
    );

    let SyncPlan { planned, failures } = plan_entries(entries, &projects, &activities, &categories);

    if !options.submit {
        let totals = summarize(&planned, &activities, &categories)?;
        return Ok(SyncOutcome {
            totals,
            failures,
            submitted: 0,
        });
    }

    if let Some(failure) = failures.into_iter().next() {
        return Err(SyncError::Mapping {
            entry_id: failure.entry_id,
            source: failure.error,
        });
    }

    let mut submitted = 0;
    for entry in &planned {
        if let Err(error) = sloneek.save_entry(entry).await {
            tracing::error!(submitted, %error, "Submission failed, aborting remaining uploads");
            return Err(error.into());
        }
        submitted += 1;
    }
    tracing::info!(submitted, "Uploaded all planned entries");

    let totals = summarize(&planned, &activities, &categories)?;
    Ok(SyncOutcome {
        totals,
        failures: Vec::new(),
        submitted,
    })
}
