//! Translation of Toggl entries into the Sloneek planning domain.
//!
//! The project → activity/category table is compiled in; identifier
//! resolution runs against the catalogs fetched from both services at
//! the start of a run.

use crate::error::CoreError;
use crate::types::{Activity, Category, PlannedEntry, Project, TimeEntry};

/// Target names a source project translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityMapping {
    /// Sloneek activity display name.
    pub activity: &'static str,
    /// Sloneek category display name, if the activity is subdivided.
    pub category: Option<&'static str>,
}

/// Map a Toggl project name to its Sloneek activity/category names.
///
/// Exact, case-sensitive match. `None` means the project is not covered
/// by the table; the caller decides whether that is fatal.
pub fn map_project_name(project: &str) -> Option<ActivityMapping> {
    let (activity, category) = match project {
        "Proteus" => ("Vývoj", Some("Proteus")),
        "Copilot" => ("Vývoj", Some("Proteus")),
        "Portál" => ("Vývoj", Some("Portál")),
        "Akvizice" => ("Vývoj", Some("Akviziční formulář")),
        "Flexi" => ("Vývoj", Some("Flexi")),
        "Interní" => ("Vývoj", Some("Iternal job")),
        "Hiring" => ("Hiring", None),
        "Admin & Meetings" => ("Meeting", None),
        _ => return None,
    };

    Some(ActivityMapping { activity, category })
}

/// Resolve one rounded Toggl entry against the fetched catalogs.
///
/// Walks the chain entry → project → mapped names → catalog identifiers
/// and fails with the exact step that broke. Every failure is terminal
/// for this entry; the caller decides whether to abort the whole run or
/// skip it. Name lookups take the first match; catalog names are assumed
/// unique.
pub fn map_entry(
    entry: &TimeEntry,
    projects: &[Project],
    activities: &[Activity],
    categories: &[Category],
) -> Result<PlannedEntry, CoreError> {
    let project = entry
        .project_id
        .and_then(|id| projects.iter().find(|p| p.id == id))
        .ok_or(CoreError::ProjectNotFound { entry_id: entry.id })?;

    let mapping =
        map_project_name(&project.name).ok_or_else(|| CoreError::ActivityMappingNotFound {
            project: project.name.clone(),
        })?;

    let activity = activities
        .iter()
        .find(|a| a.name == mapping.activity)
        .ok_or_else(|| CoreError::ActivityNotFound {
            name: mapping.activity.to_string(),
        })?;

    let category_id = match mapping.category {
        Some(name) => {
            let category = categories.iter().find(|c| c.name == name).ok_or_else(|| {
                CoreError::CategoryNotFound {
                    name: name.to_string(),
                }
            })?;
            Some(category.id.clone())
        }
        None => None,
    };

    let until = entry.stop.ok_or(CoreError::InvalidEntry {
        entry_id: entry.id,
        reason: "entry has no stop time",
    })?;

    let note = entry
        .description
        .clone()
        .filter(|description| !description.is_empty());

    Ok(PlannedEntry {
        activity_id: activity.id.clone(),
        category_id,
        since: entry.start,
        until,
        note,
    })
}
