//! Per-activity hour totals for the end-of-run report.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::{Activity, Category, PlannedEntry};

/// Seconds per hour (3600.0).
const SECS_PER_HOUR: f64 = 3600.0;

/// Total booked hours for one Sloneek identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityTotal {
    pub id: String,
    pub name: String,
    pub hours: f64,
}

/// Duration of a planned entry in fractional hours.
pub fn entry_hours(entry: &PlannedEntry) -> f64 {
    (entry.until - entry.since).num_seconds() as f64 / SECS_PER_HOUR
}

/// Sum hours per activity identifier and resolve display names.
///
/// Entries sharing an activity are merged into one bucket even when
/// their categories differ. Names resolve against the category catalog
/// first, falling back to the activity catalog; an identifier found in
/// neither means mapping emitted something it never should have, which
/// is an invariant violation rather than a user error.
///
/// Rows are sorted by display name so the report output is stable.
pub fn summarize(
    entries: &[PlannedEntry],
    activities: &[Activity],
    categories: &[Category],
) -> Result<Vec<ActivityTotal>, CoreError> {
    let mut hours_by_id: HashMap<&str, f64> = HashMap::new();
    for entry in entries {
        *hours_by_id.entry(entry.activity_id.as_str()).or_insert(0.0) += entry_hours(entry);
    }

    let mut totals = Vec::with_capacity(hours_by_id.len());
    for (id, hours) in hours_by_id {
        let name = resolve_name(id, activities, categories)
            .ok_or_else(|| CoreError::UnknownIdentifier { id: id.to_string() })?;
        totals.push(ActivityTotal {
            id: id.to_string(),
            name: name.to_string(),
            hours,
        });
    }

    totals.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(totals)
}

/// Resolve an identifier to a display name, categories first.
fn resolve_name<'a>(
    id: &str,
    activities: &'a [Activity],
    categories: &'a [Category],
) -> Option<&'a str> {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
        .or_else(|| {
            activities
                .iter()
                .find(|a| a.id == id)
                .map(|a| a.name.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;
    use assert_matches::assert_matches;

    fn ts(value: &str) -> Timestamp {
        chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    fn planned(activity_id: &str, since: &str, until: &str) -> PlannedEntry {
        PlannedEntry {
            activity_id: activity_id.into(),
            category_id: None,
            since: ts(since),
            until: ts(until),
            note: None,
        }
    }

    fn activities() -> Vec<Activity> {
        vec![
            Activity {
                id: "act-1".into(),
                name: "Vývoj".into(),
            },
            Activity {
                id: "act-2".into(),
                name: "Hiring".into(),
            },
        ]
    }

    fn categories() -> Vec<Category> {
        vec![Category {
            id: "cat-1".into(),
            name: "Proteus".into(),
        }]
    }

    #[test]
    fn quarter_hour_entry_is_a_quarter_of_an_hour() {
        let entry = planned("act-1", "2024-01-01 10:00:00", "2024-01-01 10:15:00");
        assert_eq!(entry_hours(&entry), 0.25);
    }

    #[test]
    fn sums_hours_per_activity() {
        let entries = [
            planned("act-1", "2024-01-01 10:00:00", "2024-01-01 11:00:00"),
            planned("act-1", "2024-01-01 12:00:00", "2024-01-01 13:15:00"),
        ];

        let totals = summarize(&entries, &activities(), &categories()).unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].id, "act-1");
        assert_eq!(totals[0].name, "Vývoj");
        assert_eq!(totals[0].hours, 2.25);
    }

    #[test]
    fn different_categories_share_one_activity_bucket() {
        let mut first = planned("act-1", "2024-01-01 10:00:00", "2024-01-01 11:00:00");
        first.category_id = Some("cat-1".into());
        let second = planned("act-1", "2024-01-01 12:00:00", "2024-01-01 13:00:00");

        let totals = summarize(&[first, second], &activities(), &categories()).unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].hours, 2.0);
    }

    #[test]
    fn rows_are_sorted_by_display_name() {
        let entries = [
            planned("act-1", "2024-01-01 10:00:00", "2024-01-01 11:00:00"),
            planned("act-2", "2024-01-01 12:00:00", "2024-01-01 13:00:00"),
        ];

        let totals = summarize(&entries, &activities(), &categories()).unwrap();
        let names: Vec<&str> = totals.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Hiring", "Vývoj"]);
    }

    #[test]
    fn categories_win_name_resolution() {
        // "cat-1" is also registered as an activity id here; the
        // category catalog is consulted first.
        let mut activities = activities();
        activities.push(Activity {
            id: "cat-1".into(),
            name: "Shadowed".into(),
        });

        let entries = [planned("cat-1", "2024-01-01 10:00:00", "2024-01-01 11:00:00")];
        let totals = summarize(&entries, &activities, &categories()).unwrap();
        assert_eq!(totals[0].name, "Proteus");
    }

    #[test]
    fn unknown_identifier_is_an_invariant_violation() {
        let entries = [planned("ghost", "2024-01-01 10:00:00", "2024-01-01 11:00:00")];

        assert_matches!(
            summarize(&entries, &activities(), &categories()),
            Err(CoreError::UnknownIdentifier { id }) if id == "ghost"
        );
    }

    #[test]
    fn zero_duration_entry_contributes_nothing() {
        let entries = [
            planned("act-1", "2024-01-01 10:00:00", "2024-01-01 10:00:00"),
            planned("act-1", "2024-01-01 11:00:00", "2024-01-01 12:00:00"),
        ];

        let totals = summarize(&entries, &activities(), &categories()).unwrap();
        assert_eq!(totals[0].hours, 1.0);
    }
}
