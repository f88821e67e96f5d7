//! Domain types shared across the sync pipeline.
//!
//! Source-side types mirror the Toggl Track wire format and are
//! deserialized from it directly. Target-side types describe the Sloneek
//! planning domain and are produced by mapping.

use serde::Deserialize;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A time entry fetched from Toggl Track.
///
/// `stop` is `None` while the entry is still running; such entries
/// cannot be rounded or mapped.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeEntry {
    pub id: i64,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub task_id: Option<i64>,
    pub start: Timestamp,
    #[serde(default)]
    pub stop: Option<Timestamp>,
    /// Duration in seconds; negative for a running entry.
    pub duration: i64,
    #[serde(default)]
    pub description: Option<String>,
}

/// A Toggl project. Reference data, fetched once per run.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

/// A bookable Sloneek activity.
///
/// `id` is the *user planning event* UUID. The planning event underneath
/// is shared between users; the user planning event is what a scheduled
/// event must reference.
#[derive(Debug, Clone)]
pub struct Activity {
    pub id: String,
    pub name: String,
}

/// A Sloneek planning category (optional secondary classification).
#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A time entry resolved against the Sloneek catalogs, ready for upload.
///
/// Produced only by successful mapping, one per source entry, and
/// discarded at the end of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEntry {
    pub activity_id: String,
    pub category_id: Option<String>,
    pub since: Timestamp,
    pub until: Timestamp,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_entry_deserializes_from_wire_format() {
        let json = r#"{
            "id": 3544298808,
            "project_id": 201234567,
            "task_id": null,
            "start": "2024-08-01T09:01:00+00:00",
            "stop": "2024-08-01T10:12:00+00:00",
            "duration": 4260,
            "description": "catalog import"
        }"#;

        let entry: TimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 3544298808);
        assert_eq!(entry.project_id, Some(201234567));
        assert_eq!(entry.task_id, None);
        assert_eq!(entry.duration, 4260);
        assert_eq!(entry.description.as_deref(), Some("catalog import"));
        assert!(entry.stop.is_some());
    }

    #[test]
    fn running_entry_deserializes_without_stop() {
        // Toggl omits `stop` and reports a negative duration while the
        // entry is still being tracked.
        let json = r#"{
            "id": 1,
            "start": "2024-08-01T09:00:00+00:00",
            "duration": -1722502800
        }"#;

        let entry: TimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.stop, None);
        assert_eq!(entry.project_id, None);
        assert_eq!(entry.description, None);
    }

    #[test]
    fn project_deserializes_from_wire_format() {
        let json = r#"{"id": 201234567, "name": "Proteus", "active": true}"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, 201234567);
        assert_eq!(project.name, "Proteus");
    }
}
