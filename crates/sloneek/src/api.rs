//! REST API client for the Sloneek planning module.
//!
//! Wraps the user-planning-event and category option endpoints plus
//! scheduled-event creation using [`reqwest`]. Sloneek wraps every
//! payload in a `{ message, status_code, data }` envelope; only `data`
//! is consumed here.

use serde::{Deserialize, Serialize};
use timesync_core::types::{Activity, Category, PlannedEntry, Timestamp};

/// HTTP client for a Sloneek tenant.
///
/// Authenticates with the bearer token of a logged-in user session.
pub struct SloneekApi {
    client: reqwest::Client,
    api_url: String,
    bearer_token: String,
}

/// Envelope wrapping every Sloneek response payload.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// One bookable option from the user-planning-events endpoint.
#[derive(Debug, Deserialize)]
struct UserPlanningEvent {
    uuid: String,
    planning_event: PlanningEvent,
}

/// The planning event underneath a user option. Its `uuid` is shared
/// between users and must NOT be used for booking.
#[derive(Debug, Deserialize)]
struct PlanningEvent {
    name: String,
}

/// A category option as returned by the categories endpoint.
#[derive(Debug, Deserialize)]
struct CategoryOption {
    uuid: String,
    name: String,
}

/// Request body for `POST /v2/module-planning/scheduled-events`.
#[derive(Debug, Serialize)]
struct SaveEntryRequest<'a> {
    user_planning_event_uuid: &'a str,
    planning_categories: Vec<&'a str>,
    started_at: Timestamp,
    ended_at: Timestamp,
    start_time: Timestamp,
    end_time: Timestamp,
    note: &'a str,
    is_automatically_approve: bool,
}

impl<'a> SaveEntryRequest<'a> {
    fn from_entry(entry: &'a PlannedEntry) -> Self {
        Self {
            user_planning_event_uuid: &entry.activity_id,
            planning_categories: entry.category_id.as_deref().into_iter().collect(),
            started_at: entry.since,
            ended_at: entry.until,
            start_time: entry.since,
            end_time: entry.until,
            note: entry.note.as_deref().unwrap_or(""),
            // accepted by the API but has no visible effect
            is_automatically_approve: false,
        }
    }
}

/// Errors from the Sloneek REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum SloneekApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Sloneek returned a non-2xx status code.
    #[error("Sloneek API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl SloneekApi {
    /// Create a new API client.
    ///
    /// * `api_url`      - Base URL, e.g. `https://api2.sloneek.com`.
    /// * `bearer_token` - JWT obtained after logging in to the Sloneek app.
    pub fn new(api_url: String, bearer_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            bearer_token,
        }
    }

    /// Fetch the bookable activities for the authenticated user.
    ///
    /// The returned IDs are the *user planning event* UUIDs: the
    /// planning event underneath is shared between users, while the user
    /// planning event is what a scheduled event must reference.
    pub async fn get_activities(&self) -> Result<Vec<Activity>, SloneekApiError> {
        tracing::info!("Looking up Sloneek activities");
        let response = self
            .client
            .get(format!(
                "{}/v2/module-planning/scheduled-events/options/user-planning-events",
                self.api_url
            ))
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let envelope: Envelope<Vec<UserPlanningEvent>> = Self::parse_response(response).await?;
        let activities: Vec<Activity> = envelope
            .data
            .into_iter()
            .map(|item| Activity {
                id: item.uuid,
                name: item.planning_event.name,
            })
            .collect();

        tracing::debug!(count = activities.len(), "Got Sloneek activities");
        Ok(activities)
    }

    /// Fetch the planning categories.
    pub async fn get_categories(&self) -> Result<Vec<Category>, SloneekApiError> {
        tracing::info!("Looking up Sloneek categories");
        let response = self
            .client
            .get(format!(
                "{}/v2/module-planning/scheduled-events/options/categories",
                self.api_url
            ))
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let envelope: Envelope<Vec<CategoryOption>> = Self::parse_response(response).await?;
        let categories: Vec<Category> = envelope
            .data
            .into_iter()
            .map(|item| Category {
                id: item.uuid,
                name: item.name,
            })
            .collect();

        tracing::debug!(count = categories.len(), "Got Sloneek categories");
        Ok(categories)
    }

    /// Create a scheduled event from a planned entry.
    ///
    /// One `POST /v2/module-planning/scheduled-events` call per entry;
    /// there is no batch endpoint.
    pub async fn save_entry(&self, entry: &PlannedEntry) -> Result<(), SloneekApiError> {
        tracing::info!(
            activity_id = %entry.activity_id,
            since = %entry.since,
            until = %entry.until,
            "Saving Sloneek time entry"
        );

        let response = self
            .client
            .post(format!(
                "{}/v2/module-planning/scheduled-events",
                self.api_url
            ))
            .bearer_auth(&self.bearer_token)
            .json(&SaveEntryRequest::from_entry(entry))
            .send()
            .await?;

        Self::check_status(response).await?;
        tracing::info!("Time entry saved");
        Ok(())
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`SloneekApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SloneekApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SloneekApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SloneekApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), SloneekApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> Timestamp {
        chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    #[test]
    fn activities_use_the_user_planning_event_uuid() {
        let json = r#"{
            "message": "ok",
            "status_code": 200,
            "data": [
                {
                    "uuid": "upe-53016fa7",
                    "planning_event": {"uuid": "pe-shared-1", "name": "Vývoj"}
                },
                {
                    "uuid": "upe-8c2d11aa",
                    "planning_event": {"uuid": "pe-shared-2", "name": "Hiring"}
                }
            ]
        }"#;

        let envelope: Envelope<Vec<UserPlanningEvent>> = serde_json::from_str(json).unwrap();
        let first = &envelope.data[0];
        assert_eq!(first.uuid, "upe-53016fa7");
        assert_eq!(first.planning_event.name, "Vývoj");
    }

    #[test]
    fn categories_parse_from_the_envelope() {
        let json = r#"{
            "message": "ok",
            "status_code": 200,
            "data": [{"uuid": "6adf0954", "name": "Proteus"}]
        }"#;

        let envelope: Envelope<Vec<CategoryOption>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data[0].uuid, "6adf0954");
        assert_eq!(envelope.data[0].name, "Proteus");
    }

    #[test]
    fn save_request_carries_the_documented_fields() {
        let entry = PlannedEntry {
            activity_id: "upe-1".into(),
            category_id: Some("cat-1".into()),
            since: ts("2024-08-05 09:00:00"),
            until: ts("2024-08-05 09:30:00"),
            note: Some("standup".into()),
        };

        let value = serde_json::to_value(SaveEntryRequest::from_entry(&entry)).unwrap();
        assert_eq!(value["user_planning_event_uuid"], "upe-1");
        assert_eq!(value["planning_categories"][0], "cat-1");
        assert_eq!(value["started_at"], "2024-08-05T09:00:00Z");
        assert_eq!(value["ended_at"], "2024-08-05T09:30:00Z");
        assert_eq!(value["start_time"], "2024-08-05T09:00:00Z");
        assert_eq!(value["end_time"], "2024-08-05T09:30:00Z");
        assert_eq!(value["note"], "standup");
        assert_eq!(value["is_automatically_approve"], false);
    }

    #[test]
    fn save_request_without_category_sends_an_empty_list() {
        let entry = PlannedEntry {
            activity_id: "upe-1".into(),
            category_id: None,
            since: ts("2024-08-05 09:00:00"),
            until: ts("2024-08-05 09:30:00"),
            note: None,
        };

        let value = serde_json::to_value(SaveEntryRequest::from_entry(&entry)).unwrap();
        assert_eq!(value["planning_categories"].as_array().unwrap().len(), 0);
        assert_eq!(value["note"], "");
    }
}
