//! REST API client for Toggl Track (API v9).
//!
//! Wraps the time-entry listing, workspace lookup, and project catalog
//! endpoints using [`reqwest`].

use chrono::NaiveDate;
use serde::Deserialize;
use timesync_core::types::{Project, TimeEntry};

/// HTTP client for the Toggl Track API.
///
/// Authenticates every request with HTTP basic auth using the account
/// API token (`<token>:api_token`).
pub struct TogglApi {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
}

/// Response returned by the Toggl `/me` endpoint, reduced to the one
/// field the sync needs.
#[derive(Debug, Deserialize)]
struct MeResponse {
    default_workspace_id: i64,
}

/// Errors from the Toggl REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum TogglApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Toggl rejected the API token (401/403).
    #[error("Toggl authentication failed ({status})")]
    Auth {
        /// HTTP status code.
        status: u16,
    },

    /// Toggl returned any other non-2xx status code.
    #[error("Toggl API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl TogglApi {
    /// Create a new API client.
    ///
    /// * `api_url`   - Base URL, e.g. `https://api.track.toggl.com/api/v9`.
    /// * `api_token` - Account API token from the Toggl profile page.
    pub fn new(api_url: String, api_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_token,
        }
    }

    /// Fetch the authenticated user's time entries within a date range.
    ///
    /// Sends `GET /me/time_entries?start_date=...&end_date=...` with
    /// date-only granularity, as Toggl expects.
    pub async fn get_time_entries(
        &self,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<TimeEntry>, TogglApiError> {
        tracing::info!(%since, %until, "Looking up Toggl time entries");
        let response = self
            .get(format!(
                "{}/me/time_entries?start_date={}&end_date={}",
                self.api_url, since, until
            ))
            .await?;

        let entries: Vec<TimeEntry> = Self::parse_response(response).await?;
        tracing::debug!(count = entries.len(), "Got Toggl time entries");
        Ok(entries)
    }

    /// Fetch the project catalog of the user's default workspace.
    ///
    /// Projects are only listed per workspace, so this first resolves
    /// the default workspace via [`get_default_workspace_id`](Self::get_default_workspace_id).
    pub async fn get_projects(&self) -> Result<Vec<Project>, TogglApiError> {
        tracing::info!("Looking up Toggl projects");
        let workspace_id = self.get_default_workspace_id().await?;
        let response = self
            .get(format!(
                "{}/workspaces/{}/projects",
                self.api_url, workspace_id
            ))
            .await?;

        let projects: Vec<Project> = Self::parse_response(response).await?;
        tracing::debug!(count = projects.len(), "Got Toggl projects");
        Ok(projects)
    }

    /// Look up the default workspace ID via `GET /me`.
    pub async fn get_default_workspace_id(&self) -> Result<i64, TogglApiError> {
        tracing::debug!("Looking up default Toggl workspace");
        let response = self.get(format!("{}/me", self.api_url)).await?;

        let me: MeResponse = Self::parse_response(response).await?;
        Ok(me.default_workspace_id)
    }

    // ---- private helpers ----

    /// Send an authenticated GET request.
    async fn get(&self, url: String) -> Result<reqwest::Response, TogglApiError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.api_token, Some("api_token"))
            .send()
            .await?;
        Ok(response)
    }

    /// Ensure the response has a success status code. Authentication
    /// failures get their own variant so the caller can point at the
    /// token instead of the endpoint.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TogglApiError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TogglApiError::Auth {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TogglApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TogglApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
