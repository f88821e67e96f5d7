//! Worker configuration loaded from environment variables.

use anyhow::Context;

/// Service endpoints and credentials read from the environment.
///
/// The Sloneek bearer token is deliberately not here: it expires with
/// the app session and is passed on the command line per run.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Toggl API base URL.
    pub toggl_api_url: String,
    /// Toggl account API token.
    pub toggl_api_token: String,
    /// Sloneek API base URL.
    pub sloneek_api_url: String,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default                              |
    /// |-------------------|--------------------------------------|
    /// | `TOGGL_API_URL`   | `https://api.track.toggl.com/api/v9` |
    /// | `TOGGL_API_KEY`   | (required)                           |
    /// | `SLONEEK_API_URL` | `https://api2.sloneek.com`           |
    pub fn from_env() -> anyhow::Result<Self> {
        let toggl_api_url = std::env::var("TOGGL_API_URL")
            .unwrap_or_else(|_| "https://api.track.toggl.com/api/v9".into());

        let toggl_api_token =
            std::env::var("TOGGL_API_KEY").context("TOGGL_API_KEY must be set")?;

        let sloneek_api_url =
            std::env::var("SLONEEK_API_URL").unwrap_or_else(|_| "https://api2.sloneek.com".into());

        Ok(Self {
            toggl_api_url,
            toggl_api_token,
            sloneek_api_url,
        })
    }
}
