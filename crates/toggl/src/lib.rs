//! Toggl Track REST client library.
//!
//! Wraps the handful of Toggl API v9 endpoints the sync needs: time
//! entries for a date range, the project catalog, and the default
//! workspace lookup the project catalog requires.

pub mod api;
