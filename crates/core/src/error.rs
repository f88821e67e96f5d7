//! Error taxonomy for the core mapping and reporting logic.

/// Errors raised by the pure core operations.
///
/// Each variant names precisely which lookup or precondition failed, so
/// the orchestration layer can report it per entry and decide whether to
/// abort the run or skip the entry.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entry is missing data required for processing, e.g. it is
    /// still running and has no stop time.
    #[error("Time entry {entry_id} cannot be processed: {reason}")]
    InvalidEntry { entry_id: i64, reason: &'static str },

    /// The entry carries no project, or its project id is absent from
    /// the fetched project catalog.
    #[error("Project for time entry {entry_id} not found")]
    ProjectNotFound { entry_id: i64 },

    /// The project name has no row in the built-in activity mapping
    /// table.
    #[error("No activity mapping for project '{project}'")]
    ActivityMappingNotFound { project: String },

    /// The mapped activity name does not exist in the Sloneek activity
    /// catalog.
    #[error("Activity '{name}' not found in Sloneek")]
    ActivityNotFound { name: String },

    /// The mapped category name does not exist in the Sloneek category
    /// catalog.
    #[error("Category '{name}' not found in Sloneek")]
    CategoryNotFound { name: String },

    /// An aggregated identifier resolves to neither a category nor an
    /// activity. Mapping only ever emits catalog identifiers, so this
    /// indicates a bug in the pipeline rather than bad user data.
    #[error("Identifier '{id}' is in neither the category nor the activity catalog")]
    UnknownIdentifier { id: String },
}
