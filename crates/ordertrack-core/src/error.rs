//! Centralized error types for ordertrack.

use thiserror::Error;

/// Main error type for workflow operations.
///
/// Every variant is terminal: the engine never retries, and a failed
/// precondition leaves all entities unmodified.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Step {step_number} not found for project {project_id}")]
    StepNotFound {
        project_id: String,
        step_number: i64,
    },

    #[error("Notification not found: {0}")]
    NotificationNotFound(String),

    #[error("Actor not found: {0}")]
    ActorNotFound(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Not authorized to access this project")]
    Forbidden,

    #[error("Cannot complete step {step_number} because the previous step is not completed")]
    PreviousStepIncomplete { step_number: i64 },

    #[error("Step {step_number} is already completed")]
    StepAlreadyCompleted { step_number: i64 },

    #[error("Database error: {0}")]
    Database(#[from] ordertrack_db::DbError),
}

/// Result type for workflow operations.
pub type TrackResult<T> = Result<T, TrackError>;
