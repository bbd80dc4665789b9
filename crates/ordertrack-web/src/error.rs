//! Domain error to HTTP response mapping.

use axum::http::StatusCode;
use ordertrack_core::TrackError;
use ordertrack_db::DbError;

/// Map a domain error onto an HTTP status and message.
pub fn error_response(err: TrackError) -> (StatusCode, String) {
    let status = match &err {
        TrackError::ProjectNotFound(_)
        | TrackError::StepNotFound { .. }
        | TrackError::NotificationNotFound(_)
        | TrackError::ActorNotFound(_)
        | TrackError::Database(DbError::NotFound(_)) => StatusCode::NOT_FOUND,
        TrackError::Forbidden => StatusCode::FORBIDDEN,
        TrackError::Unauthenticated => StatusCode::UNAUTHORIZED,
        TrackError::PreviousStepIncomplete { .. } | TrackError::StepAlreadyCompleted { .. } => {
            StatusCode::CONFLICT
        }
        TrackError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        let cases = [
            (
                error_response(TrackError::ProjectNotFound("p".into())).0,
                StatusCode::NOT_FOUND,
            ),
            (error_response(TrackError::Forbidden).0, StatusCode::FORBIDDEN),
            (
                error_response(TrackError::Unauthenticated).0,
                StatusCode::UNAUTHORIZED,
            ),
            (
                error_response(TrackError::PreviousStepIncomplete { step_number: 4 }).0,
                StatusCode::CONFLICT,
            ),
            (
                error_response(TrackError::StepAlreadyCompleted { step_number: 2 }).0,
                StatusCode::CONFLICT,
            ),
        ];
        for (got, want) in cases {
            assert_eq!(got, want);
        }
    }
}
