use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};

/// Everything the ledger and workflow can fail with. All of these are
/// raised before the surrounding transaction commits, so a caller that
/// sees one can assume no partial state was left behind.
#[derive(Debug, Display, Error)]
pub enum LeaveError {
    /// The referenced leave type does not exist.
    #[display(fmt = "Invalid leave type")]
    InvalidLeaveType,

    /// Requested more days than the employee has left for the year.
    /// Carries the remaining count so the employee can adjust the request.
    #[display(fmt = "Insufficient leave balance: {} day(s) remaining", remaining)]
    InsufficientBalance {
        #[error(not(source))]
        remaining: i32,
    },

    /// The request is not in the state the action requires — usually a
    /// stale client or a double submit racing another approver.
    #[display(fmt = "Leave request not found or already processed")]
    AlreadyProcessed,

    #[display(fmt = "Internal Server Error")]
    Storage(sqlx::Error),
}

impl From<sqlx::Error> for LeaveError {
    fn from(e: sqlx::Error) -> Self {
        LeaveError::Storage(e)
    }
}

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::InvalidLeaveType
            | LeaveError::InsufficientBalance { .. }
            | LeaveError::AlreadyProcessed => StatusCode::BAD_REQUEST,
            LeaveError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let LeaveError::Storage(e) = self {
            tracing::error!(error = %e, "Storage failure");
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_map_to_bad_request() {
        assert_eq!(
            LeaveError::InvalidLeaveType.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LeaveError::InsufficientBalance { remaining: 2 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LeaveError::AlreadyProcessed.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_maps_to_internal_error_without_detail() {
        let err = LeaveError::Storage(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn insufficient_balance_reports_remaining_days() {
        let err = LeaveError::InsufficientBalance { remaining: 2 };
        assert_eq!(
            err.to_string(),
            "Insufficient leave balance: 2 day(s) remaining"
        );
    }
}
