use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Approval states. Stored as plain strings in `leave_requests.status`
/// (open enum, no DB-level enum type).
///
/// ```text
/// pending_manager ──▶ pending_hr ──▶ approved
///        │                 │
///        ▼                 ▼
/// manager_rejected    hr_rejected
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    PendingManager,
    PendingHr,
    Approved,
    ManagerRejected,
    HrRejected,
}

impl LeaveStatus {
    /// Where a manager decision takes the request, or `None` if the
    /// request is not waiting on the manager.
    pub fn manager_decision(self, approve: bool) -> Option<LeaveStatus> {
        match self {
            LeaveStatus::PendingManager => Some(if approve {
                LeaveStatus::PendingHr
            } else {
                LeaveStatus::ManagerRejected
            }),
            _ => None,
        }
    }

    /// Where an HR decision takes the request, or `None` if the request is
    /// not waiting on HR.
    pub fn hr_decision(self, approve: bool) -> Option<LeaveStatus> {
        match self {
            LeaveStatus::PendingHr => Some(if approve {
                LeaveStatus::Approved
            } else {
                LeaveStatus::HrRejected
            }),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LeaveStatus::Approved | LeaveStatus::ManagerRejected | LeaveStatus::HrRejected
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    pub id: u64,
    pub employee_id: u64,
    /// Snapshot of the employee's name at submission time.
    pub employee_name: String,
    pub leave_type_id: u64,
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-03-06", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    pub number_of_days: i32,
    #[schema(example = "pending_manager")]
    pub status: String,
    pub reason: Option<String>,

    pub manager_id: Option<u64>,
    pub manager_action_status: Option<String>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub manager_action_date: Option<DateTime<Utc>>,
    pub manager_remarks: Option<String>,

    pub hr_id: Option<u64>,
    pub hr_action_status: Option<String>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub hr_action_date: Option<DateTime<Utc>>,
    pub hr_remarks: Option<String>,

    #[schema(value_type = Option<String>, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const ALL: [LeaveStatus; 5] = [
        LeaveStatus::PendingManager,
        LeaveStatus::PendingHr,
        LeaveStatus::Approved,
        LeaveStatus::ManagerRejected,
        LeaveStatus::HrRejected,
    ];

    #[test]
    fn status_round_trips_through_strings() {
        for status in ALL {
            let s = status.to_string();
            assert_eq!(LeaveStatus::from_str(&s).unwrap(), status);
        }
        assert_eq!(LeaveStatus::PendingManager.to_string(), "pending_manager");
        assert_eq!(LeaveStatus::HrRejected.to_string(), "hr_rejected");
    }

    #[test]
    fn manager_can_only_act_on_pending_manager() {
        assert_eq!(
            LeaveStatus::PendingManager.manager_decision(true),
            Some(LeaveStatus::PendingHr)
        );
        assert_eq!(
            LeaveStatus::PendingManager.manager_decision(false),
            Some(LeaveStatus::ManagerRejected)
        );
        for status in ALL.iter().filter(|s| **s != LeaveStatus::PendingManager) {
            assert_eq!(status.manager_decision(true), None);
            assert_eq!(status.manager_decision(false), None);
        }
    }

    #[test]
    fn hr_can_only_act_on_pending_hr() {
        assert_eq!(
            LeaveStatus::PendingHr.hr_decision(true),
            Some(LeaveStatus::Approved)
        );
        assert_eq!(
            LeaveStatus::PendingHr.hr_decision(false),
            Some(LeaveStatus::HrRejected)
        );
        for status in ALL.iter().filter(|s| **s != LeaveStatus::PendingHr) {
            assert_eq!(status.hr_decision(true), None);
            assert_eq!(status.hr_decision(false), None);
        }
    }

    #[test]
    fn terminal_states_have_no_way_out() {
        for status in ALL.iter().filter(|s| s.is_terminal()) {
            assert_eq!(status.manager_decision(true), None);
            assert_eq!(status.hr_decision(true), None);
        }
    }
}
