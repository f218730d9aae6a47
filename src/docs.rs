use crate::api::leave::{CreateLeave, Decision, UpdateLeavePayload};
use crate::api::leave_type::CreateLeaveType;
use crate::leave::queries::{BalanceRow, RequestFilter, RequestListResponse};
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::model::leave_type::LeaveType;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Management API",
        version = "1.0.0",
        description = r#"
## Leave lifecycle & balance ledger

Employee leave applications flow through a two-stage approval
(manager, then HR) against a per-employee, per-type, per-year balance
ledger. Day counts are business days (Mon-Fri, no holiday calendar).

Identity is supplied by the upstream gateway via `X-User-Id`,
`X-Employee-Name` and `X-Role` headers.
"#,
    ),
    paths(
        crate::api::leave::apply_leave,
        crate::api::leave::update_leave,
        crate::api::leave::delete_leave,
        crate::api::leave::manager_approve,
        crate::api::leave::manager_reject,
        crate::api::leave::hr_approve,
        crate::api::leave::hr_reject,
        crate::api::leave::list_leaves,
        crate::api::leave::my_leaves,
        crate::api::leave::get_leave,
        crate::api::leave::manager_queue,
        crate::api::leave::hr_queue,

        crate::api::balance::my_balances,
        crate::api::balance::employee_balances,
        crate::api::balance::all_balances,

        crate::api::leave_type::list_leave_types,
        crate::api::leave_type::create_leave_type,
    ),
    components(
        schemas(
            CreateLeave,
            UpdateLeavePayload,
            Decision,
            RequestFilter,
            RequestListResponse,
            LeaveRequest,
            LeaveStatus,
            LeaveBalance,
            BalanceRow,
            LeaveType,
            CreateLeaveType,
        )
    ),
    tags(
        (name = "Leave", description = "Leave application and approval workflow"),
        (name = "Balance", description = "Leave balance snapshots"),
        (name = "LeaveType", description = "Leave type catalog"),
    )
)]
pub struct ApiDoc;
