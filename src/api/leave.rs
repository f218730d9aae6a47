use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::auth::AuthUser;
use crate::leave::queries::{self, RequestFilter};
use crate::leave::workflow::{ApplyLeave, LeaveService, UpdateLeave};

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = 1)]
    pub leave_type_id: u64,
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2026-03-06", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    #[schema(example = "Family trip")]
    pub reason: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateLeavePayload {
    #[schema(example = "2026-03-03", format = "date", value_type = String)]
    pub start_date: Option<chrono::NaiveDate>,
    #[schema(example = "2026-03-06", format = "date", value_type = String)]
    pub end_date: Option<chrono::NaiveDate>,
    pub reason: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct Decision {
    #[schema(example = "Coverage confirmed")]
    pub remarks: Option<String>,
}

/* =========================
Submit leave application
========================= */
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body = CreateLeave,
    responses(
        (status = 200, description = "Application submitted", body = crate::model::leave_request::LeaveRequest),
        (status = 400, description = "Invalid leave type / insufficient balance / bad dates"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Leave"
)]
pub async fn apply_leave(
    auth: AuthUser,
    service: web::Data<LeaveService>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    if payload.start_date > payload.end_date {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "start_date cannot be after end_date"
        })));
    }

    let payload = payload.into_inner();
    let request = service
        .apply(ApplyLeave {
            employee_id: auth.user_id,
            employee_name: auth.employee_name,
            leave_type_id: payload.leave_type_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: payload.reason,
        })
        .await?;

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Edit / withdraw (owner, pending_manager only)
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}",
    params(("leave_id" = u64, Path, description = "Leave request ID")),
    request_body = UpdateLeavePayload,
    responses(
        (status = 200, description = "Request updated", body = crate::model::leave_request::LeaveRequest),
        (status = 400, description = "Not found or already processed")
    ),
    tag = "Leave"
)]
pub async fn update_leave(
    auth: AuthUser,
    service: web::Data<LeaveService>,
    path: web::Path<u64>,
    payload: web::Json<UpdateLeavePayload>,
) -> actix_web::Result<impl Responder> {
    if let (Some(start), Some(end)) = (payload.start_date, payload.end_date) {
        if start > end {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "start_date cannot be after end_date"
            })));
        }
    }

    let payload = payload.into_inner();
    let request = service
        .update(
            path.into_inner(),
            auth.user_id,
            UpdateLeave {
                start_date: payload.start_date,
                end_date: payload.end_date,
                reason: payload.reason,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(request))
}

#[utoipa::path(
    delete,
    path = "/api/leave/{leave_id}",
    params(("leave_id" = u64, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Request withdrawn"),
        (status = 400, description = "Not found or already processed")
    ),
    tag = "Leave"
)]
pub async fn delete_leave(
    auth: AuthUser,
    service: web::Data<LeaveService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    service.delete(path.into_inner(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave request withdrawn"
    })))
}

/* =========================
Manager stage
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/manager/approve",
    params(("leave_id" = u64, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Forwarded to HR", body = crate::model::leave_request::LeaveRequest),
        (status = 400, description = "Not found or already processed"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Leave"
)]
pub async fn manager_approve(
    auth: AuthUser,
    service: web::Data<LeaveService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;
    let request = service
        .manager_approve(path.into_inner(), auth.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(request))
}

#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/manager/reject",
    params(("leave_id" = u64, Path, description = "Leave request ID")),
    request_body = Decision,
    responses(
        (status = 200, description = "Rejected by manager", body = crate::model::leave_request::LeaveRequest),
        (status = 400, description = "Not found or already processed"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Leave"
)]
pub async fn manager_reject(
    auth: AuthUser,
    service: web::Data<LeaveService>,
    path: web::Path<u64>,
    body: Option<web::Json<Decision>>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;
    let remarks = body.as_ref().and_then(|b| b.remarks.as_deref());
    let request = service
        .manager_reject(path.into_inner(), auth.user_id, remarks)
        .await?;
    Ok(HttpResponse::Ok().json(request))
}

/* =========================
HR stage
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/hr/approve",
    params(("leave_id" = u64, Path, description = "Leave request ID")),
    request_body = Decision,
    responses(
        (status = 200, description = "Approved", body = crate::model::leave_request::LeaveRequest),
        (status = 400, description = "Not found or already processed"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Leave"
)]
pub async fn hr_approve(
    auth: AuthUser,
    service: web::Data<LeaveService>,
    path: web::Path<u64>,
    body: Option<web::Json<Decision>>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;
    let remarks = body.as_ref().and_then(|b| b.remarks.as_deref());
    let request = service
        .hr_approve(path.into_inner(), auth.user_id, remarks)
        .await?;
    Ok(HttpResponse::Ok().json(request))
}

/// Rejecting at the HR stage credits the debited days back to the ledger.
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/hr/reject",
    params(("leave_id" = u64, Path, description = "Leave request ID")),
    request_body = Decision,
    responses(
        (status = 200, description = "Rejected, balance restored", body = crate::model::leave_request::LeaveRequest),
        (status = 400, description = "Not found or already processed"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Leave"
)]
pub async fn hr_reject(
    auth: AuthUser,
    service: web::Data<LeaveService>,
    path: web::Path<u64>,
    body: Option<web::Json<Decision>>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;
    let remarks = body.as_ref().and_then(|b| b.remarks.as_deref());
    let request = service
        .hr_reject(path.into_inner(), auth.user_id, remarks)
        .await?;
    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Read paths
========================= */
#[utoipa::path(
    get,
    path = "/api/leave",
    params(RequestFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = queries::RequestListResponse),
        (status = 403, description = "Forbidden")
    ),
    tag = "Leave"
)]
pub async fn list_leaves(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<RequestFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;
    let response = queries::list_requests(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/leave/mine",
    responses((status = 200, description = "Caller's leave history")),
    tag = "Leave"
)]
pub async fn my_leaves(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let requests = queries::list_for_employee(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(requests))
}

#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(("leave_id" = u64, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request found", body = crate::model::leave_request::LeaveRequest),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;
    match queries::get_request(pool.get_ref(), path.into_inner()).await? {
        Some(request) => Ok(HttpResponse::Ok().json(request)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        }))),
    }
}

#[utoipa::path(
    get,
    path = "/api/leave/queue/manager",
    responses((status = 200, description = "Requests awaiting manager decision")),
    tag = "Leave"
)]
pub async fn manager_queue(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;
    let requests = queries::manager_queue(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(requests))
}

#[utoipa::path(
    get,
    path = "/api/leave/queue/hr",
    responses((status = 200, description = "Requests awaiting HR decision")),
    tag = "Leave"
)]
pub async fn hr_queue(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;
    let requests = queries::hr_queue(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(requests))
}
