use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::auth::AuthUser;
use crate::error::LeaveError;
use crate::leave::catalog;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeaveType {
    #[schema(example = "Annual")]
    pub name: String,
    pub description: Option<String>,
    /// Days entitled per year; null means unlimited
    #[schema(example = 21)]
    pub max_days_per_year: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/leave-types",
    responses((status = 200, description = "Leave type catalog", body = [crate::model::leave_type::LeaveType])),
    tag = "LeaveType"
)]
pub async fn list_leave_types(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let types = catalog::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(types))
}

#[utoipa::path(
    post,
    path = "/api/leave-types",
    request_body = CreateLeaveType,
    responses(
        (status = 200, description = "Leave type created", body = crate::model::leave_type::LeaveType),
        (status = 400, description = "Name already exists"),
        (status = 403, description = "Forbidden")
    ),
    tag = "LeaveType"
)]
pub async fn create_leave_type(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLeaveType>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let result = catalog::create(
        pool.get_ref(),
        &payload.name,
        payload.description.as_deref(),
        payload.max_days_per_year,
    )
    .await;

    match result {
        Ok(leave_type) => Ok(HttpResponse::Ok().json(leave_type)),
        // Unique name collision
        Err(LeaveError::Storage(sqlx::Error::Database(db)))
            if db.code().as_deref() == Some("23000") =>
        {
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Leave type already exists"
            })))
        }
        Err(e) => Err(e.into()),
    }
}
