use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::IntoParams;

use crate::auth::AuthUser;
use crate::leave::queries;

#[derive(Deserialize, IntoParams)]
pub struct YearQuery {
    /// Balance year; defaults to the current calendar year
    pub year: Option<i32>,
}

fn year_or_current(query: &YearQuery) -> i32 {
    query.year.unwrap_or_else(|| Utc::now().year())
}

#[utoipa::path(
    get,
    path = "/api/balances/mine",
    params(YearQuery),
    responses((status = 200, description = "Caller's balance per leave type")),
    tag = "Balance"
)]
pub async fn my_balances(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<YearQuery>,
) -> actix_web::Result<impl Responder> {
    let rows =
        queries::balances_for_employee(pool.get_ref(), auth.user_id, year_or_current(&query))
            .await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[utoipa::path(
    get,
    path = "/api/balances/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID"),
        YearQuery
    ),
    responses(
        (status = 200, description = "Employee balance per leave type"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Balance"
)]
pub async fn employee_balances(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    query: web::Query<YearQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;
    let rows =
        queries::balances_for_employee(pool.get_ref(), path.into_inner(), year_or_current(&query))
            .await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[utoipa::path(
    get,
    path = "/api/balances",
    params(YearQuery),
    responses(
        (status = 200, description = "Balances for every employee the ledger knows"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Balance"
)]
pub async fn all_balances(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<YearQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;
    let rows = queries::balances_for_all(pool.get_ref(), year_or_current(&query)).await?;
    Ok(HttpResponse::Ok().json(rows))
}
