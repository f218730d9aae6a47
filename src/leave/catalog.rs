use sqlx::MySqlPool;

use crate::error::LeaveError;
use crate::model::leave_type::LeaveType;

const COLUMNS: &str = "id, name, description, max_days_per_year";

pub async fn list(pool: &MySqlPool) -> Result<Vec<LeaveType>, LeaveError> {
    let sql = format!("SELECT {} FROM leave_types ORDER BY name", COLUMNS);
    let types = sqlx::query_as::<_, LeaveType>(&sql).fetch_all(pool).await?;
    Ok(types)
}

pub async fn get(pool: &MySqlPool, leave_type_id: u64) -> Result<Option<LeaveType>, LeaveError> {
    let sql = format!("SELECT {} FROM leave_types WHERE id = ?", COLUMNS);
    let leave_type = sqlx::query_as::<_, LeaveType>(&sql)
        .bind(leave_type_id)
        .fetch_optional(pool)
        .await?;
    Ok(leave_type)
}

/// Insert a new leave type. Names are unique; a duplicate surfaces as a
/// database error for the caller to map. Deletion is deliberately not
/// offered — historical requests and balance seeds keep referencing types.
pub async fn create(
    pool: &MySqlPool,
    name: &str,
    description: Option<&str>,
    max_days_per_year: Option<i32>,
) -> Result<LeaveType, LeaveError> {
    let result = sqlx::query(
        r#"
        INSERT INTO leave_types (name, description, max_days_per_year)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(max_days_per_year)
    .execute(pool)
    .await?;

    let id = result.last_insert_id();
    let sql = format!("SELECT {} FROM leave_types WHERE id = ?", COLUMNS);
    let leave_type = sqlx::query_as::<_, LeaveType>(&sql)
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(leave_type)
}
