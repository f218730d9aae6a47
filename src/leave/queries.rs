//! Read-only projections over the requests table and the ledger. Nothing
//! here mutates; invariants are the data model's.

use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

use crate::error::LeaveError;
use crate::leave::catalog;
use crate::leave::workflow::REQUEST_COLUMNS;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::model::leave_type::LeaveType;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct RequestFilter {
    /// Filter by employee ID
    #[schema(example = 1000)]
    pub employee_id: Option<u64>,
    /// Filter by status
    #[schema(example = "pending_manager")]
    pub status: Option<String>,
    /// Pagination page number (1-based)
    #[schema(example = 1)]
    pub page: Option<u64>,
    /// Items per page
    #[schema(example = 10)]
    pub per_page: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct RequestListResponse {
    pub data: Vec<LeaveRequest>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    Str(&'a str),
}

pub async fn get_request(
    pool: &MySqlPool,
    request_id: u64,
) -> Result<Option<LeaveRequest>, LeaveError> {
    let sql = format!("SELECT {} FROM leave_requests WHERE id = ?", REQUEST_COLUMNS);
    let request = sqlx::query_as::<_, LeaveRequest>(&sql)
        .bind(request_id)
        .fetch_optional(pool)
        .await?;
    Ok(request)
}

pub async fn list_requests(
    pool: &MySqlPool,
    filter: &RequestFilter,
) -> Result<RequestListResponse, LeaveError> {
    let per_page = filter.per_page.unwrap_or(10).min(100);
    let page = filter.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(emp_id) = filter.employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::U64(emp_id));
    }

    if let Some(status) = filter.status.as_deref() {
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    let count_sql = format!("SELECT COUNT(*) FROM leave_requests{}", where_sql);
    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }
    let total = count_q.fetch_one(pool).await?;

    let data_sql = format!(
        "SELECT {} FROM leave_requests{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        REQUEST_COLUMNS, where_sql
    );
    let mut data_q = sqlx::query_as::<_, LeaveRequest>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }
    let data = data_q.bind(per_page).bind(offset).fetch_all(pool).await?;

    Ok(RequestListResponse {
        data,
        page: page as u32,
        per_page: per_page as u32,
        total,
    })
}

pub async fn list_for_employee(
    pool: &MySqlPool,
    employee_id: u64,
) -> Result<Vec<LeaveRequest>, LeaveError> {
    let sql = format!(
        "SELECT {} FROM leave_requests WHERE employee_id = ? ORDER BY created_at DESC",
        REQUEST_COLUMNS
    );
    let requests = sqlx::query_as::<_, LeaveRequest>(&sql)
        .bind(employee_id)
        .fetch_all(pool)
        .await?;
    Ok(requests)
}

async fn queue(pool: &MySqlPool, status: LeaveStatus) -> Result<Vec<LeaveRequest>, LeaveError> {
    let sql = format!(
        "SELECT {} FROM leave_requests WHERE status = ? ORDER BY created_at ASC",
        REQUEST_COLUMNS
    );
    let requests = sqlx::query_as::<_, LeaveRequest>(&sql)
        .bind(status.to_string())
        .fetch_all(pool)
        .await?;
    Ok(requests)
}

/// Requests waiting on a manager decision, oldest first.
pub async fn manager_queue(pool: &MySqlPool) -> Result<Vec<LeaveRequest>, LeaveError> {
    queue(pool, LeaveStatus::PendingManager).await
}

/// Requests waiting on an HR decision, oldest first.
pub async fn hr_queue(pool: &MySqlPool) -> Result<Vec<LeaveRequest>, LeaveError> {
    queue(pool, LeaveStatus::PendingHr).await
}

/// One display row per leave type for one employee and year. Synthesized
/// from the catalog when no ledger row exists yet; never persisted.
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceRow {
    pub employee_id: u64,
    pub leave_type_id: u64,
    pub leave_type: String,
    pub year: i32,
    pub total_entitled: Option<i32>,
    pub used_days: i32,
    pub remaining_days: Option<i32>,
}

/// Merge the catalog with whatever ledger rows exist: a type without a row
/// shows `used = 0` and `remaining = max`, without writing anything.
fn merge_balance_rows(
    employee_id: u64,
    year: i32,
    types: &[LeaveType],
    persisted: Vec<LeaveBalance>,
) -> Vec<BalanceRow> {
    let mut by_type: HashMap<u64, LeaveBalance> = persisted
        .into_iter()
        .map(|b| (b.leave_type_id, b))
        .collect();

    types
        .iter()
        .map(|lt| match by_type.remove(&lt.id) {
            Some(balance) => BalanceRow {
                employee_id,
                leave_type_id: lt.id,
                leave_type: lt.name.clone(),
                year,
                total_entitled: balance.total_entitled,
                used_days: balance.used_days,
                remaining_days: balance.remaining_days,
            },
            None => BalanceRow {
                employee_id,
                leave_type_id: lt.id,
                leave_type: lt.name.clone(),
                year,
                total_entitled: lt.max_days_per_year,
                used_days: 0,
                remaining_days: lt.max_days_per_year,
            },
        })
        .collect()
}

async fn persisted_balances(
    pool: &MySqlPool,
    year: i32,
) -> Result<Vec<LeaveBalance>, LeaveError> {
    let rows = sqlx::query_as::<_, LeaveBalance>(
        "SELECT id, employee_id, leave_type_id, `year`, total_entitled, used_days, remaining_days \
         FROM leave_balances WHERE `year` = ?",
    )
    .bind(year)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn balances_for_employee(
    pool: &MySqlPool,
    employee_id: u64,
    year: i32,
) -> Result<Vec<BalanceRow>, LeaveError> {
    let types = catalog::list(pool).await?;
    let rows = sqlx::query_as::<_, LeaveBalance>(
        "SELECT id, employee_id, leave_type_id, `year`, total_entitled, used_days, remaining_days \
         FROM leave_balances WHERE employee_id = ? AND `year` = ?",
    )
    .bind(employee_id)
    .bind(year)
    .fetch_all(pool)
    .await?;

    Ok(merge_balance_rows(employee_id, year, &types, rows))
}

/// Snapshot for every employee the ledger has ever seen. The storage
/// contract carries no employees table, so the employee set is whatever
/// appears in `leave_balances` or `leave_requests`.
pub async fn balances_for_all(pool: &MySqlPool, year: i32) -> Result<Vec<BalanceRow>, LeaveError> {
    let types = catalog::list(pool).await?;
    let persisted = persisted_balances(pool, year).await?;

    let employee_ids: Vec<u64> = sqlx::query_scalar(
        "SELECT DISTINCT employee_id FROM leave_balances \
         UNION SELECT DISTINCT employee_id FROM leave_requests \
         ORDER BY employee_id",
    )
    .fetch_all(pool)
    .await?;

    let mut by_employee: HashMap<u64, Vec<LeaveBalance>> = HashMap::new();
    for balance in persisted {
        by_employee
            .entry(balance.employee_id)
            .or_default()
            .push(balance);
    }

    let mut out = Vec::new();
    for employee_id in employee_ids {
        let rows = by_employee.remove(&employee_id).unwrap_or_default();
        out.extend(merge_balance_rows(employee_id, year, &types, rows));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types() -> Vec<LeaveType> {
        vec![
            LeaveType {
                id: 1,
                name: "Annual".into(),
                description: None,
                max_days_per_year: Some(21),
            },
            LeaveType {
                id: 2,
                name: "Sick".into(),
                description: None,
                max_days_per_year: Some(14),
            },
            LeaveType {
                id: 3,
                name: "Unpaid".into(),
                description: None,
                max_days_per_year: None,
            },
        ]
    }

    #[test]
    fn missing_ledger_rows_default_to_the_type_max() {
        let rows = merge_balance_rows(1000, 2026, &types(), vec![]);
        assert_eq!(rows.len(), 3);

        let annual = &rows[0];
        assert_eq!(annual.leave_type, "Annual");
        assert_eq!(annual.used_days, 0);
        assert_eq!(annual.remaining_days, Some(21));

        let unpaid = &rows[2];
        assert_eq!(unpaid.total_entitled, None);
        assert_eq!(unpaid.remaining_days, None);
    }

    #[test]
    fn persisted_rows_win_over_defaults() {
        let persisted = vec![LeaveBalance {
            id: 7,
            employee_id: 1000,
            leave_type_id: 1,
            year: 2026,
            total_entitled: Some(21),
            used_days: 5,
            remaining_days: Some(16),
        }];
        let rows = merge_balance_rows(1000, 2026, &types(), persisted);

        assert_eq!(rows[0].used_days, 5);
        assert_eq!(rows[0].remaining_days, Some(16));
        // untouched types keep their synthesized defaults
        assert_eq!(rows[1].used_days, 0);
        assert_eq!(rows[1].remaining_days, Some(14));
    }

    #[test]
    fn entitlement_snapshot_survives_a_catalog_change() {
        // the ledger row was seeded when the max was 20; the catalog says
        // 25 now, but the persisted snapshot is what gets displayed
        let persisted = vec![LeaveBalance {
            id: 7,
            employee_id: 1000,
            leave_type_id: 1,
            year: 2026,
            total_entitled: Some(20),
            used_days: 0,
            remaining_days: Some(20),
        }];
        let mut catalog = types();
        catalog[0].max_days_per_year = Some(25);

        let rows = merge_balance_rows(1000, 2026, &catalog, persisted);
        assert_eq!(rows[0].total_entitled, Some(20));
        assert_eq!(rows[0].remaining_days, Some(20));
    }
}
