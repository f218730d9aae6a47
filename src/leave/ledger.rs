//! Balance ledger: one row per (employee, leave type, year), mutated only
//! inside a transaction that holds an exclusive lock on the row. The lock
//! makes the caller's check-then-debit sequence atomic with respect to
//! other submissions for the same key; different keys never block each
//! other.

use sqlx::{MySql, Transaction};

use crate::error::LeaveError;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_type::LeaveType;

const BALANCE_COLUMNS: &str =
    "id, employee_id, leave_type_id, `year`, total_entitled, used_days, remaining_days";

pub async fn fetch_leave_type(
    tx: &mut Transaction<'_, MySql>,
    leave_type_id: u64,
) -> Result<LeaveType, LeaveError> {
    sqlx::query_as::<_, LeaveType>(
        "SELECT id, name, description, max_days_per_year FROM leave_types WHERE id = ?",
    )
    .bind(leave_type_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(LeaveError::InvalidLeaveType)
}

async fn lock(
    tx: &mut Transaction<'_, MySql>,
    employee_id: u64,
    leave_type_id: u64,
    year: i32,
) -> Result<Option<LeaveBalance>, LeaveError> {
    let sql = format!(
        "SELECT {} FROM leave_balances \
         WHERE employee_id = ? AND leave_type_id = ? AND `year` = ? FOR UPDATE",
        BALANCE_COLUMNS
    );
    let balance = sqlx::query_as::<_, LeaveBalance>(&sql)
        .bind(employee_id)
        .bind(leave_type_id)
        .bind(year)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(balance)
}

/// Lock the balance row for the key, creating it first if this is the
/// employee's first application for that type and year. A fresh row is
/// seeded from the leave type's current `max_days_per_year` with
/// `used_days = 0`. Fails with `InvalidLeaveType` when the type is unknown.
pub async fn lock_or_create(
    tx: &mut Transaction<'_, MySql>,
    employee_id: u64,
    leave_type_id: u64,
    year: i32,
) -> Result<LeaveBalance, LeaveError> {
    if let Some(balance) = lock(tx, employee_id, leave_type_id, year).await? {
        return Ok(balance);
    }

    let leave_type = fetch_leave_type(tx, leave_type_id).await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO leave_balances
            (employee_id, leave_type_id, `year`, total_entitled, used_days, remaining_days)
        VALUES (?, ?, ?, ?, 0, ?)
        "#,
    )
    .bind(employee_id)
    .bind(leave_type_id)
    .bind(year)
    .bind(leave_type.max_days_per_year)
    .bind(leave_type.max_days_per_year)
    .execute(&mut **tx)
    .await;

    if let Err(e) = inserted {
        // A concurrent transaction may have created the row between our
        // empty locked read and the insert; fall through to re-lock it.
        let duplicate = matches!(
            &e,
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23000")
        );
        if !duplicate {
            return Err(e.into());
        }
    }

    lock(tx, employee_id, leave_type_id, year)
        .await?
        .ok_or(LeaveError::Storage(sqlx::Error::RowNotFound))
}

async fn persist(
    tx: &mut Transaction<'_, MySql>,
    balance: &LeaveBalance,
) -> Result<(), LeaveError> {
    sqlx::query("UPDATE leave_balances SET used_days = ?, remaining_days = ? WHERE id = ?")
        .bind(balance.used_days)
        .bind(balance.remaining_days)
        .bind(balance.id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Consume `days` from a locked balance. The caller has already verified
/// the room under the same lock; nothing is re-checked here.
pub async fn debit(
    tx: &mut Transaction<'_, MySql>,
    balance: &mut LeaveBalance,
    days: i32,
) -> Result<(), LeaveError> {
    balance.debit(days);
    persist(tx, balance).await
}

/// Return `days` to a locked balance, the inverse of `debit`. Used only
/// when HR rejects a previously debited request.
pub async fn credit(
    tx: &mut Transaction<'_, MySql>,
    balance: &mut LeaveBalance,
    days: i32,
) -> Result<(), LeaveError> {
    balance.credit(days);
    persist(tx, balance).await
}
