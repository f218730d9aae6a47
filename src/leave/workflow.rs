//! Approval workflow: employee -> manager -> HR. All balance mutation goes
//! through here; read paths live in `queries`.

use chrono::{Datelike, NaiveDate};
use sqlx::{MySql, MySqlPool, Transaction};

use crate::error::LeaveError;
use crate::leave::calendar::business_days;
use crate::leave::ledger;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};

pub(crate) const REQUEST_COLUMNS: &str = "id, employee_id, employee_name, leave_type_id, \
     start_date, end_date, number_of_days, status, reason, \
     manager_id, manager_action_status, manager_action_date, manager_remarks, \
     hr_id, hr_action_status, hr_action_date, hr_remarks, \
     created_at, updated_at";

pub struct ApplyLeave {
    pub employee_id: u64,
    pub employee_name: String,
    pub leave_type_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Default)]
pub struct UpdateLeave {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

/// The workflow component. Holds the storage handle it was constructed
/// with; every operation acquires and releases its own connection or
/// transaction from the pool.
#[derive(Clone)]
pub struct LeaveService {
    pool: MySqlPool,
}

impl LeaveService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Submit a leave application. The day count comes from the business-day
    /// calculator, the balance year from the start date. Check-then-debit
    /// runs under an exclusive lock on the balance row, in one transaction
    /// with the request insert: either both land or neither does.
    pub async fn apply(&self, input: ApplyLeave) -> Result<LeaveRequest, LeaveError> {
        let days = business_days(input.start_date, input.end_date);
        let year = input.start_date.year();

        let mut tx = self.pool.begin().await?;

        let mut balance =
            ledger::lock_or_create(&mut tx, input.employee_id, input.leave_type_id, year).await?;

        if !balance.has_room_for(days) {
            return Err(LeaveError::InsufficientBalance {
                remaining: balance.remaining_days.unwrap_or(0),
            });
        }

        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (employee_id, employee_name, leave_type_id, start_date, end_date,
                 number_of_days, status, reason)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.employee_id)
        .bind(&input.employee_name)
        .bind(input.leave_type_id)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(days)
        .bind(LeaveStatus::PendingManager.to_string())
        .bind(&input.reason)
        .execute(&mut *tx)
        .await?;
        let request_id = result.last_insert_id();

        ledger::debit(&mut tx, &mut balance, days).await?;

        tx.commit().await?;

        tracing::info!(
            request_id,
            employee_id = input.employee_id,
            leave_type_id = input.leave_type_id,
            days,
            "Leave application submitted"
        );

        self.fetch(request_id).await
    }

    pub async fn manager_approve(
        &self,
        request_id: u64,
        manager_id: u64,
    ) -> Result<LeaveRequest, LeaveError> {
        self.manager_decide(request_id, manager_id, true, None).await
    }

    pub async fn manager_reject(
        &self,
        request_id: u64,
        manager_id: u64,
        remarks: Option<&str>,
    ) -> Result<LeaveRequest, LeaveError> {
        // Note: a manager rejection does NOT credit the balance back; only
        // an HR rejection does. Kept as-is pending product confirmation.
        self.manager_decide(request_id, manager_id, false, remarks)
            .await
    }

    async fn manager_decide(
        &self,
        request_id: u64,
        manager_id: u64,
        approve: bool,
        remarks: Option<&str>,
    ) -> Result<LeaveRequest, LeaveError> {
        let mut tx = self.pool.begin().await?;

        let request = lock_request(&mut tx, request_id).await?;
        let next = current_status(&request)?
            .manager_decision(approve)
            .ok_or(LeaveError::AlreadyProcessed)?;

        sqlx::query(
            r#"
            UPDATE leave_requests
            SET status = ?, manager_id = ?, manager_action_status = ?,
                manager_action_date = NOW(), manager_remarks = ?
            WHERE id = ?
            "#,
        )
        .bind(next.to_string())
        .bind(manager_id)
        .bind(action_label(approve))
        .bind(remarks)
        .bind(request_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(request_id, manager_id, status = %next, "Manager decision recorded");
        self.fetch(request_id).await
    }

    pub async fn hr_approve(
        &self,
        request_id: u64,
        hr_id: u64,
        remarks: Option<&str>,
    ) -> Result<LeaveRequest, LeaveError> {
        let mut tx = self.pool.begin().await?;

        let request = lock_request(&mut tx, request_id).await?;
        let next = current_status(&request)?
            .hr_decision(true)
            .ok_or(LeaveError::AlreadyProcessed)?;

        record_hr_action(&mut tx, request_id, next, hr_id, true, remarks).await?;
        tx.commit().await?;

        tracing::info!(request_id, hr_id, status = %next, "HR approval recorded");
        self.fetch(request_id).await
    }

    /// HR rejection is the only transition that touches the ledger: the
    /// days debited at application time are credited back, in the same
    /// transaction as the status update. The locked status check makes the
    /// transition one-shot, so a double reject can never credit twice.
    pub async fn hr_reject(
        &self,
        request_id: u64,
        hr_id: u64,
        remarks: Option<&str>,
    ) -> Result<LeaveRequest, LeaveError> {
        let mut tx = self.pool.begin().await?;

        let request = lock_request(&mut tx, request_id).await?;
        let next = current_status(&request)?
            .hr_decision(false)
            .ok_or(LeaveError::AlreadyProcessed)?;

        record_hr_action(&mut tx, request_id, next, hr_id, false, remarks).await?;

        let year = request.start_date.year();
        let mut balance =
            ledger::lock_or_create(&mut tx, request.employee_id, request.leave_type_id, year)
                .await?;
        ledger::credit(&mut tx, &mut balance, request.number_of_days).await?;

        tx.commit().await?;

        tracing::info!(
            request_id,
            hr_id,
            days = request.number_of_days,
            "HR rejection recorded, balance credited back"
        );
        self.fetch(request_id).await
    }

    /// Edit dates/reason of the caller's own request, allowed only while it
    /// still sits with the manager. The day count is recomputed when dates
    /// change, but the original ledger debit stands untouched.
    pub async fn update(
        &self,
        request_id: u64,
        employee_id: u64,
        patch: UpdateLeave,
    ) -> Result<LeaveRequest, LeaveError> {
        let mut tx = self.pool.begin().await?;

        let request = lock_request(&mut tx, request_id).await?;
        ensure_editable(&request, employee_id)?;

        let start_date = patch.start_date.unwrap_or(request.start_date);
        let end_date = patch.end_date.unwrap_or(request.end_date);
        let days = business_days(start_date, end_date);
        let reason = patch.reason.or(request.reason);

        sqlx::query(
            r#"
            UPDATE leave_requests
            SET start_date = ?, end_date = ?, number_of_days = ?, reason = ?
            WHERE id = ?
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .bind(days)
        .bind(&reason)
        .bind(request_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        self.fetch(request_id).await
    }

    /// Withdraw the caller's own request, allowed only while
    /// `pending_manager`. The application-time debit is not credited back.
    pub async fn delete(&self, request_id: u64, employee_id: u64) -> Result<(), LeaveError> {
        let mut tx = self.pool.begin().await?;

        let request = lock_request(&mut tx, request_id).await?;
        ensure_editable(&request, employee_id)?;

        sqlx::query("DELETE FROM leave_requests WHERE id = ?")
            .bind(request_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(request_id, employee_id, "Pending leave request withdrawn");
        Ok(())
    }

    async fn fetch(&self, request_id: u64) -> Result<LeaveRequest, LeaveError> {
        let sql = format!(
            "SELECT {} FROM leave_requests WHERE id = ?",
            REQUEST_COLUMNS
        );
        let request = sqlx::query_as::<_, LeaveRequest>(&sql)
            .bind(request_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(request)
    }
}

async fn lock_request(
    tx: &mut Transaction<'_, MySql>,
    request_id: u64,
) -> Result<LeaveRequest, LeaveError> {
    let sql = format!(
        "SELECT {} FROM leave_requests WHERE id = ? FOR UPDATE",
        REQUEST_COLUMNS
    );
    sqlx::query_as::<_, LeaveRequest>(&sql)
        .bind(request_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(LeaveError::AlreadyProcessed)
}

fn current_status(request: &LeaveRequest) -> Result<LeaveStatus, LeaveError> {
    // The column is an open string enum; anything unparseable is treated
    // the same as a request in the wrong state.
    request
        .status
        .parse()
        .map_err(|_| LeaveError::AlreadyProcessed)
}

fn ensure_editable(request: &LeaveRequest, employee_id: u64) -> Result<(), LeaveError> {
    if request.employee_id != employee_id
        || current_status(request)? != LeaveStatus::PendingManager
    {
        return Err(LeaveError::AlreadyProcessed);
    }
    Ok(())
}

fn action_label(approve: bool) -> &'static str {
    if approve { "approved" } else { "rejected" }
}

async fn record_hr_action(
    tx: &mut Transaction<'_, MySql>,
    request_id: u64,
    next: LeaveStatus,
    hr_id: u64,
    approve: bool,
    remarks: Option<&str>,
) -> Result<(), LeaveError> {
    sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = ?, hr_id = ?, hr_action_status = ?,
            hr_action_date = NOW(), hr_remarks = ?
        WHERE id = ?
        "#,
    )
    .bind(next.to_string())
    .bind(hr_id)
    .bind(action_label(approve))
    .bind(remarks)
    .bind(request_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
