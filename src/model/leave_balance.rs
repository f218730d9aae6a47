use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row per (employee, leave type, year). `total_entitled` is a snapshot
/// of the leave type's max taken when the row is first created for that
/// year, not a live reference. `remaining_days == total_entitled -
/// used_days` must hold after every mutation; a NULL entitlement means
/// unlimited, with a NULL remaining count.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveBalance {
    pub id: u64,
    pub employee_id: u64,
    pub leave_type_id: u64,
    pub year: i32,
    pub total_entitled: Option<i32>,
    pub used_days: i32,
    pub remaining_days: Option<i32>,
}

impl LeaveBalance {
    /// True when `days` fits in what is left. Unlimited types always fit.
    pub fn has_room_for(&self, days: i32) -> bool {
        match self.remaining_days {
            Some(remaining) => days <= remaining,
            None => true,
        }
    }

    /// Consume `days`. The room check is the caller's, performed under the
    /// same row lock; this does not re-check.
    pub fn debit(&mut self, days: i32) {
        self.used_days += days;
        self.remaining_days = self.total_entitled.map(|total| total - self.used_days);
    }

    /// Return `days`, the exact inverse of `debit`. Used only when HR
    /// rejects a previously debited request. No clamping.
    pub fn credit(&mut self, days: i32) {
        self.debit(-days);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(total: Option<i32>) -> LeaveBalance {
        LeaveBalance {
            id: 1,
            employee_id: 100,
            leave_type_id: 1,
            year: 2026,
            total_entitled: total,
            used_days: 0,
            remaining_days: total,
        }
    }

    fn invariant_holds(b: &LeaveBalance) -> bool {
        match (b.total_entitled, b.remaining_days) {
            (Some(total), Some(remaining)) => remaining == total - b.used_days,
            (None, None) => true,
            _ => false,
        }
    }

    #[test]
    fn debit_keeps_the_invariant() {
        let mut b = balance(Some(21));
        b.debit(5);
        assert_eq!(b.used_days, 5);
        assert_eq!(b.remaining_days, Some(16));
        assert!(invariant_holds(&b));

        b.debit(16);
        assert_eq!(b.remaining_days, Some(0));
        assert!(invariant_holds(&b));
    }

    #[test]
    fn credit_after_debit_is_a_no_op() {
        let mut b = balance(Some(21));
        b.debit(5);
        b.credit(5);
        assert_eq!(b.used_days, 0);
        assert_eq!(b.remaining_days, Some(21));
        assert!(invariant_holds(&b));
    }

    #[test]
    fn room_check_against_remaining() {
        let mut b = balance(Some(21));
        b.debit(19);
        assert!(b.has_room_for(2));
        assert!(!b.has_room_for(3));
    }

    #[test]
    fn unlimited_type_never_blocks() {
        let mut b = balance(None);
        assert!(b.has_room_for(1000));
        b.debit(40);
        assert_eq!(b.used_days, 40);
        assert_eq!(b.remaining_days, None);
        assert!(b.has_room_for(1000));
        assert!(invariant_holds(&b));
    }
}
