use chrono::{Datelike, NaiveDate, Weekday};

/// Count of weekdays (Mon-Fri) between `start` and `end`, both inclusive.
/// Returns 0 when `end < start`. Public holidays are not considered; every
/// non-weekend day counts.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> i32 {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monday_through_friday_is_five() {
        // 2026-03-02 is a Monday
        assert_eq!(business_days(date(2026, 3, 2), date(2026, 3, 6)), 5);
    }

    #[test]
    fn weekend_only_is_zero() {
        // Saturday and Sunday
        assert_eq!(business_days(date(2026, 3, 7), date(2026, 3, 8)), 0);
    }

    #[test]
    fn single_weekday_is_one() {
        assert_eq!(business_days(date(2026, 3, 4), date(2026, 3, 4)), 1);
    }

    #[test]
    fn single_weekend_day_is_zero() {
        assert_eq!(business_days(date(2026, 3, 7), date(2026, 3, 7)), 0);
    }

    #[test]
    fn reversed_range_is_zero() {
        assert_eq!(business_days(date(2026, 3, 6), date(2026, 3, 2)), 0);
    }

    #[test]
    fn span_over_weekend_skips_it() {
        // Wed .. next Tue: Wed Thu Fri Mon Tue
        assert_eq!(business_days(date(2026, 3, 4), date(2026, 3, 10)), 5);
    }

    #[test]
    fn two_full_weeks() {
        assert_eq!(business_days(date(2026, 3, 2), date(2026, 3, 13)), 10);
    }
}
