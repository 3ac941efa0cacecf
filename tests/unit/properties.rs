use ce_backend::derive_cycle;
use ce_backend::services::entitlement_service::{EntitlementPolicy, compute_active_weeks};
use ce_backend::utils::{DateInterval, WeekCounting};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use proptest::prelude::*;

fn monday(offset_weeks: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 3).unwrap() + Days::new(u64::from(offset_weeks) * 7)
}

proptest! {
    #[test]
    fn cycle_dates_follow_the_week_grid(offset in 0u32..2000, weeks in 1u32..120) {
        let start = monday(offset);
        let dates = derive_cycle(start, weeks).unwrap();
        prop_assert_eq!((dates.end_date - start).num_days(), i64::from(weeks) * 7 - 3);
        prop_assert_eq!(dates.end_date.weekday(), Weekday::Fri);
        prop_assert_eq!((dates.next_start - dates.end_date).num_days(), 3);
        prop_assert_eq!(dates.next_start.weekday(), Weekday::Mon);
        prop_assert_eq!((dates.next_end - dates.next_start).num_days(), i64::from(weeks) * 7 - 3);
    }

    #[test]
    fn non_monday_start_fails(offset in 0u32..2000, shift in 1u64..7) {
        let start = monday(offset) + Days::new(shift);
        prop_assert!(derive_cycle(start, 52).is_err());
    }

    #[test]
    fn disjoint_intervals_earn_nothing(offset in 0u32..2000, gap in 1u64..400, len in 0u64..400) {
        let cycle = derive_cycle(monday(offset), 52).unwrap();
        let after_start = cycle.end_date + Days::new(gap);
        let interval = DateInterval::new(after_start, after_start + Days::new(len));
        let weeks = compute_active_weeks(
            interval,
            DateInterval::new(cycle.start_date, cycle.end_date),
            WeekCounting::Inclusive,
        );
        prop_assert_eq!(weeks, 0);
        prop_assert!(EntitlementPolicy::default().for_weeks(weeks).holiday_hours.is_zero());
    }

    #[test]
    fn entitlement_grows_with_weeks(weeks in 0u32..52) {
        let policy = EntitlementPolicy::default();
        let (a, b) = (policy.for_weeks(weeks), policy.for_weeks(weeks + 1));
        prop_assert!(a.holiday_hours < b.holiday_hours);
        prop_assert!(a.sick_cert_hours <= b.sick_cert_hours);
        prop_assert!(a.sick_uncert_hours <= b.sick_uncert_hours);
        prop_assert!(b.sick_cert_hours <= policy.sick_cert_annual_hours);
    }
}
