pub mod calendar;
pub mod hours;

pub use calendar::{DateInterval, WeekCounting, active_weeks, intersect};
pub use hours::{round_hours, zero_hours};
