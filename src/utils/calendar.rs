use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive date range. `start > end` is a legal value meaning "no overlap"
/// and always counts as zero weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_degenerate(&self) -> bool {
        self.start > self.end
    }

    /// Days between the two endpoints, zero for a degenerate interval.
    pub fn days(&self) -> i64 {
        if self.is_degenerate() {
            0
        } else {
            (self.end - self.start).num_days()
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn intersect(&self, other: &DateInterval) -> DateInterval {
        intersect(*self, *other)
    }

    /// Whole weeks elapsed between the endpoints: `floor(days / 7)`.
    pub fn elapsed_weeks(&self) -> u32 {
        if self.is_degenerate() {
            return 0;
        }
        (self.days() / 7) as u32
    }

    /// Weeks touched by the inclusive range, so a Monday..Monday range of
    /// nine elapsed weeks covers ten weeks.
    pub fn inclusive_weeks(&self) -> u32 {
        if self.is_degenerate() {
            return 0;
        }
        self.elapsed_weeks() + 1
    }
}

/// `{max(a.start, b.start), min(a.end, b.end)}`. Never fails; the result may
/// be degenerate.
pub fn intersect(a: DateInterval, b: DateInterval) -> DateInterval {
    DateInterval {
        start: a.start.max(b.start),
        end: a.end.min(b.end),
    }
}

/// How whole weeks are counted inside an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekCounting {
    /// `floor((end - start).days / 7)`
    Elapsed,
    /// `floor((end - start).days / 7) + 1`
    #[default]
    Inclusive,
}

impl FromStr for WeekCounting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elapsed" => Ok(WeekCounting::Elapsed),
            "inclusive" => Ok(WeekCounting::Inclusive),
            other => Err(format!("unknown week counting rule '{}'", other)),
        }
    }
}

impl fmt::Display for WeekCounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekCounting::Elapsed => write!(f, "elapsed"),
            WeekCounting::Inclusive => write!(f, "inclusive"),
        }
    }
}

pub fn active_weeks(interval: DateInterval, counting: WeekCounting) -> u32 {
    match counting {
        WeekCounting::Elapsed => interval.elapsed_weeks(),
        WeekCounting::Inclusive => interval.inclusive_weeks(),
    }
}
