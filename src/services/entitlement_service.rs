//! Pure entitlement arithmetic. Nothing in here touches a store.
//!
//! A participant earns holiday hours linearly per active week and a prorated
//! share of the annual certified / uncertified sick-leave caps. Every value is
//! rounded once, half-up, to two decimal places.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::db::models::{Participant, ProjectCycle};
use crate::utils::{DateInterval, WeekCounting, active_weeks, intersect, round_hours, zero_hours};

pub const HOLIDAY_HOURS_PER_WEEK: Decimal = dec!(1.56);
pub const SICK_CERT_ANNUAL_HOURS: Decimal = dec!(56.00);
pub const SICK_UNCERT_ANNUAL_HOURS: Decimal = dec!(8.00);
pub const PRORATION_WEEKS: u32 = 52;
pub const STANDARD_TERM_WEEKS: u32 = 52;

/// What a participant with no finish date is assumed to be active until.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenEndPolicy {
    /// Still active: clamp to the cycle's own end date.
    #[default]
    CycleEnd,
    /// A standard term from the participant's start: `start + weeks - 3 days`.
    StandardTerm,
}

impl FromStr for OpenEndPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cycle_end" => Ok(OpenEndPolicy::CycleEnd),
            "standard_term" => Ok(OpenEndPolicy::StandardTerm),
            other => Err(format!("unknown open end policy '{}'", other)),
        }
    }
}

impl fmt::Display for OpenEndPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenEndPolicy::CycleEnd => write!(f, "cycle_end"),
            OpenEndPolicy::StandardTerm => write!(f, "standard_term"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitlementPolicy {
    pub holiday_hours_per_week: Decimal,
    pub sick_cert_annual_hours: Decimal,
    pub sick_uncert_annual_hours: Decimal,
    /// Denominator of the sick-leave proration.
    pub proration_weeks: u32,
    pub week_counting: WeekCounting,
    pub open_end: OpenEndPolicy,
    /// Term length used by `OpenEndPolicy::StandardTerm`.
    pub standard_term_weeks: u32,
}

impl Default for EntitlementPolicy {
    fn default() -> Self {
        Self {
            holiday_hours_per_week: HOLIDAY_HOURS_PER_WEEK,
            sick_cert_annual_hours: SICK_CERT_ANNUAL_HOURS,
            sick_uncert_annual_hours: SICK_UNCERT_ANNUAL_HOURS,
            proration_weeks: PRORATION_WEEKS,
            week_counting: WeekCounting::default(),
            open_end: OpenEndPolicy::default(),
            standard_term_weeks: STANDARD_TERM_WEEKS,
        }
    }
}

/// Entitlement earned for a number of active weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub weeks_active: u32,
    pub holiday_hours: Decimal,
    pub sick_cert_hours: Decimal,
    pub sick_uncert_hours: Decimal,
}

impl EntitlementPolicy {
    pub fn holiday_hours(&self, weeks_active: u32) -> Decimal {
        round_hours(Decimal::from(weeks_active) * self.holiday_hours_per_week)
    }

    /// `(certified, uncertified)` shares of the annual caps.
    pub fn sick_entitlements(&self, weeks_active: u32) -> (Decimal, Decimal) {
        (
            self.prorate(self.sick_cert_annual_hours, weeks_active),
            self.prorate(self.sick_uncert_annual_hours, weeks_active),
        )
    }

    fn prorate(&self, annual_hours: Decimal, weeks_active: u32) -> Decimal {
        if weeks_active == 0 || self.proration_weeks == 0 {
            return zero_hours();
        }
        round_hours(annual_hours * Decimal::from(weeks_active) / Decimal::from(self.proration_weeks))
    }

    pub fn for_weeks(&self, weeks_active: u32) -> Entitlement {
        let (sick_cert_hours, sick_uncert_hours) = self.sick_entitlements(weeks_active);
        Entitlement {
            weeks_active,
            holiday_hours: self.holiday_hours(weeks_active),
            sick_cert_hours,
            sick_uncert_hours,
        }
    }

    /// End date assumed for a participant with no finish date.
    pub fn open_end_date(&self, active_start: NaiveDate, cycle: &ProjectCycle) -> NaiveDate {
        match self.open_end {
            OpenEndPolicy::CycleEnd => cycle.end_date,
            OpenEndPolicy::StandardTerm => active_start
                .checked_add_days(Days::new(u64::from(self.standard_term_weeks) * 7))
                .and_then(|d| d.checked_sub_days(Days::new(3)))
                .unwrap_or(cycle.end_date),
        }
    }

    pub fn participant_interval(&self, participant: &Participant, cycle: &ProjectCycle) -> DateInterval {
        participant.active_interval(self.open_end_date(participant.active_start, cycle))
    }

    pub fn active_weeks(&self, participant: &Participant, cycle: &ProjectCycle) -> u32 {
        compute_active_weeks(
            self.participant_interval(participant, cycle),
            cycle.interval(),
            self.week_counting,
        )
    }

    pub fn compute(&self, participant: &Participant, cycle: &ProjectCycle) -> Entitlement {
        self.for_weeks(self.active_weeks(participant, cycle))
    }
}

pub fn compute_active_weeks(
    participant_interval: DateInterval,
    cycle_interval: DateInterval,
    counting: WeekCounting,
) -> u32 {
    active_weeks(intersect(participant_interval, cycle_interval), counting)
}

/// `weeks * 1.56` hours.
pub fn holiday_hours(weeks_active: u32) -> Decimal {
    EntitlementPolicy::default().holiday_hours(weeks_active)
}

/// Shares of the 56 h certified and 8 h uncertified annual caps over 52 weeks.
pub fn sick_entitlements(weeks_active: u32) -> (Decimal, Decimal) {
    EntitlementPolicy::default().sick_entitlements(weeks_active)
}
