use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::db::models::{CreateParticipantRequest, ProjectCycle};
use crate::error::AppError;
use crate::services::cycles_service::{CYCLE_TAIL_DAYS, CyclePolicy};
use crate::validation::validate_request;

/// Which cycle a participant's start date falls in, relative to the
/// scheme's current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPlacement {
    CurrentCycle,
    NextCycle,
}

pub fn validate_create_participant(
    req: &CreateParticipantRequest,
    today: NaiveDate,
) -> Result<(), AppError> {
    validate_request(req)?;
    validate_birth_date(req.birth_date, today)?;
    validate_active_dates(req.active_start, req.active_end)
}

pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    if birth_date > today {
        return Err(AppError::validation("Birth date cannot be in the future"));
    }
    Ok(())
}

pub fn validate_active_dates(
    active_start: NaiveDate,
    active_end: Option<NaiveDate>,
) -> Result<(), AppError> {
    if let Some(end) = active_end {
        if end < active_start {
            return Err(AppError::validation(
                "Scheme finish date cannot be before the scheme start date",
            ));
        }
    }
    Ok(())
}

/// A participant may start in the current cycle or the one after it, and
/// always on the cycle weekday. The current window uses the cycle's stored
/// end date; only the next cycle is derived.
pub fn validate_participant_start(
    participant_start: NaiveDate,
    cycle: &ProjectCycle,
    policy: &CyclePolicy,
) -> Result<StartPlacement, AppError> {
    let next_start = cycle
        .end_date
        .checked_add_days(Days::new(CYCLE_TAIL_DAYS))
        .ok_or_else(|| AppError::validation("Next project start out of range"))?;
    let next_end = policy.end_date(next_start)?;

    let placement = if cycle.start_date <= participant_start && participant_start <= cycle.end_date {
        StartPlacement::CurrentCycle
    } else if next_start <= participant_start && participant_start <= next_end {
        StartPlacement::NextCycle
    } else {
        return Err(AppError::validation(format!(
            "Participant start date {} is outside the current ({} to {}) and next ({} to {}) projects",
            participant_start, cycle.start_date, cycle.end_date, next_start, next_end
        )));
    };

    if participant_start.weekday() != policy.start_weekday {
        return Err(AppError::validation(format!(
            "Participant must start on a {}",
            policy.start_weekday
        )));
    }

    Ok(placement)
}
