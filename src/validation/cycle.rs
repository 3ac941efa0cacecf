use chrono::{Datelike, NaiveDate, Weekday};

use crate::db::models::NewProjectCycle;
use crate::error::AppError;

pub fn validate_cycle_start(start_date: NaiveDate, expected: Weekday) -> Result<(), AppError> {
    let actual = start_date.weekday();
    if actual != expected {
        return Err(AppError::InvalidCycleStart {
            date: start_date,
            actual,
            expected,
        });
    }
    Ok(())
}

pub fn validate_create_cycle(req: &NewProjectCycle, expected: Weekday) -> Result<(), AppError> {
    if req.sequence_number <= 0 {
        return Err(AppError::validation("Project number must be positive"));
    }
    validate_cycle_start(req.start_date, expected)?;
    if let Some(end_date) = req.end_date {
        if end_date < req.start_date {
            return Err(AppError::validation(
                "Project end date cannot be before its start date",
            ));
        }
    }
    Ok(())
}
