use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::db::models::NewLedgerEvent;
use crate::error::AppError;
use crate::utils::hours::HOURS_SCALE;

/// Largest magnitude a single ledger event may carry.
pub const MAX_EVENT_HOURS: Decimal = dec!(1000);

pub fn validate_new_event(req: &NewLedgerEvent) -> Result<(), AppError> {
    validate_event_hours(req.hours)?;
    if req.note.len() > 500 {
        return Err(AppError::validation("Note must be 500 characters or less"));
    }
    Ok(())
}

/// Non-zero, at most two decimal places, within `MAX_EVENT_HOURS` either way.
pub fn validate_event_hours(hours: Decimal) -> Result<(), AppError> {
    if hours.is_zero() {
        return Err(AppError::ZeroHoursEvent);
    }
    if hours.normalize().scale() > HOURS_SCALE {
        return Err(AppError::validation(
            "Hours can have at most two decimal places",
        ));
    }
    if hours.abs() > MAX_EVENT_HOURS {
        return Err(AppError::validation(format!(
            "A single entry cannot exceed {} hours",
            MAX_EVENT_HOURS
        )));
    }
    Ok(())
}
