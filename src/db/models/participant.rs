use crate::utils::DateInterval;
use crate::validation::rules::{validate_iban, validate_phone_digits, validate_ppsn};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Participant models
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Participant {
    pub id: Uuid,
    pub scheme_id: Uuid,
    pub department_id: Option<Uuid>,
    pub ppsn: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: String,
    pub phone: Option<String>,
    pub email: String,
    pub emerg_phone: Option<String>,
    /// Normalized: no whitespace, upper case.
    pub bank_iban: String,
    pub active_start: NaiveDate,
    /// `None` while the participant is still on the scheme.
    pub active_end: Option<NaiveDate>,
    pub manual_handling_date: Option<NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Participant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in completed years on `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let had_birthday =
            (today.month(), today.day()) >= (self.birth_date.month(), self.birth_date.day());
        today.year() - self.birth_date.year() - if had_birthday { 0 } else { 1 }
    }

    /// Active range with an open end replaced by `open_end`.
    pub fn active_interval(&self, open_end: NaiveDate) -> DateInterval {
        DateInterval::new(self.active_start, self.active_end.unwrap_or(open_end))
    }
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateParticipantRequest {
    #[validate(custom(function = "validate_ppsn"))]
    pub ppsn: String,

    #[validate(length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"))]
    pub last_name: String,

    pub department_id: Option<Uuid>,

    pub birth_date: NaiveDate,

    #[validate(length(min = 1, max = 200, message = "Address is required"))]
    pub address: String,

    #[validate(custom(function = "validate_phone_digits"))]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_phone_digits"))]
    pub emerg_phone: Option<String>,

    #[validate(custom(function = "validate_iban"))]
    pub bank_iban: String,

    pub active_start: NaiveDate,
    pub active_end: Option<NaiveDate>,
    pub manual_handling_date: Option<NaiveDate>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UpdateParticipantDatesRequest {
    pub active_start: NaiveDate,
    pub active_end: Option<NaiveDate>,
    pub manual_handling_date: Option<NaiveDate>,
}
