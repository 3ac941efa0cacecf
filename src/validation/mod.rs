pub mod cycle;
pub mod ledger;
pub mod participant;
pub mod scheme;

use validator::Validate;

use crate::error::AppError;

/// Runs the derived field rules of a request and folds every failure into one
/// `AppError::Validation`.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), AppError> {
    request.validate().map_err(|errors| {
        let mut details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Validation failed for field: {}", field));
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        details.sort();

        AppError::validation(format!(
            "Validation failed with {} errors: {}",
            details.len(),
            details.join("; ")
        ))
    })
}

/// Field rules shared by the request models
pub mod rules {
    use std::borrow::Cow;
    use validator::ValidationError;

    fn invalid(code: &'static str, message: &'static str) -> ValidationError {
        ValidationError::new(code).with_message(Cow::Borrowed(message))
    }

    /// Seven digits followed by one or two upper-case letters.
    pub fn validate_ppsn(ppsn: &str) -> Result<(), ValidationError> {
        let bytes = ppsn.as_bytes();
        let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
        let letters = &bytes[digits..];

        if digits != 7
            || letters.is_empty()
            || letters.len() > 2
            || !letters.iter().all(|b| b.is_ascii_uppercase())
        {
            return Err(invalid(
                "invalid_ppsn",
                "PPS Number is not valid, please check and re-enter.",
            ));
        }
        Ok(())
    }

    /// Strips all whitespace and upper-cases.
    pub fn normalize_iban(iban: &str) -> String {
        iban.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase()
    }

    /// Irish IBAN: `IE`, two check digits, four-letter bank code, fourteen digits.
    pub fn validate_iban(iban: &str) -> Result<(), ValidationError> {
        let cleaned = normalize_iban(iban);
        let bytes = cleaned.as_bytes();

        let valid = bytes.len() == 22
            && &bytes[..2] == b"IE"
            && bytes[2..4].iter().all(|b| b.is_ascii_digit())
            && bytes[4..8].iter().all(|b| b.is_ascii_uppercase())
            && bytes[8..].iter().all(|b| b.is_ascii_digit());

        if !valid {
            return Err(invalid(
                "invalid_iban",
                "IBAN is not valid, please check and re-enter.",
            ));
        }
        Ok(())
    }

    /// Empty is allowed; otherwise digits only.
    pub fn validate_phone_digits(phone: &str) -> Result<(), ValidationError> {
        if !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(
                "invalid_phone",
                "Enter a valid phone number (digits only).",
            ));
        }
        Ok(())
    }
}
