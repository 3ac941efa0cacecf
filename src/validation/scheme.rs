use std::collections::HashSet;

use crate::db::models::CreateSchemeRequest;
use crate::error::AppError;
use crate::validation::validate_request;

pub fn validate_create_scheme(req: &CreateSchemeRequest) -> Result<(), AppError> {
    validate_request(req)?;

    if req.departments_disabled && !req.new_departments.is_empty() {
        return Err(AppError::validation(
            "You cannot enter departments and also select 'We don't use departments'",
        ));
    }

    let mut seen = HashSet::new();
    for name in &req.new_departments {
        validate_department_name(name)?;
        if !seen.insert(name.trim().to_lowercase()) {
            return Err(AppError::validation(format!(
                "Department '{}' is listed twice",
                name.trim()
            )));
        }
    }
    Ok(())
}

pub fn validate_department_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Department name is required"));
    }
    if name.trim().chars().count() > 100 {
        return Err(AppError::validation(
            "Department name must be 100 characters or less",
        ));
    }
    Ok(())
}
