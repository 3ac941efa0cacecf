use crate::db::enums::County;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Scheme models
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Scheme {
    pub id: Uuid,
    pub name: String,
    pub app_code: String,
    pub gov_code: String,
    pub county: County,
    pub address: String,
    pub current_cycle_id: Option<Uuid>,
    pub departments_disabled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateSchemeRequest {
    #[validate(length(min = 1, max = 100, message = "Scheme name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 20, message = "Official DSP code must be between 1 and 20 characters"))]
    pub gov_code: String,

    pub county: County,

    #[validate(length(min = 1, max = 200, message = "Scheme address is required"))]
    pub address: String,

    #[serde(default)]
    pub departments_disabled: bool,

    /// Department names to create alongside the scheme.
    #[serde(default)]
    pub new_departments: Vec<String>,
}
