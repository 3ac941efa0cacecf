use crate::utils::DateInterval;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Project cycle models
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectCycle {
    pub id: Uuid,
    pub scheme_id: Uuid,
    pub sequence_number: i32,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ProjectCycle {
    pub fn interval(&self) -> DateInterval {
        DateInterval::new(self.start_date, self.end_date)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct NewProjectCycle {
    pub sequence_number: i32,
    pub start_date: chrono::NaiveDate,
    /// Derived from `start_date` when absent.
    pub end_date: Option<chrono::NaiveDate>,
}
