use crate::db::enums::LedgerKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Ledger models
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LedgerEvent {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub cycle_id: Uuid,
    pub date: chrono::NaiveDate,
    /// Negative consumes time, positive credits it.
    pub hours: Decimal,
    pub kind: LedgerKind,
    #[serde(default)]
    pub note: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct NewLedgerEvent {
    pub participant_id: Uuid,
    pub cycle_id: Uuid,
    pub date: chrono::NaiveDate,
    pub hours: Decimal,
    pub kind: LedgerKind,
    #[serde(default)]
    pub note: String,
}
