use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Materialized entitlement and usage for one (participant, cycle) pair.
///
/// `*_entitled` fields are derived from the participant's overlap with the
/// cycle and may be overwritten at any time. `*_taken` and `holiday_hours_in_lieu`
/// mirror the ledger and are only ever written by the ledger refresh.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EntitlementSummary {
    pub participant_id: Uuid,
    pub cycle_id: Uuid,
    pub weeks_active: u32,
    pub holiday_hours_entitled: Decimal,
    pub holiday_hours_taken: Decimal,
    pub holiday_hours_in_lieu: Decimal,
    pub sick_cert_hours_entitled: Decimal,
    pub sick_cert_hours_taken: Decimal,
    pub sick_uncert_hours_entitled: Decimal,
    pub sick_uncert_hours_taken: Decimal,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl EntitlementSummary {
    pub fn key(&self) -> (Uuid, Uuid) {
        (self.participant_id, self.cycle_id)
    }
}
