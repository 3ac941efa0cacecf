use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::cycles_service::CyclePolicy;
use crate::services::entitlement_service::EntitlementPolicy;

/// Calculation rules shared by every request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Policies {
    pub cycle: CyclePolicy,
    pub entitlement: EntitlementPolicy,
}

impl Policies {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self {
            cycle: config.cycle_policy()?,
            entitlement: config.entitlement_policy()?,
        })
    }
}

/// Everything a service call is scoped to: the scheme being administered,
/// the acting user, the calendar day and the calculation rules.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub scheme_id: Uuid,
    pub user_id: Option<Uuid>,
    pub today: NaiveDate,
    pub policies: Policies,
}

impl RequestContext {
    pub fn new(scheme_id: Uuid, policies: Policies) -> Self {
        Self {
            scheme_id,
            user_id: None,
            today: chrono::Utc::now().date_naive(),
            policies,
        }
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn on(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}
