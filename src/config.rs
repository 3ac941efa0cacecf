use crate::error::{AppError, AppResult};
use crate::services::cycles_service::CyclePolicy;
use crate::services::entitlement_service::{EntitlementPolicy, OpenEndPolicy};
use crate::utils::WeekCounting;
use chrono::Weekday;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,

    #[serde(default = "default_cycle_weeks")]
    pub cycle_weeks: u32,
    #[serde(default = "default_cycle_start_weekday")]
    pub cycle_start_weekday: String,

    #[serde(default = "default_holiday_hours_per_week")]
    pub holiday_hours_per_week: String,
    #[serde(default = "default_sick_cert_annual_hours")]
    pub sick_cert_annual_hours: String,
    #[serde(default = "default_sick_uncert_annual_hours")]
    pub sick_uncert_annual_hours: String,
    #[serde(default = "default_proration_weeks")]
    pub proration_weeks: u32,
    #[serde(default = "default_week_counting")]
    pub week_counting: String,
    #[serde(default = "default_open_end_policy")]
    pub open_end_policy: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_cycle_weeks() -> u32 {
    52
}
fn default_cycle_start_weekday() -> String {
    "monday".to_string()
}
fn default_holiday_hours_per_week() -> String {
    "1.56".to_string()
}
fn default_sick_cert_annual_hours() -> String {
    "56".to_string()
}
fn default_sick_uncert_annual_hours() -> String {
    "8".to_string()
}
fn default_proration_weeks() -> u32 {
    52
}
fn default_week_counting() -> String {
    "inclusive".to_string()
}
fn default_open_end_policy() -> String {
    "cycle_end".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            cycle_weeks: default_cycle_weeks(),
            cycle_start_weekday: default_cycle_start_weekday(),
            holiday_hours_per_week: default_holiday_hours_per_week(),
            sick_cert_annual_hours: default_sick_cert_annual_hours(),
            sick_uncert_annual_hours: default_sick_uncert_annual_hours(),
            proration_weeks: default_proration_weeks(),
            week_counting: default_week_counting(),
            open_end_policy: default_open_end_policy(),
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.cycle_weeks == 0 {
            return Err(AppError::Config("CYCLE_WEEKS must be > 0".to_string()));
        }

        if self.proration_weeks == 0 {
            return Err(AppError::Config("PRORATION_WEEKS must be > 0".to_string()));
        }

        if !matches!(self.log_format.as_str(), "json" | "pretty") {
            return Err(AppError::Config(format!(
                "LOG_FORMAT must be 'json' or 'pretty', got '{}'",
                self.log_format
            )));
        }

        // Building the policies runs every remaining parse check.
        self.cycle_policy()?;
        self.entitlement_policy()?;
        Ok(())
    }

    pub fn cycle_policy(&self) -> AppResult<CyclePolicy> {
        let start_weekday = Weekday::from_str(self.cycle_start_weekday.trim()).map_err(|_| {
            AppError::Config(format!(
                "CYCLE_START_WEEKDAY is not a weekday: '{}'",
                self.cycle_start_weekday
            ))
        })?;

        Ok(CyclePolicy {
            weeks: self.cycle_weeks,
            start_weekday,
        })
    }

    pub fn entitlement_policy(&self) -> AppResult<EntitlementPolicy> {
        let week_counting = WeekCounting::from_str(&self.week_counting)
            .map_err(|e| AppError::Config(format!("WEEK_COUNTING: {}", e)))?;
        let open_end = OpenEndPolicy::from_str(&self.open_end_policy)
            .map_err(|e| AppError::Config(format!("OPEN_END_POLICY: {}", e)))?;

        Ok(EntitlementPolicy {
            holiday_hours_per_week: parse_hours("HOLIDAY_HOURS_PER_WEEK", &self.holiday_hours_per_week)?,
            sick_cert_annual_hours: parse_hours("SICK_CERT_ANNUAL_HOURS", &self.sick_cert_annual_hours)?,
            sick_uncert_annual_hours: parse_hours(
                "SICK_UNCERT_ANNUAL_HOURS",
                &self.sick_uncert_annual_hours,
            )?,
            proration_weeks: self.proration_weeks,
            week_counting,
            open_end,
            standard_term_weeks: self.cycle_weeks,
        })
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
        }
    }
}

fn parse_hours(key: &str, raw: &str) -> AppResult<Decimal> {
    let value = Decimal::from_str(raw.trim())
        .map_err(|e| AppError::Config(format!("{} is not a decimal ('{}'): {}", key, raw, e)))?;
    if value.is_sign_negative() {
        return Err(AppError::Config(format!("{} must not be negative", key)));
    }
    Ok(value)
}
