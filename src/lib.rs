pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod utils;
pub mod validation;

pub use crate::error::{AppError, AppResult};
pub use crate::services::cycles_service::derive_cycle;
pub use crate::services::ledger_service::aggregate_ledger;
pub use crate::services::summaries_service::{remaining_holiday, remaining_sick};

use crate::config::Config;
use tracing::Level;

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level = logging.level.parse::<Level>().unwrap_or(Level::INFO);

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => {
            builder.json().init();
        }
        _ => {
            builder.init();
        }
    }
}
