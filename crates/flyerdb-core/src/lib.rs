pub mod app_config;
pub mod config;
pub mod flyers;
pub mod records;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use flyers::{FlyerDate, FlyerPage, PricedItem};
pub use records::{BestPriceRecord, PriceKind, RecordKey, PER_LB_SUFFIX};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid price kind: {0}")]
    InvalidPriceKind(String),

    #[error("invalid flyer date \"{0}\": expected YYYY-MM-DD")]
    InvalidFlyerDate(String),

    #[error("malformed record key \"{key}\": {reason}")]
    MalformedRecordKey { key: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
