//! Shared configuration and record types for CryptoPulse.

pub mod accounts;
pub mod app_config;
pub mod config;
pub mod error;
pub mod records;

pub use accounts::{
    default_accounts, load_accounts, AccountsFile, TrackedAccount, DEFAULT_USERNAMES,
};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use records::{CreatedAt, RawRecord};
