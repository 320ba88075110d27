use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Accounts tracked when no accounts file is configured.
pub const DEFAULT_USERNAMES: &[&str] = &[
    "cz_binance",
    "elonmusk",
    "jack",
    "saylor",
    "VitalikButerin",
    "michael_saylor",
];

/// Longest handle the platform allows.
const MAX_USERNAME_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedAccount {
    pub username: String,
    /// Free-form display label for reports.
    #[serde(default)]
    pub label: Option<String>,
}

impl TrackedAccount {
    #[must_use]
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            label: None,
        }
    }

    /// Label if set, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountsFile {
    pub accounts: Vec<TrackedAccount>,
}

impl AccountsFile {
    #[must_use]
    pub fn usernames(&self) -> Vec<&str> {
        self.accounts.iter().map(|a| a.username.as_str()).collect()
    }
}

/// The built-in account list.
#[must_use]
pub fn default_accounts() -> AccountsFile {
    AccountsFile {
        accounts: DEFAULT_USERNAMES
            .iter()
            .map(|u| TrackedAccount::new(u))
            .collect(),
    }
}

/// Load and validate the tracked-accounts configuration from a YAML file.
///
/// A leading `@` on a username is stripped.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_accounts(path: &Path) -> Result<AccountsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AccountsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut accounts_file: AccountsFile = serde_yaml::from_str(&content)?;
    for account in &mut accounts_file.accounts {
        account.username = account.username.trim().trim_start_matches('@').to_string();
    }

    validate_accounts(&accounts_file)?;

    Ok(accounts_file)
}

fn validate_accounts(accounts_file: &AccountsFile) -> Result<(), ConfigError> {
    if accounts_file.accounts.is_empty() {
        return Err(ConfigError::Validation(
            "at least one account must be listed".to_string(),
        ));
    }

    let mut seen = HashSet::new();

    for account in &accounts_file.accounts {
        let username = &account.username;
        if username.is_empty() {
            return Err(ConfigError::Validation(
                "account username must be non-empty".to_string(),
            ));
        }

        if username.chars().count() > MAX_USERNAME_LEN
            || !username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::Validation(format!(
                "invalid username '{username}'; expected 1-{MAX_USERNAME_LEN} letters, digits or underscores"
            )));
        }

        if !seen.insert(username.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate account: '{username}'"
            )));
        }
    }

    Ok(())
}
