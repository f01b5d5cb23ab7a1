use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use super::settings_model::Settings;
use super::settings_traits::SettingsRepositoryTrait;
use crate::constants::{BASE_CURRENCY_SETTING_KEY, DEFAULT_BASE_CURRENCY};
use crate::errors::{Error, Result};
use crate::utils::currency_utils::{normalize_currency, validate_currency};

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;

    /// The stored base currency, if one was ever recorded.
    fn get_base_currency(&self) -> Result<Option<String>>;

    /// Determines the base currency for this ledger and persists it.
    ///
    /// A stored value always wins over `configured`: exchange fees already
    /// booked were debited in that currency, and reversing them later must
    /// hit the same balance.
    async fn resolve_base_currency(&self, configured: Option<&str>) -> Result<String>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        self.settings_repository.get_settings()
    }

    fn get_base_currency(&self) -> Result<Option<String>> {
        self.settings_repository
            .get_setting(BASE_CURRENCY_SETTING_KEY)
    }

    async fn resolve_base_currency(&self, configured: Option<&str>) -> Result<String> {
        let configured = configured
            .map(normalize_currency)
            .filter(|code| !code.is_empty());

        if let Some(stored) = self.get_base_currency()? {
            if let Some(requested) = configured.as_deref() {
                if requested != stored {
                    warn!(
                        "Configured base currency {} ignored; ledger already uses {}",
                        requested, stored
                    );
                }
            }
            debug!("Using stored base currency {}", stored);
            return Ok(stored);
        }

        let base_currency = configured.unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string());
        validate_currency(&base_currency, BASE_CURRENCY_SETTING_KEY).map_err(|e| {
            Error::InvalidConfigValue(format!(
                "base currency '{}' is not valid: {}",
                base_currency, e
            ))
        })?;

        self.settings_repository
            .update_setting(BASE_CURRENCY_SETTING_KEY, &base_currency)
            .await?;
        info!("Base currency set to {}", base_currency);
        Ok(base_currency)
    }
}
