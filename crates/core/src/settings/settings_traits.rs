//! Repository traits for settings.

use async_trait::async_trait;

use super::settings_model::Settings;
use crate::errors::Result;

/// Repository trait for managing application settings.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get all settings, falling back to defaults for missing keys.
    fn get_settings(&self) -> Result<Settings>;

    /// Get a single setting value by key. Returns None if not stored.
    fn get_setting(&self, setting_key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a single setting.
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}
