//! Settings module - persistent key/value ledger settings.

mod settings_model;
mod settings_service;
mod settings_traits;


pub use settings_model::Settings;
pub use settings_service::{SettingsService, SettingsServiceTrait};
pub use settings_traits::SettingsRepositoryTrait;
