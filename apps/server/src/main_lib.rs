use std::sync::Arc;

use crate::config::Config;
use moneybook_core::{
    accounts::{AccountService, AccountServiceTrait},
    ledger::{LedgerService, LedgerServiceTrait},
    settings::{SettingsService, SettingsServiceTrait},
};
use moneybook_storage_sqlite::{
    accounts::AccountRepository, balances::BalanceRepository, db, ledger::SqliteLedgerExecutor,
    movements::MovementRepository, settings::SettingsRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("MB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let settings_repository = Arc::new(SettingsRepository::new(pool.clone(), writer.clone()));
    let settings_service = Arc::new(SettingsService::new(settings_repository));
    let base_currency = settings_service
        .resolve_base_currency(config.base_currency.as_deref())
        .await?;
    tracing::info!("Ledger base currency: {}", base_currency);

    let account_repository = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let account_service = Arc::new(AccountService::new(account_repository.clone()));

    let ledger_service = Arc::new(LedgerService::new(
        SqliteLedgerExecutor::new(writer),
        Arc::new(BalanceRepository::new(pool.clone())),
        Arc::new(MovementRepository::new(pool.clone())),
        account_repository,
        base_currency,
    ));

    Ok(Arc::new(AppState {
        account_service,
        ledger_service,
        settings_service,
    }))
}
