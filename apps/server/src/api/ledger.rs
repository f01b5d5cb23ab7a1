use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use moneybook_core::{balances::BalanceDiscrepancy, settings::Settings};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReconcileReport {
    base_currency: String,
    consistent: bool,
    discrepancies: Vec<BalanceDiscrepancy>,
}

async fn reconcile(State(state): State<Arc<AppState>>) -> ApiResult<Json<ReconcileReport>> {
    let discrepancies = state.ledger_service.reconcile_balances()?;
    if !discrepancies.is_empty() {
        tracing::warn!(
            "Reconciliation found {} balance discrepancies",
            discrepancies.len()
        );
    }
    Ok(Json(ReconcileReport {
        base_currency: state.ledger_service.base_currency().to_string(),
        consistent: discrepancies.is_empty(),
        discrepancies,
    }))
}

async fn get_settings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Settings>> {
    Ok(Json(state.settings_service.get_settings()?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ledger/reconcile", get(reconcile))
        .route("/settings", get(get_settings))
}
