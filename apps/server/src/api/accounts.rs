use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use moneybook_core::{
    accounts::{Account, NewAccount},
    balances::AccountBalance,
    utils::currency_utils::normalize_currency,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ApiJson;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListAccountsQuery {
    is_active: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BalanceResponse {
    account_id: String,
    currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
}

async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAccountsQuery>,
) -> ApiResult<Json<Vec<Account>>> {
    let accounts = state.account_service.list_accounts(query.is_active)?;
    Ok(Json(accounts))
}

async fn create_account(
    State(state): State<Arc<AppState>>,
    ApiJson(new_account): ApiJson<NewAccount>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let account = state.account_service.create_account(new_account).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn get_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Account>> {
    Ok(Json(state.account_service.get_account(&id)?))
}

async fn delete_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.account_service.delete_account(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_account_balances(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AccountBalance>>> {
    let balances = state.ledger_service.get_account_balances(&id)?;
    Ok(Json(balances))
}

async fn get_account_balance(
    Path((id, currency)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BalanceResponse>> {
    let amount = state.ledger_service.get_account_balance(&id, &currency)?;
    Ok(Json(BalanceResponse {
        account_id: id,
        currency: normalize_currency(&currency),
        amount,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{id}", get(get_account).delete(delete_account))
        .route("/accounts/{id}/balances", get(get_account_balances))
        .route(
            "/accounts/{id}/balances/{currency}",
            get(get_account_balance),
        )
}
