use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use moneybook_core::movements::{ExchangeDirection, Movement, NewMovement};
use serde::{Deserialize, Serialize};

use super::ApiJson;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListMovementsQuery {
    account_id: Option<String>,
}

/// A movement as returned to clients; exchanges carry their direction
/// against the ledger's base currency.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MovementResponse {
    #[serde(flatten)]
    movement: Movement,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<ExchangeDirection>,
}

impl MovementResponse {
    fn new(movement: Movement, base_currency: &str) -> Self {
        let direction = movement.exchange_direction(base_currency);
        Self {
            movement,
            direction,
        }
    }
}

async fn list_movements(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListMovementsQuery>,
) -> ApiResult<Json<Vec<MovementResponse>>> {
    let base_currency = state.ledger_service.base_currency();
    let movements = state
        .ledger_service
        .list_movements(query.account_id.as_deref())?
        .into_iter()
        .map(|movement| MovementResponse::new(movement, base_currency))
        .collect();
    Ok(Json(movements))
}

async fn create_movement(
    State(state): State<Arc<AppState>>,
    ApiJson(new_movement): ApiJson<NewMovement>,
) -> ApiResult<(StatusCode, Json<MovementResponse>)> {
    let movement = state.ledger_service.insert_movement(new_movement).await?;
    Ok((
        StatusCode::CREATED,
        Json(MovementResponse::new(
            movement,
            state.ledger_service.base_currency(),
        )),
    ))
}

async fn get_movement(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MovementResponse>> {
    let movement = state.ledger_service.get_movement(&id)?;
    Ok(Json(MovementResponse::new(
        movement,
        state.ledger_service.base_currency(),
    )))
}

async fn update_movement(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(new_movement): ApiJson<NewMovement>,
) -> ApiResult<Json<MovementResponse>> {
    let movement = state
        .ledger_service
        .update_movement(&id, new_movement)
        .await?;
    Ok(Json(MovementResponse::new(
        movement,
        state.ledger_service.base_currency(),
    )))
}

async fn delete_movement(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.ledger_service.delete_movement(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movements", get(list_movements).post(create_movement))
        .route(
            "/movements/{id}",
            get(get_movement).put(update_movement).delete(delete_movement),
        )
}
