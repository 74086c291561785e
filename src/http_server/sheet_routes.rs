//! Customer Sheet HTTP Routes
//!
//! | Method | Path          | Operation |
//! |--------|---------------|-----------|
//! | GET    | `/sheet`      | list      |
//! | POST   | `/sheet`      | create    |
//! | GET    | `/sheet/:id`  | get       |
//! | PUT    | `/sheet/:id`  | update    |
//! | DELETE | `/sheet/:id`  | delete    |

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::record::Record;
use crate::store::{CustomerPayload, ListOutcome, ListQuery};

use super::errors::{ApiError, ApiResult};
use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create customer sheet routes
pub fn sheet_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sheet", get(list_handler).post(create_handler))
        .route(
            "/sheet/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))
}

async fn list_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<ListOutcome>> {
    let Query(params) = query.map_err(|r| ApiError::InvalidRequest(r.body_text()))?;
    let query = ListQuery::parse(&params)?;

    Ok(Json(state.store.list(&query).await?))
}

async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Record>> {
    Ok(Json(state.store.get(&id).await?))
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    state.store.create(body(payload)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Customer added successfully")),
    ))
}

async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    state.store.update(&id, body(payload)?).await?;
    Ok(Json(MessageResponse::new("Customer updated successfully")))
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.store.delete(&id).await?;
    Ok(Json(MessageResponse::new("Customer deleted successfully")))
}
