use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    services::cart_service::{CartError, OperationError, UpdateProductAmount},
    AppState,
};

fn status_for(err: &CartError) -> StatusCode {
    match err {
        CartError::StockUnavailable { .. } => StatusCode::CONFLICT,
        CartError::ProductNotFound(_) => StatusCode::NOT_FOUND,
        CartError::InvalidQuantity(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CartError::Network(_) => StatusCode::BAD_GATEWAY,
        CartError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure(err: OperationError) -> Response {
    let body = json!({
        "error": err.user_message(),
        "kind": err.source.kind(),
        "operation": err.operation.to_string(),
    });
    (status_for(&err.source), Json(body)).into_response()
}

async fn cart_snapshot(state: &AppState) -> Response {
    (StatusCode::OK, Json(state.cart.summary().await)).into_response()
}

// GET /cart
pub async fn get_cart(State(state): State<AppState>) -> Response {
    cart_snapshot(&state).await
}

// POST /cart/:id
pub async fn post_add_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Response {
    match state.cart.add_product(product_id).await {
        Ok(()) => cart_snapshot(&state).await,
        Err(e) => failure(e),
    }
}

// DELETE /cart/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Response {
    match state.cart.remove_product(product_id).await {
        Ok(()) => cart_snapshot(&state).await,
        Err(e) => failure(e),
    }
}

#[derive(Deserialize)]
pub struct AmountForm {
    pub amount: i64,
}

// PUT /cart/:id  {"amount": n}
pub async fn put_product_amount(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(form): Json<AmountForm>,
) -> Response {
    let update = UpdateProductAmount {
        product_id,
        amount: form.amount,
    };

    match state.cart.update_product_amount(update).await {
        Ok(()) => cart_snapshot(&state).await,
        Err(e) => failure(e),
    }
}
