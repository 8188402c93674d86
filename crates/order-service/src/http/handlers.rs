//! Route handlers. Each one extracts its inputs, calls a service or the order store,
//! and maps the result to a response.

use super::{ApiError, AppState};
use crate::model::{OrderId, ProductId, UserId};
use crate::response::{CartItemResponse, OrderResponse};
use crate::service::Checkout;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

pub const USER_ID_HEADER: &str = "X-User-ID";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn user_id(headers: &HeaderMap) -> Result<UserId, ApiError> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(UserId::from)
        .ok_or(ApiError::MissingUserId)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = user_id(&headers)?;
    let product_id = ProductId::from(request.product_id);
    state
        .carts
        .add_to_cart(&user_id, &product_id, request.quantity)
        .await?;
    Ok(Json(MessageResponse {
        message: "Item added to cart".to_string(),
    }))
}

pub async fn get_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<CartItemResponse>>, ApiError> {
    let user_id = user_id(&headers)?;
    Ok(Json(state.carts.get_cart(&user_id).await?))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = user_id(&headers)?;
    let product_id = ProductId::from(product_id);
    if state.carts.remove_from_cart(&user_id, &product_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::CartItemNotFound(product_id))
    }
}

pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let user_id = user_id(&headers)?;
    match state.checkout.create_order(&user_id).await? {
        Checkout::Placed(receipt) => Ok((
            StatusCode::CREATED,
            Json(OrderResponse::from(&receipt.order)),
        )),
        Checkout::EmptyCart => Err(ApiError::EmptyCart),
    }
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = id.parse().map_err(|_| ApiError::OrderNotFound(id.clone()))?;
    state
        .orders
        .find_by_id(order_id)
        .await?
        .map(|order| Json(OrderResponse::from(&order)))
        .ok_or(ApiError::OrderNotFound(id))
}

pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.orders.list_all().await?;
    Ok(Json(orders.iter().map(OrderResponse::from).collect()))
}

pub async fn list_user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.orders.find_by_user(&UserId::from(user_id)).await?;
    Ok(Json(orders.iter().map(OrderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_user_id_header() {
        let mut headers = HeaderMap::new();
        assert!(matches!(user_id(&headers), Err(ApiError::MissingUserId)));

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("  "));
        assert!(matches!(user_id(&headers), Err(ApiError::MissingUserId)));

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("U1"));
        assert_eq!(user_id(&headers).unwrap(), UserId::from("U1"));
    }
}
