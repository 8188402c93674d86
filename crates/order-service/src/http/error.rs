//! HTTP error responses.
//!
//! Every failure is answered with a JSON body:
//!
//! ```json
//! { "error": "INSUFFICIENT_STOCK", "message": "...", "code": 400, "timestamp": "..." }
//! ```

use crate::cart_actor::CartError;
use crate::model::ProductId;
use crate::order_actor::OrderError;
use crate::service::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("X-User-ID header is required")]
    MissingUserId,

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Product {0} is not in the cart")]
    CartItemNotFound(ProductId),

    #[error("Cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        Self::Service(ServiceError::Order(e))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::MissingUserId => (StatusCode::BAD_REQUEST, "MISSING_USER_ID"),
            Self::OrderNotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
            Self::CartItemNotFound(_) => (StatusCode::NOT_FOUND, "CART_ITEM_NOT_FOUND"),
            Self::EmptyCart => (StatusCode::BAD_REQUEST, "EMPTY_CART"),
            Self::Service(e) => match e {
                ServiceError::UserNotFound(_) => (StatusCode::BAD_REQUEST, "USER_NOT_FOUND"),
                ServiceError::ProductNotFound(_) => (StatusCode::BAD_REQUEST, "PRODUCT_NOT_FOUND"),
                ServiceError::InsufficientStock { .. } => {
                    (StatusCode::BAD_REQUEST, "INSUFFICIENT_STOCK")
                }
                ServiceError::InvalidQuantity(_) => (StatusCode::BAD_REQUEST, "INVALID_QUANTITY"),
                ServiceError::Unavailable { .. } => {
                    (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
                }
                ServiceError::Cart(CartError::ActorCommunicationError(_)) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR")
                }
                ServiceError::Cart(_) => (StatusCode::BAD_REQUEST, "INVALID_CART_ITEM"),
                ServiceError::Order(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "Request failed");
        }

        let body = ErrorResponse {
            error: kind.to_string(),
            message: self.to_string(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupError;
    use std::time::Duration;

    fn status(e: impl Into<ApiError>) -> StatusCode {
        e.into().into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status(ApiError::MissingUserId), StatusCode::BAD_REQUEST);
        assert_eq!(status(ApiError::EmptyCart), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(ApiError::OrderNotFound("order_9".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(ServiceError::ProductNotFound(ProductId::from("P9"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ServiceError::Unavailable {
                service: "product",
                source: LookupError::Timeout(Duration::from_millis(10)),
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(ServiceError::Cart(CartError::ActorCommunicationError(
                "Actor closed".into()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(OrderError::ActorCommunicationError("Actor closed".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
