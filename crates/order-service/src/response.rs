//! Externally visible shapes of carts and orders.
//!
//! Ids are rendered in their display form (`order_3`, `cart_item_7`) and money as
//! decimal strings, so clients never see binary floating point.

use crate::model::{CartItem, Order, OrderLineItem};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl From<&CartItem> for CartItemResponse {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            product_id: item.product_id.to_string(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: u32,
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl From<&OrderLineItem> for OrderItemResponse {
    fn from(item: &OrderLineItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id.to_string(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub total_amount: Decimal,
    pub status: String,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            user_id: order.user_id.to_string(),
            total_amount: order.total_amount(),
            status: order.status.to_string(),
            items: order.items().iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
