use crate::model::{OrderId, ProductId, UserId};
use crate::order_actor::OrderError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchased product, frozen at the price seen during checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItem {
    /// Position within the order, starting at 1.
    pub id: u32,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLineItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A persisted order.
///
/// Orders are append-only. `items` and `total_amount` are private so the total can
/// only ever be the sum of the line totals it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    items: Vec<OrderLineItem>,
    total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order about to be placed.
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Payload for inserting an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub status: OrderStatus,
    pub lines: Vec<NewOrderLine>,
}

impl Order {
    /// Builds an order from its assigned id, numbering the lines in the given order.
    ///
    /// # Errors
    /// `EmptyOrder` when there are no lines, `InvalidLine` for a zero quantity or a
    /// negative price.
    pub fn new(id: OrderId, new: NewOrder) -> Result<Self, OrderError> {
        if new.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let items = new
            .lines
            .into_iter()
            .zip(1u32..)
            .map(|(line, position)| {
                if line.quantity == 0 || line.unit_price.is_sign_negative() {
                    return Err(OrderError::InvalidLine(line.product_id));
                }
                Ok(OrderLineItem {
                    id: position,
                    product_id: line.product_id,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total_amount: Decimal = items.iter().map(OrderLineItem::line_total).sum();
        let now = Utc::now();

        Ok(Self {
            id,
            user_id: new.user_id,
            items,
            total_amount,
            status: new.status,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn items(&self) -> &[OrderLineItem] {
        &self.items
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }
}
