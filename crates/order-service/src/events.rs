//! # Order Events
//!
//! "Order created" notifications and the in-process channel that carries them.
//!
//! Publishing is best-effort: checkout bounds it with a timeout, logs a failure and
//! moves on. [`spawn_notification_listener`] is the downstream consumer; it only logs
//! what it receives.

use crate::model::{Order, OrderStatus};
use crate::response::OrderItemResponse;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedEvent {
    pub order_id: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItemResponse>,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderCreatedEvent {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id.to_string(),
            user_id: order.user_id.to_string(),
            status: order.status,
            items: order.items().iter().map(OrderItemResponse::from).collect(),
            total_amount: order.total_amount(),
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PublishError {
    #[error("no subscriber is listening for order events")]
    NoSubscribers,

    #[error("publishing failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: OrderCreatedEvent) -> Result<(), PublishError>;
}

/// Fans events out to every subscriber of a broadcast channel.
#[derive(Clone)]
pub struct BroadcastPublisher {
    sender: broadcast::Sender<OrderCreatedEvent>,
}

impl BroadcastPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderCreatedEvent> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl EventPublisher for BroadcastPublisher {
    async fn publish(&self, event: OrderCreatedEvent) -> Result<(), PublishError> {
        let order_id = event.order_id.clone();
        let receivers = self
            .sender
            .send(event)
            .map_err(|_| PublishError::NoSubscribers)?;
        debug!(%order_id, receivers, "Order event published");
        Ok(())
    }
}

/// Consumes order events until every publisher is gone.
pub fn spawn_notification_listener(
    mut events: broadcast::Receiver<OrderCreatedEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Notification listener started");
        loop {
            match events.recv().await {
                Ok(event) => {
                    info!(
                        order_id = %event.order_id,
                        user_id = %event.user_id,
                        status = %event.status,
                        items = event.items.len(),
                        total = %event.total_amount,
                        "Received order event"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Notification listener fell behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        info!("Notification listener stopped");
    })
}
