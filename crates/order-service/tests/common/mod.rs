//! In-memory collaborators shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use order_service::clients::{CartClient, OrderClient};
use order_service::events::{EventPublisher, OrderCreatedEvent, PublishError};
use order_service::lookup::{
    CallPolicy, LookupError, ProductCatalog, ProductRecord, UserDirectory, UserRecord,
};
use order_service::model::{ProductId, UserId};
use order_service::service::{CartService, CheckoutOptions, CheckoutService, UserLocks};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn price(text: &str) -> Decimal {
    text.parse().unwrap()
}

/// Short timeouts so failure paths finish quickly.
pub fn fast_policy() -> CallPolicy {
    CallPolicy {
        timeout: Duration::from_millis(50),
        attempts: 2,
        backoff: Duration::from_millis(1),
    }
}

#[derive(Default)]
pub struct Directory {
    users: Mutex<HashMap<UserId, UserRecord>>,
}

impl Directory {
    pub fn with_users(ids: &[&str]) -> Self {
        let directory = Self::default();
        for id in ids {
            directory.users.lock().unwrap().insert(
                UserId::from(*id),
                UserRecord {
                    id: UserId::from(*id),
                    name: format!("User {id}"),
                },
            );
        }
        directory
    }
}

#[async_trait]
impl UserDirectory for Directory {
    async fn get_user(&self, id: &UserId) -> Result<Option<UserRecord>, LookupError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }
}

#[derive(Default)]
pub struct Catalog {
    products: Mutex<HashMap<ProductId, ProductRecord>>,
}

impl Catalog {
    pub fn add(&self, id: &str, unit_price: &str, stock: u32) {
        self.products.lock().unwrap().insert(
            ProductId::from(id),
            ProductRecord {
                id: ProductId::from(id),
                name: format!("Product {id}"),
                price: price(unit_price),
                stock_quantity: stock,
            },
        );
    }

    pub fn set_price(&self, id: &str, unit_price: &str) {
        if let Some(product) = self.products.lock().unwrap().get_mut(&ProductId::from(id)) {
            product.price = price(unit_price);
        }
    }

    pub fn set_stock(&self, id: &str, stock: u32) {
        if let Some(product) = self.products.lock().unwrap().get_mut(&ProductId::from(id)) {
            product.stock_quantity = stock;
        }
    }
}

#[async_trait]
impl ProductCatalog for Catalog {
    async fn get_product(&self, id: &ProductId) -> Result<Option<ProductRecord>, LookupError> {
        Ok(self.products.lock().unwrap().get(id).cloned())
    }
}

/// A collaborator that never answers successfully.
#[derive(Default)]
pub struct Unreachable {
    pub calls: AtomicU32,
}

impl Unreachable {
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for Unreachable {
    async fn get_user(&self, _id: &UserId) -> Result<Option<UserRecord>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LookupError::Unavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl ProductCatalog for Unreachable {
    async fn get_product(&self, _id: &ProductId) -> Result<Option<ProductRecord>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LookupError::Unavailable("connection refused".to_string()))
    }
}

/// A catalog that answers slower than any test policy waits.
pub struct Stalled;

#[async_trait]
impl ProductCatalog for Stalled {
    async fn get_product(&self, _id: &ProductId) -> Result<Option<ProductRecord>, LookupError> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(None)
    }
}

/// Delays the answer for one product so lookups complete out of cart order.
pub struct SlowFor {
    pub inner: Catalog,
    pub slow: ProductId,
    pub delay: Duration,
}

#[async_trait]
impl ProductCatalog for SlowFor {
    async fn get_product(&self, id: &ProductId) -> Result<Option<ProductRecord>, LookupError> {
        if id == &self.slow {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.get_product(id).await
    }
}

/// A publisher whose broker never acknowledges.
pub struct HangingPublisher;

#[async_trait]
impl EventPublisher for HangingPublisher {
    async fn publish(&self, _event: OrderCreatedEvent) -> Result<(), PublishError> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<OrderCreatedEvent>>,
}

impl RecordingPublisher {
    pub fn published(&self) -> Vec<OrderCreatedEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: OrderCreatedEvent) -> Result<(), PublishError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: OrderCreatedEvent) -> Result<(), PublishError> {
        Err(PublishError::Failed("broker down".to_string()))
    }
}

/// Real cart and order stores wired to the given collaborators.
pub struct Harness {
    pub carts: CartClient,
    pub orders: OrderClient,
    pub cart_service: CartService,
    pub checkout: CheckoutService,
}

pub fn harness(
    users: Arc<dyn UserDirectory>,
    products: Arc<dyn ProductCatalog>,
    events: Arc<dyn EventPublisher>,
) -> Harness {
    let (cart_actor, carts) = order_service::cart_actor::new(16);
    let (order_actor, orders) = order_service::order_actor::new(16);
    tokio::spawn(cart_actor.run(()));
    tokio::spawn(order_actor.run(()));

    with_stores(carts, orders, users, products, events)
}

pub fn with_stores(
    carts: CartClient,
    orders: OrderClient,
    users: Arc<dyn UserDirectory>,
    products: Arc<dyn ProductCatalog>,
    events: Arc<dyn EventPublisher>,
) -> Harness {
    let locks = Some(UserLocks::new());
    let options = CheckoutOptions {
        policy: fast_policy(),
        event_timeout: Duration::from_millis(100),
        product_fan_out: 4,
    };
    let cart_service = CartService::new(
        carts.clone(),
        users.clone(),
        products.clone(),
        options.policy,
        locks.clone(),
    );
    let checkout = CheckoutService::new(
        carts.clone(),
        orders.clone(),
        users,
        products,
        events,
        options,
        locks,
    );

    Harness {
        carts,
        orders,
        cart_service,
        checkout,
    }
}

/// The usual fixture: user `U1`, `P1` at 10.00 and `P2` at 15.00, five of each.
pub fn store() -> (Arc<Catalog>, Arc<RecordingPublisher>, Harness) {
    let catalog = Arc::new(Catalog::default());
    catalog.add("P1", "10.00", 5);
    catalog.add("P2", "15.00", 5);
    let events = Arc::new(RecordingPublisher::default());
    let harness = harness(
        Arc::new(Directory::with_users(&["U1"])),
        catalog.clone(),
        events.clone(),
    );
    (catalog, events, harness)
}
