use crate::clients::{CartClient, OrderClient, ProductClient, UserClient};
use crate::config::ServerConfig;
use crate::events::{spawn_notification_listener, BroadcastPublisher};
use crate::http::AppState;
use crate::service::{CartService, CheckoutService, UserLocks};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime of the order service: four store actors, the event channel with its
/// notification listener, and the services wired on top of them.
///
/// # Example
///
/// ```rust
/// use order_service::config::ServerConfig;
/// use order_service::lifecycle::OrderSystem;
/// use order_service::model::UserId;
/// use order_service::service::Checkout;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = OrderSystem::new(&ServerConfig::default());
///
///     let outcome = system
///         .checkout_service
///         .create_order(&UserId::from("U1"))
///         .await
///         .map_err(|e| e.to_string())?;
///     assert_eq!(outcome, Checkout::EmptyCart);
///
///     system.shutdown().await
/// }
/// ```
pub struct OrderSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    pub cart_service: CartService,
    pub checkout_service: CheckoutService,
    /// Actor and listener tasks, awaited on shutdown.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns every actor and the notification listener, then builds the services.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: &ServerConfig) -> Self {
        let buffer = config.store_buffer.max(1);

        // 1. Create actors
        let (user_actor, user_client) = crate::user_actor::new(buffer);
        let (product_actor, product_client) = crate::product_actor::new(buffer);
        let (cart_actor, cart_client) = crate::cart_actor::new(buffer);
        let (order_actor, order_client) = crate::order_actor::new(buffer);

        // 2. Start them; none of the stores needs a context
        let mut handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(cart_actor.run(())),
            tokio::spawn(order_actor.run(())),
        ];

        // 3. Event channel and its consumer
        let publisher = BroadcastPublisher::new(config.event_buffer);
        handles.push(spawn_notification_listener(publisher.subscribe()));

        // 4. Services
        let locks = config
            .checkout
            .serialize_checkouts
            .then(UserLocks::new);
        let options = config.checkout.options();

        let cart_service = CartService::new(
            cart_client.clone(),
            Arc::new(user_client.clone()),
            Arc::new(product_client.clone()),
            options.policy,
            locks.clone(),
        );
        let checkout_service = CheckoutService::new(
            cart_client.clone(),
            order_client.clone(),
            Arc::new(user_client.clone()),
            Arc::new(product_client.clone()),
            Arc::new(publisher),
            options,
            locks,
        );

        info!(
            store_buffer = buffer,
            serialize_checkouts = config.checkout.serialize_checkouts,
            "Order system started"
        );

        Self {
            user_client,
            product_client,
            cart_client,
            order_client,
            cart_service,
            checkout_service,
            handles,
        }
    }

    /// State for the HTTP router.
    pub fn app_state(&self) -> AppState {
        AppState {
            carts: self.cart_service.clone(),
            checkout: self.checkout_service.clone(),
            orders: self.order_client.clone(),
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients and services closes every actor channel and the event
    /// channel; each task then drains and exits. Any clone still alive elsewhere
    /// (for example an `AppState` held by a running server) keeps its actor running,
    /// so stop the server first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all tasks shut down cleanly
    /// - `Err(String)` if any task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.checkout_service);
        drop(self.cart_service);
        drop(self.order_client);
        drop(self.cart_client);
        drop(self.user_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Task failed: {:?}", e);
                return Err(format!("Task failed: {e:?}"));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
