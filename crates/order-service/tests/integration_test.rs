use actor_framework::ActorClient;
use order_service::config::ServerConfig;
use order_service::lifecycle::{seed_demo, OrderSystem};
use order_service::model::{ProductCreate, ProductUpdate, UserCreate};
use order_service::product_actor::ProductError;
use order_service::service::{Checkout, ServiceError};
use order_service::user_actor::UserError;
use rust_decimal::Decimal;

/// Full end-to-end test with every real actor: the user and product stores double as
/// the user directory and the product catalog.
#[tokio::test]
async fn test_full_checkout_through_order_system() {
    let system = OrderSystem::new(&ServerConfig::default());

    let user = system
        .user_client
        .create_user(UserCreate::new("Alice", "alice@example.com"))
        .await
        .expect("Failed to create user");
    let product = system
        .product_client
        .create_product(ProductCreate::new("Super Widget", Decimal::new(2550, 2), 100))
        .await
        .expect("Failed to create product");

    system
        .cart_service
        .add_to_cart(&user.id, &product.id, 5)
        .await
        .expect("Failed to add to cart");

    // Price changes between adding and checking out
    system
        .product_client
        .update_product(
            product.id.clone(),
            ProductUpdate {
                price: Some(Decimal::new(2000, 2)),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update product");

    let outcome = system
        .checkout_service
        .create_order(&user.id)
        .await
        .expect("Checkout failed");
    let Checkout::Placed(receipt) = outcome else {
        panic!("expected an order");
    };
    assert!(receipt.cart_cleared);
    assert!(receipt.event_published, "the notification listener subscribes at startup");
    assert_eq!(receipt.order.total_amount(), Decimal::new(10000, 2));

    let stored = system
        .order_client
        .get(receipt.order.id)
        .await
        .expect("Failed to get order")
        .expect("Order not found");
    assert_eq!(stored, receipt.order);

    // Checkout never decrements stock
    let product = system
        .product_client
        .get(product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.stock, 100);

    system.shutdown().await.expect("Failed to shutdown system");
}

/// Concurrent checkouts for different users do not interfere.
#[tokio::test]
async fn test_concurrent_checkouts_for_many_users() {
    let system = OrderSystem::new(&ServerConfig::default());
    let product = system
        .product_client
        .create_product(ProductCreate::new("Limited Widget", Decimal::new(1000, 2), 20))
        .await
        .unwrap();

    let mut handles = vec![];
    for i in 0..10 {
        let user = system
            .user_client
            .create_user(UserCreate::new(format!("User {i}"), format!("user{i}@example.com")))
            .await
            .unwrap();
        let carts = system.cart_service.clone();
        let checkout = system.checkout_service.clone();
        let product_id = product.id.clone();

        handles.push(tokio::spawn(async move {
            carts.add_to_cart(&user.id, &product_id, 2).await?;
            checkout.create_order(&user.id).await
        }));
    }

    let mut placed = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(Checkout::Placed(receipt)) => {
                assert_eq!(receipt.order.total_amount(), Decimal::new(2000, 2));
                placed += 1;
            }
            other => panic!("unexpected checkout outcome: {other:?}"),
        }
    }
    assert_eq!(placed, 10);
    assert_eq!(system.order_client.list_all().await.unwrap().len(), 10);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_store_validation_errors_reach_the_caller() {
    let system = OrderSystem::new(&ServerConfig::default());

    let err = system
        .user_client
        .create_user(UserCreate::new("Mallory", "not-an-email"))
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::ValidationError(_)));

    let err = system
        .product_client
        .create_product(ProductCreate::new("Broken", Decimal::new(-1, 0), 1))
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::InvalidPrice(Decimal::new(-1, 0)));

    let err = system
        .product_client
        .update_product("product_42".into(), ProductUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::NotFound("product_42".into()));

    let err = system
        .cart_service
        .add_to_cart(&"user_1".into(), &"product_1".into(), 1)
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::UserNotFound("user_1".into()));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_seeded_demo_data_can_be_ordered() {
    let system = OrderSystem::new(&ServerConfig::default());
    let demo = seed_demo(&system).await.expect("Failed to seed");

    for product_id in &demo.product_ids {
        system
            .cart_service
            .add_to_cart(&demo.user_id, product_id, 1)
            .await
            .unwrap();
    }
    let outcome = system.checkout_service.create_order(&demo.user_id).await.unwrap();

    let Checkout::Placed(receipt) = outcome else {
        panic!("expected an order");
    };
    assert_eq!(receipt.order.items().len(), 2);
    assert_eq!(receipt.order.total_amount(), Decimal::new(2500, 2));

    system.shutdown().await.unwrap();
}
