//! Demo data created at startup when `SEED_DEMO` is on.

use super::OrderSystem;
use crate::model::{ProductCreate, ProductId, UserCreate, UserId};
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use rust_decimal::Decimal;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Product(#[from] ProductError),
}

/// Ids of the seeded records.
#[derive(Debug, Clone)]
pub struct DemoData {
    pub user_id: UserId,
    pub product_ids: Vec<ProductId>,
}

/// Registers one user and two products so the API can be tried right away.
pub async fn seed_demo(system: &OrderSystem) -> Result<DemoData, SeedError> {
    let user = system
        .user_client
        .create_user(UserCreate::new("Demo User", "demo@example.com"))
        .await?;

    let mut product_ids = Vec::new();
    for (name, price, stock) in [
        ("Mechanical Keyboard", Decimal::new(1000, 2), 5),
        ("USB-C Cable", Decimal::new(1500, 2), 5),
    ] {
        let product = system
            .product_client
            .create_product(ProductCreate::new(name, price, stock))
            .await?;
        info!(product_id = %product.id, name, price = %product.price, stock, "Seeded product");
        product_ids.push(product.id);
    }

    info!(user_id = %user.id, "Seeded demo user");
    Ok(DemoData {
        user_id: user.id,
        product_ids,
    })
}
