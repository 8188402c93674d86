//! # Product Client
//!
//! Wraps a `ResourceClient<Product>`: catalog maintenance for seeding and tests, and
//! the [`ProductCatalog`] lookup used by checkout.
use super::recover_entity_error;
use crate::lookup::{LookupError, ProductCatalog, ProductRecord};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Changes price and/or stock of an existing product.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .update(id.clone(), update)
            .await
            .map_err(|e| match e {
                FrameworkError::NotFound(_) => ProductError::NotFound(id),
                other => Self::map_error(other),
            })
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e, ProductError::ActorCommunicationError)
    }
}

#[async_trait]
impl ProductCatalog for ProductClient {
    async fn get_product(&self, id: &ProductId) -> Result<Option<ProductRecord>, LookupError> {
        let product = self
            .inner
            .get(id.clone())
            .await
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;

        Ok(product.map(|p| ProductRecord {
            id: p.id,
            name: p.name,
            price: p.price,
            stock_quantity: p.stock,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn spawn_catalog() -> ProductClient {
        let (actor, client) = crate::product_actor::new(8);
        tokio::spawn(actor.run(()));
        client
    }

    #[tokio::test]
    async fn test_update_is_visible_to_lookups() {
        let catalog = spawn_catalog();
        let created = catalog
            .create_product(ProductCreate::new("Lamp", Decimal::new(1000, 2), 5))
            .await
            .unwrap();

        catalog
            .update_product(
                created.id.clone(),
                ProductUpdate {
                    price: Some(Decimal::new(1250, 2)),
                    stock: Some(1),
                },
            )
            .await
            .unwrap();

        let record = catalog.get_product(&created.id).await.unwrap().unwrap();
        assert_eq!(record.price, Decimal::new(1250, 2));
        assert_eq!(record.stock_quantity, 1);
    }

    #[tokio::test]
    async fn test_update_of_unknown_product() {
        let catalog = spawn_catalog();

        let result = catalog
            .update_product(ProductId::from("P9"), ProductUpdate::default())
            .await;
        assert_eq!(result, Err(ProductError::NotFound(ProductId::from("P9"))));
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let catalog = spawn_catalog();

        let result = catalog
            .create_product(ProductCreate::new("Broken", Decimal::new(-1, 0), 1))
            .await;
        assert_eq!(result, Err(ProductError::InvalidPrice(Decimal::new(-1, 0))));
    }
}
