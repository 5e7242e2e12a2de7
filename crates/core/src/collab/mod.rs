use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::marketplace::{CostRule, Marketplace, MarketplaceId};
use crate::domain::product::{BrandId, Product, ProductId};
use crate::errors::CollabError;

/// Collaborator seam for the product catalog. `Ok(None)` means the product
/// does not exist; transport failures surface as `CollabError` and are
/// never retried here.
#[async_trait]
pub trait ProductProvider: Send + Sync {
    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, CollabError>;
}

/// Collaborator seam for marketplace configuration. Effective costs are the
/// brand-scoped overrides when the marketplace has any for the product's
/// brand, and the marketplace-level defaults otherwise.
#[async_trait]
pub trait MarketplaceProvider: Send + Sync {
    async fn marketplace_by_id(
        &self,
        id: MarketplaceId,
    ) -> Result<Option<Marketplace>, CollabError>;

    async fn effective_costs(
        &self,
        marketplace: MarketplaceId,
        brand: Option<BrandId>,
    ) -> Result<Vec<CostRule>, CollabError>;
}

/// In-memory collaborator data for tests and for CLI scenario files.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    products: HashMap<i64, Product>,
    marketplaces: HashMap<i64, Marketplace>,
    brand_costs: HashMap<(i64, i64), Vec<CostRule>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.id.0, product);
        self
    }

    pub fn with_marketplace(mut self, marketplace: Marketplace) -> Self {
        self.marketplaces.insert(marketplace.id.0, marketplace);
        self
    }

    pub fn with_brand_costs(
        mut self,
        marketplace: MarketplaceId,
        brand: BrandId,
        costs: Vec<CostRule>,
    ) -> Self {
        self.brand_costs.insert((marketplace.0, brand.0), costs);
        self
    }
}

#[async_trait]
impl ProductProvider for StaticCatalog {
    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, CollabError> {
        Ok(self.products.get(&id.0).cloned())
    }
}

#[async_trait]
impl MarketplaceProvider for StaticCatalog {
    async fn marketplace_by_id(
        &self,
        id: MarketplaceId,
    ) -> Result<Option<Marketplace>, CollabError> {
        Ok(self.marketplaces.get(&id.0).cloned())
    }

    async fn effective_costs(
        &self,
        marketplace: MarketplaceId,
        brand: Option<BrandId>,
    ) -> Result<Vec<CostRule>, CollabError> {
        if let Some(brand) = brand {
            if let Some(costs) = self.brand_costs.get(&(marketplace.0, brand.0)) {
                return Ok(costs.clone());
            }
        }
        Ok(self
            .marketplaces
            .get(&marketplace.0)
            .map(|marketplace| marketplace.costs.clone())
            .unwrap_or_default())
    }
}
