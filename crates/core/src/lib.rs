pub mod collab;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;

pub use collab::{MarketplaceProvider, ProductProvider, StaticCatalog};
pub use domain::breakdown::{round_money, PricingBreakdown};
pub use domain::marketplace::{
    CostCategory, CostRule, CostValueType, Marketplace, MarketplaceId, PriceRange,
};
pub use domain::product::{BrandId, Product, ProductId};
pub use domain::request::{PricingMode, PricingRequest, Rebate, RebateMode};
pub use errors::{CollabError, EntityKind, PricingError};
pub use pricing::tax::{TaxSchedule, TaxTier};
pub use pricing::PricingEngine;
