use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrandId(pub i64);

/// Minimal projection of a catalog product: only the fields the pricing
/// engine needs. The owning product service carries the rest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku_code: String,
    pub cost: f64,
    pub brand_id: Option<BrandId>,
    pub enabled: bool,
}
