use crate::domain::marketplace::Marketplace;
use crate::domain::product::Product;
use crate::domain::request::PricingRequest;
use crate::errors::{EntityKind, PricingError};

/// Rejects a disabled product before any arithmetic runs.
pub fn ensure_product_active(product: &Product) -> Result<(), PricingError> {
    if !product.enabled {
        return Err(PricingError::Inactive { entity: EntityKind::Product, id: product.id.0 });
    }
    Ok(())
}

/// Rejects a disabled marketplace before any arithmetic runs.
pub fn ensure_marketplace_active(marketplace: &Marketplace) -> Result<(), PricingError> {
    if !marketplace.enabled {
        return Err(PricingError::Inactive {
            entity: EntityKind::Marketplace,
            id: marketplace.id.0,
        });
    }
    Ok(())
}

/// Validates every numeric input of a request. Total and idempotent: it
/// inspects, never mutates, and never fails for well-formed input.
pub fn validate_request(request: &PricingRequest) -> Result<(), PricingError> {
    non_negative("productCost", request.product_cost)?;
    non_negative("value", request.value)?;
    non_negative("inputTax", request.input_tax)?;

    for rule in &request.costs {
        if !rule.value.is_finite() || rule.value < 0.0 {
            return Err(PricingError::InvalidCostValue {
                category: rule.category,
                value: rule.value,
            });
        }
    }

    if let Some(rebate) = &request.rebate {
        non_negative("rebatePercent", rebate.percent)?;
    }

    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), PricingError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PricingError::InvalidNumber { field, value });
    }
    Ok(())
}
