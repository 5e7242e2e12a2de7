use crate::domain::breakdown::PricingBreakdown;
use crate::domain::marketplace::CostCategory;
use crate::domain::request::PricingRequest;
use crate::errors::PricingError;
use crate::pricing::slabs;
use crate::pricing::tax::TaxSchedule;

/// Produces the full breakdown for a known selling price. Single pass,
/// deterministic, and side-effect free; every cost category is resolved
/// against the same reference price that appears in the result.
pub fn breakdown_at_price(
    price: f64,
    request: &PricingRequest,
    tax: &TaxSchedule,
) -> Result<PricingBreakdown, PricingError> {
    if !price.is_finite() || price < 0.0 {
        return Err(PricingError::InvalidNumber { field: "sellingPrice", value: price });
    }

    let commission = slabs::category_cost(CostCategory::Commission, &request.costs, price);
    let shipping = slabs::category_cost(CostCategory::Shipping, &request.costs, price);
    let marketing = slabs::category_cost(CostCategory::Marketing, &request.costs, price);

    let output_tax = price * tax.rate_at(price);
    let tax_difference = output_tax - request.input_tax;
    let net_realisation = price - commission - shipping - marketing - output_tax;
    let profit = net_realisation - request.product_cost + tax_difference;
    let profit_percent = if request.product_cost > 0.0 {
        profit / request.product_cost * 100.0
    } else {
        0.0
    };

    Ok(PricingBreakdown::rounded(
        price,
        request.product_cost,
        commission,
        shipping,
        marketing,
        output_tax,
        request.input_tax,
        tax_difference,
        net_realisation,
        profit,
        profit_percent,
    ))
}
