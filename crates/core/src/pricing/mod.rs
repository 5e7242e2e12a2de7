pub mod forward;
pub mod inverse;
pub mod rebate;
pub mod slabs;
pub mod tax;
pub mod validate;

use crate::domain::breakdown::PricingBreakdown;
use crate::domain::marketplace::Marketplace;
use crate::domain::product::Product;
use crate::domain::request::{PricingMode, PricingRequest, Rebate, RebateMode};
use crate::errors::PricingError;
use crate::pricing::tax::TaxSchedule;

/// Stateless pricing engine. Every call is an independent computation over
/// the inputs handed to it; nothing is persisted, cached, or retried, so
/// one instance can serve any number of concurrent callers.
#[derive(Clone, Debug, Default)]
pub struct PricingEngine {
    tax: TaxSchedule,
}

impl PricingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mostly for tests: the production schedule is the engine constant.
    pub fn with_tax_schedule(tax: TaxSchedule) -> Self {
        Self { tax }
    }

    /// Prices a listing: lifecycle-checks the collaborator-supplied entities,
    /// then evaluates the pure request built from them. The caller supplies
    /// the effective (possibly brand-scoped) cost rules on the marketplace.
    pub fn evaluate_listing(
        &self,
        product: &Product,
        marketplace: &Marketplace,
        mode: PricingMode,
        value: f64,
        input_tax: f64,
        rebate: Option<Rebate>,
    ) -> Result<PricingBreakdown, PricingError> {
        validate::ensure_product_active(product)?;
        validate::ensure_marketplace_active(marketplace)?;
        if !product.cost.is_finite() || product.cost < 0.0 {
            return Err(PricingError::InvalidNumber { field: "productCost", value: product.cost });
        }

        self.evaluate(&PricingRequest {
            product_cost: product.cost,
            costs: marketplace.costs.clone(),
            mode,
            value,
            input_tax,
            rebate,
        })
    }

    /// Evaluates one request: validation, rebate pre-adjustment, mode
    /// dispatch, rebate reporting. Deterministic and side-effect free.
    pub fn evaluate(&self, request: &PricingRequest) -> Result<PricingBreakdown, PricingError> {
        validate::validate_request(request)?;

        match request.rebate {
            Some(Rebate { percent, mode: RebateMode::Net }) if percent > 0.0 => {
                // The solver must see the reduced commission, not the
                // nominal one, so slab resolution happens on scaled rules.
                let discounted = rebate::with_net_commission(request, percent);
                let mut breakdown = self.solve(&discounted)?;
                rebate::annotate_commission_before_rebate(&mut breakdown, percent);
                Ok(breakdown)
            }
            Some(Rebate { percent, mode: RebateMode::Deferred }) if percent > 0.0 => {
                let mut breakdown = self.solve(request)?;
                rebate::annotate_pending_receivable(&mut breakdown, percent);
                Ok(breakdown)
            }
            _ => self.solve(request),
        }
    }

    fn solve(&self, request: &PricingRequest) -> Result<PricingBreakdown, PricingError> {
        match request.mode {
            PricingMode::ByPrice => forward::breakdown_at_price(request.value, request, &self.tax),
            PricingMode::ByProfitPercent => {
                let price = inverse::price_for_profit_percent(request, &self.tax)?;
                // Delegating keeps the returned breakdown mutually
                // consistent with the forward invariant.
                forward::breakdown_at_price(price, request, &self.tax)
            }
        }
    }

    pub fn tax_schedule(&self) -> &TaxSchedule {
        &self.tax
    }
}
