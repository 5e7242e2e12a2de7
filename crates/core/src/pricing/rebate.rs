use crate::domain::breakdown::{round_money, PricingBreakdown};
use crate::domain::marketplace::{CostCategory, CostRule};
use crate::domain::request::PricingRequest;

/// NET mode pre-step: a copy of the request whose commission rules are
/// scaled by `(1 - percent/100)` so slab resolution already works on the
/// reduced commission. Other categories pass through untouched.
pub fn with_net_commission(request: &PricingRequest, percent: f64) -> PricingRequest {
    let factor = 1.0 - percent / 100.0;
    let costs = request
        .costs
        .iter()
        .map(|rule| {
            if rule.category == CostCategory::Commission {
                CostRule { value: rule.value * factor, ..rule.clone() }
            } else {
                rule.clone()
            }
        })
        .collect();
    PricingRequest { costs, ..request.clone() }
}

/// NET mode post-step: reports the nominal commission the marketplace would
/// have charged. Undefined at a 100% rebate, so it is omitted there.
pub fn annotate_commission_before_rebate(breakdown: &mut PricingBreakdown, percent: f64) {
    if percent < 100.0 {
        breakdown.commission_before_rebate =
            Some(round_money(breakdown.commission / (1.0 - percent / 100.0)));
    }
}

/// DEFERRED mode post-step: the commission share to be credited back later;
/// the breakdown itself stays nominal.
pub fn annotate_pending_receivable(breakdown: &mut PricingBreakdown, percent: f64) {
    breakdown.pending_receivable = Some(round_money(breakdown.commission * percent / 100.0));
}
