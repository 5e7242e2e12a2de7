use crate::domain::marketplace::{CostCategory, CostRule, CostValueType};
use crate::domain::request::PricingRequest;
use crate::errors::PricingError;
use crate::pricing::slabs;
use crate::pricing::tax::TaxSchedule;

/// Two rate profiles closer than this are the same slab regime.
const RATE_TOLERANCE: f64 = 1e-4;

/// The price-independent shape of the cost structure within one interval:
/// the sum of applicable percentage rates and the sum of applicable flat
/// amounts, one resolved rule per category.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct RateProfile {
    percent_total: f64,
    flat_total: f64,
}

impl RateProfile {
    /// Closed-form selling price for a target profit amount under this
    /// profile. The output-tax term cancels against the tax-difference
    /// credit in the profit identity, so the denominator carries only the
    /// percentage costs. `None` when they consume the whole price.
    fn solve(&self, target_profit: f64, product_cost: f64, input_tax: f64) -> Option<f64> {
        let denominator = 1.0 - self.percent_total / 100.0;
        (denominator > 0.0)
            .then(|| (target_profit + self.flat_total + product_cost + input_tax) / denominator)
    }

    fn matches(&self, other: &RateProfile) -> bool {
        (self.percent_total - other.percent_total).abs() < RATE_TOLERANCE
            && (self.flat_total - other.flat_total).abs() < RATE_TOLERANCE
    }
}

fn profile_at(costs: &[CostRule], reference_price: f64) -> RateProfile {
    let mut profile = RateProfile::default();
    for category in CostCategory::ALL {
        if let Some(rule) = slabs::resolve_rule(category, costs, reference_price) {
            match rule.value_type {
                CostValueType::Percent => profile.percent_total += rule.value,
                CostValueType::Flat => profile.flat_total += rule.value,
            }
        }
    }
    profile
}

/// Solves for the selling price that yields the requested profit percentage.
///
/// The price being solved for determines which cost slab and tax tier apply,
/// which in turn determine the price. Rather than iterating to a fixed point,
/// the solver partitions the positive line at every slab bound and tax
/// threshold; inside one interval every category's rule and the tax rate are
/// constant, so a closed form applies. Each interval's candidate is then
/// re-resolved at the computed price itself, with one boundary-crossing
/// correction, before it is accepted.
pub fn price_for_profit_percent(
    request: &PricingRequest,
    tax: &TaxSchedule,
) -> Result<f64, PricingError> {
    let target_profit = request.product_cost * request.value / 100.0;
    let points = slabs::breakpoints(&request.costs, tax);

    let mut heaviest_percent = 0.0f64;
    let mut any_solvable = false;
    let mut fallback: Option<f64> = None;

    // Finite intervals between consecutive breakpoints, ascending; the first
    // self-consistent in-range candidate wins.
    for pair in points.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        let assumed = profile_at(&request.costs, (lo + hi) / 2.0);
        heaviest_percent = heaviest_percent.max(assumed.percent_total);

        let Some(candidate) = assumed.solve(target_profit, request.product_cost, request.input_tax)
        else {
            continue;
        };
        any_solvable = true;
        fallback = Some(candidate);
        if candidate < lo || candidate > hi {
            continue;
        }

        let actual = profile_at(&request.costs, candidate);
        if actual.matches(&assumed) {
            return Ok(candidate);
        }
        // The candidate landed in a different slab than the midpoint
        // assumed. Recompute once with the rates that actually apply there,
        // re-verify, and otherwise discard this interval.
        if let Some(corrected) =
            actual.solve(target_profit, request.product_cost, request.input_tax)
        {
            if profile_at(&request.costs, corrected).matches(&actual) {
                return Ok(corrected);
            }
        }
    }

    // Open-ended interval above the last breakpoint (the whole line when no
    // usable range exists); 1.5x the last boundary is a representative
    // in-interval point. Its candidate is preferred over outright failure
    // even when the bound check is inexact.
    let reference = points.last().map(|last| last * 1.5).unwrap_or(0.0);
    let assumed = profile_at(&request.costs, reference);
    heaviest_percent = heaviest_percent.max(assumed.percent_total);
    if let Some(candidate) = assumed.solve(target_profit, request.product_cost, request.input_tax)
    {
        any_solvable = true;
        let actual = profile_at(&request.costs, candidate);
        let resolved = if actual.matches(&assumed) {
            Some(candidate)
        } else {
            actual.solve(target_profit, request.product_cost, request.input_tax)
        };
        if let Some(price) = resolved {
            if points.last().map_or(true, |last| price >= *last) {
                return Ok(price);
            }
            fallback = Some(price);
        }
    }

    if !any_solvable {
        return Err(PricingError::NoFeasiblePrice { percent_total: heaviest_percent });
    }
    match fallback {
        Some(price) if price > 0.0 => Ok(price),
        _ => Err(PricingError::NoApplicableSlab),
    }
}

#[cfg(test)]
mod tests {
    use super::price_for_profit_percent;
    use crate::domain::marketplace::{CostCategory, CostRule, CostValueType};
    use crate::domain::request::{PricingMode, PricingRequest};
    use crate::errors::PricingError;
    use crate::pricing::forward::breakdown_at_price;
    use crate::pricing::tax::TaxSchedule;

    fn rule(
        category: CostCategory,
        value_type: CostValueType,
        value: f64,
        range: Option<&str>,
    ) -> CostRule {
        CostRule { id: None, category, value_type, value, price_range: range.map(str::to_string) }
    }

    fn request(product_cost: f64, percent: f64, costs: Vec<CostRule>) -> PricingRequest {
        PricingRequest {
            product_cost,
            costs,
            mode: PricingMode::ByProfitPercent,
            value: percent,
            input_tax: 0.0,
            rebate: None,
        }
    }

    #[test]
    fn recovers_the_reference_price_from_its_profit_percent() {
        let req = request(
            1000.0,
            71.0,
            vec![rule(CostCategory::Commission, CostValueType::Percent, 10.0, Some("0-5000"))],
        );
        let price = price_for_profit_percent(&req, &TaxSchedule::goods_and_services())
            .expect("inverse should solve");
        assert!((price - 1900.0).abs() < 0.01, "expected ~1900, got {price}");
    }

    #[test]
    fn round_trips_through_the_forward_solver() {
        let tax = TaxSchedule::goods_and_services();
        let costs = vec![
            rule(CostCategory::Commission, CostValueType::Percent, 12.0, Some("0-1500")),
            rule(CostCategory::Commission, CostValueType::Percent, 9.0, Some("1500.01-8000")),
            rule(CostCategory::Shipping, CostValueType::Flat, 49.0, None),
            rule(CostCategory::Marketing, CostValueType::Percent, 2.5, Some("0-8000")),
        ];
        for target in [5.0, 20.0, 35.0, 60.0, 110.0] {
            let req = request(800.0, target, costs.clone());
            let price = price_for_profit_percent(&req, &tax).expect("inverse should solve");
            let breakdown = breakdown_at_price(price, &req, &tax).expect("forward pass");
            assert!(
                (breakdown.profit_percent - target).abs() <= 0.01,
                "target {target}% reproduced as {}% at price {price}",
                breakdown.profit_percent
            );
        }
    }

    #[test]
    fn solves_across_a_slab_boundary_crossing() {
        // A naive single-pass formula would assume the 20% slab and emit a
        // price above 1000 where only 5% applies; the interval walk must
        // settle in the upper slab instead.
        let costs = vec![
            rule(CostCategory::Commission, CostValueType::Percent, 20.0, Some("0-1000")),
            rule(CostCategory::Commission, CostValueType::Percent, 5.0, Some("1000.01-50000")),
        ];
        let req = request(900.0, 30.0, costs);
        let tax = TaxSchedule::goods_and_services();
        let price = price_for_profit_percent(&req, &tax).expect("inverse should solve");
        let breakdown = breakdown_at_price(price, &req, &tax).expect("forward pass");
        assert!((breakdown.profit_percent - 30.0).abs() <= 0.01);
        assert!(price > 1000.0, "price should settle in the upper slab, got {price}");
    }

    #[test]
    fn corrects_when_the_candidate_lands_exactly_on_a_shared_boundary() {
        // Both rules claim the 1000 boundary, and the overlapping slab is
        // defined first, so resolution flips regimes exactly there. The
        // midpoint profile (flat 100) yields candidate 1000; re-resolving at
        // 1000 picks the 20% slab, and the corrected recomputation settles
        // self-consistently at 1125.
        let costs = vec![
            rule(CostCategory::Commission, CostValueType::Percent, 20.0, Some("1000-2000")),
            rule(CostCategory::Commission, CostValueType::Flat, 100.0, Some("0-1000")),
        ];
        let req = request(800.0, 12.5, costs);
        let tax = TaxSchedule::goods_and_services();
        let price = price_for_profit_percent(&req, &tax).expect("inverse should solve");
        assert!((price - 1125.0).abs() < 1e-9, "expected the corrected price, got {price}");
        let breakdown = breakdown_at_price(price, &req, &tax).expect("forward pass");
        assert!((breakdown.profit_percent - 12.5).abs() <= 0.01);
    }

    #[test]
    fn uses_the_open_ended_interval_above_all_ranges() {
        let costs =
            vec![rule(CostCategory::Commission, CostValueType::Percent, 10.0, Some("0-1000"))];
        let req = request(5000.0, 50.0, costs);
        let tax = TaxSchedule::goods_and_services();
        let price = price_for_profit_percent(&req, &tax).expect("inverse should solve");
        assert!(price > 2064.0);
        let breakdown = breakdown_at_price(price, &req, &tax).expect("forward pass");
        assert!((breakdown.profit_percent - 50.0).abs() <= 0.01);
    }

    #[test]
    fn all_consuming_percentage_costs_are_unsolvable() {
        let req = request(
            1000.0,
            20.0,
            vec![
                rule(CostCategory::Commission, CostValueType::Percent, 60.0, None),
                rule(CostCategory::Shipping, CostValueType::Percent, 25.0, None),
                rule(CostCategory::Marketing, CostValueType::Percent, 15.0, None),
            ],
        );
        assert!(matches!(
            price_for_profit_percent(&req, &TaxSchedule::goods_and_services()),
            Err(PricingError::NoFeasiblePrice { .. })
        ));
    }

    #[test]
    fn no_cost_rules_still_solves() {
        let req = request(1000.0, 25.0, vec![]);
        let tax = TaxSchedule::goods_and_services();
        let price = price_for_profit_percent(&req, &tax).expect("inverse should solve");
        // profit = SP - cost, so SP = 1250 regardless of the tax tier.
        assert!((price - 1250.0).abs() < 0.01);
    }

    #[test]
    fn input_tax_raises_the_required_price() {
        let costs = vec![rule(CostCategory::Commission, CostValueType::Percent, 10.0, None)];
        let mut req = request(1000.0, 20.0, costs);
        req.input_tax = 90.0;
        let tax = TaxSchedule::goods_and_services();
        let price = price_for_profit_percent(&req, &tax).expect("inverse should solve");
        let breakdown = breakdown_at_price(price, &req, &tax).expect("forward pass");
        assert!((breakdown.profit_percent - 20.0).abs() <= 0.01);
        // (200 + 1000 + 90) / 0.9
        assert!((price - 1433.333).abs() < 0.01);
    }
}
