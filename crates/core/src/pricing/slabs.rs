use std::cmp::Ordering;

use crate::domain::marketplace::{CostCategory, CostRule, CostValueType};
use crate::pricing::tax::TaxSchedule;

/// Selects the one applicable rule of `category` for `reference_price`.
///
/// Policy, in order:
/// 1. the first rule whose inclusive range contains the price;
/// 2. otherwise the rule with the greatest upper bound, where an un-ranged
///    rule counts as unbounded-highest; the most recently defined rule wins
///    a tie (a configuration-level contract, not inferred business logic);
/// 3. no rule of the category at all contributes zero cost.
///
/// This is deliberately a linear scan: ranges are operator-entered and may
/// overlap or leave gaps, so the applicable rule depends on containment,
/// not equality.
pub fn resolve_rule<'a>(
    category: CostCategory,
    rules: &'a [CostRule],
    reference_price: f64,
) -> Option<&'a CostRule> {
    let candidates: Vec<&CostRule> =
        rules.iter().filter(|rule| rule.category == category).collect();
    if candidates.is_empty() {
        return None;
    }

    if let Some(matched) = candidates
        .iter()
        .copied()
        .find(|rule| rule.range().is_some_and(|range| range.contains(reference_price)))
    {
        return Some(matched);
    }

    candidates
        .into_iter()
        .enumerate()
        .max_by(|(left_idx, left), (right_idx, right)| {
            upper_bound(left)
                .partial_cmp(&upper_bound(right))
                .unwrap_or(Ordering::Equal)
                .then(left_idx.cmp(right_idx))
        })
        .map(|(_, rule)| rule)
}

fn upper_bound(rule: &CostRule) -> f64 {
    rule.range().map(|range| range.to).unwrap_or(f64::INFINITY)
}

/// The amount a resolved rule charges at `reference_price`.
pub fn rule_amount(rule: &CostRule, reference_price: f64) -> f64 {
    match rule.value_type {
        CostValueType::Percent => reference_price * rule.value / 100.0,
        CostValueType::Flat => rule.value,
    }
}

/// Resolution and application in one step; absent categories cost nothing.
pub fn category_cost(category: CostCategory, rules: &[CostRule], reference_price: f64) -> f64 {
    resolve_rule(category, rules, reference_price)
        .map(|rule| rule_amount(rule, reference_price))
        .unwrap_or(0.0)
}

/// Every distinct boundary referenced by a usable price range, plus the tax
/// schedule's thresholds, sorted ascending. Consecutive pairs partition the
/// positive line into intervals where each category's slab and the tax rate
/// are constant.
pub fn breakpoints(rules: &[CostRule], tax: &TaxSchedule) -> Vec<f64> {
    let mut points: Vec<f64> = rules
        .iter()
        .filter_map(CostRule::range)
        .flat_map(|range| [range.from, range.to])
        .chain(tax.thresholds())
        .collect();
    points.sort_by(f64::total_cmp);
    points.dedup();
    points
}
