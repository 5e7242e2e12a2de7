use serde::{Deserialize, Serialize};

use crate::domain::marketplace::CostRule;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingMode {
    /// `value` is the selling price; produce the breakdown for it.
    ByPrice,
    /// `value` is the desired profit percentage; solve for the price.
    ByProfitPercent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebateMode {
    /// Commission rules are reduced by the rebate before solving.
    Net,
    /// The solver runs on nominal commission; the rebate is tracked as a
    /// receivable alongside the breakdown.
    Deferred,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rebate {
    pub percent: f64,
    pub mode: RebateMode,
}

/// One self-contained evaluation: the product's cost, the marketplace's
/// effective cost rules, and the caller's chosen mode. Constructed fresh per
/// call; the engine never holds on to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub product_cost: f64,
    pub costs: Vec<CostRule>,
    pub mode: PricingMode,
    pub value: f64,
    #[serde(default)]
    pub input_tax: f64,
    #[serde(default)]
    pub rebate: Option<Rebate>,
}
