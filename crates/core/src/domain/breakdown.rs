use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Rounds a monetary value half-up to 2 decimal places. Applied once, as the
/// final step of a breakdown; intermediate arithmetic stays at full `f64`
/// precision. Going through the shortest decimal rendering of the float
/// keeps `0.125 -> 0.13` instead of rounding on the raw binary expansion.
pub fn round_money(value: f64) -> f64 {
    let Ok(decimal) = format!("{value}").parse::<Decimal>() else {
        return value;
    };
    decimal
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(value)
}

/// Full profit/loss breakdown for one selling price. Every monetary field is
/// rounded half-up to 2 decimals. The identity
/// `profit = net_realisation - product_cost + tax_difference`
/// holds within 0.01 for every breakdown the engine emits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub selling_price: f64,
    pub product_cost: f64,
    pub commission: f64,
    pub shipping: f64,
    pub marketing: f64,
    /// product_cost + commission + shipping + marketing
    pub total_cost: f64,
    /// selling_price x tax schedule rate at that price
    pub output_tax: f64,
    pub input_tax: f64,
    /// output_tax - input_tax; negative means a credit
    pub tax_difference: f64,
    /// selling_price minus all marketplace deductions and output tax
    pub net_realisation: f64,
    pub profit: f64,
    pub profit_percent: f64,
    /// NET rebate only: nominal commission before the rebate reduction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_before_rebate: Option<f64>,
    /// DEFERRED rebate only: commission share to be credited back later.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_receivable: Option<f64>,
}

#[allow(clippy::too_many_arguments)]
impl PricingBreakdown {
    pub(crate) fn rounded(
        selling_price: f64,
        product_cost: f64,
        commission: f64,
        shipping: f64,
        marketing: f64,
        output_tax: f64,
        input_tax: f64,
        tax_difference: f64,
        net_realisation: f64,
        profit: f64,
        profit_percent: f64,
    ) -> Self {
        Self {
            selling_price: round_money(selling_price),
            product_cost: round_money(product_cost),
            commission: round_money(commission),
            shipping: round_money(shipping),
            marketing: round_money(marketing),
            total_cost: round_money(product_cost + commission + shipping + marketing),
            output_tax: round_money(output_tax),
            input_tax: round_money(input_tax),
            tax_difference: round_money(tax_difference),
            net_realisation: round_money(net_realisation),
            profit: round_money(profit),
            profit_percent: round_money(profit_percent),
            commission_before_rebate: None,
            pending_receivable: None,
        }
    }
}
