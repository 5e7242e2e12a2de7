use thiserror::Error;

use crate::domain::marketplace::CostCategory;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    Marketplace,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Product => "product",
            Self::Marketplace => "marketplace",
        })
    }
}

/// Failure taxonomy of the pricing engine. Nothing here is retryable: the
/// engine is deterministic, so every variant reports a condition the caller
/// must correct (or a collaborator lookup that simply found nothing).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("{entity} {id} was not found")]
    NotFound { entity: EntityKind, id: i64 },
    #[error("{entity} {id} is not active and cannot be priced")]
    Inactive { entity: EntityKind, id: i64 },
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidNumber { field: &'static str, value: f64 },
    #[error("cost value for {category} must be a finite, non-negative number (got {value})")]
    InvalidCostValue { category: CostCategory, value: f64 },
    #[error(
        "combined percentage costs ({percent_total}%) and tax leave no feasible selling price"
    )]
    NoFeasiblePrice { percent_total: f64 },
    #[error("cannot determine an applicable pricing slab for the requested profit percentage")]
    NoApplicableSlab,
}

/// Collaborator transport failures. Surfaced as-is to the caller layer and
/// never retried inside the engine.
#[derive(Debug, Error)]
pub enum CollabError {
    #[error("{service} is unreachable: {detail}")]
    Unreachable { service: String, detail: String },
    #[error("{service} returned status {status}")]
    UnexpectedStatus { service: String, status: u16 },
    #[error("{service} returned an unreadable payload: {detail}")]
    Payload { service: String, detail: String },
}

#[cfg(test)]
mod tests {
    use super::{EntityKind, PricingError};
    use crate::domain::marketplace::CostCategory;

    #[test]
    fn errors_carry_enough_context_to_fix_configuration() {
        let inactive = PricingError::Inactive { entity: EntityKind::Marketplace, id: 7 };
        assert_eq!(inactive.to_string(), "marketplace 7 is not active and cannot be priced");

        let bad_cost =
            PricingError::InvalidCostValue { category: CostCategory::Shipping, value: -4.0 };
        assert!(bad_cost.to_string().contains("SHIPPING"));
        assert!(bad_cost.to_string().contains("-4"));

        let infeasible = PricingError::NoFeasiblePrice { percent_total: 104.0 };
        assert!(infeasible.to_string().contains("104"));
    }
}
