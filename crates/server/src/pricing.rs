//! JSON API for pricing calculations.
//!
//! Endpoints:
//! - `POST /api/pricing/calculate` — price one listing in either direction

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use pricely_core::collab::{MarketplaceProvider, ProductProvider};
use pricely_core::{
    CollabError, EntityKind, MarketplaceId, PricingBreakdown, PricingEngine, PricingError,
    PricingMode, ProductId, Rebate, RebateMode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct PricingState {
    pub engine: PricingEngine,
    pub products: Arc<dyn ProductProvider>,
    pub marketplaces: Arc<dyn MarketplaceProvider>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub sku_id: i64,
    pub marketplace_id: i64,
    pub mode: PricingMode,
    pub value: f64,
    #[serde(default)]
    pub input_tax: f64,
    pub rebate_percent: Option<f64>,
    pub rebate_mode: Option<RebateMode>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub correlation_id: String,
    pub sku_id: i64,
    pub marketplace_id: i64,
    #[serde(flatten)]
    pub breakdown: PricingBreakdown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub correlation_id: String,
    pub error: String,
}

pub fn router(state: PricingState) -> Router {
    Router::new().route("/api/pricing/calculate", post(calculate)).with_state(state)
}

pub async fn calculate(
    State(state): State<PricingState>,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, (StatusCode, Json<ApiError>)> {
    let correlation_id = Uuid::new_v4().to_string();

    let product = state
        .products
        .product_by_id(ProductId(request.sku_id))
        .await
        .map_err(|error| collab_failure(&correlation_id, error))?
        .ok_or_else(|| {
            not_found(&correlation_id, EntityKind::Product, request.sku_id)
        })?;

    let marketplace_id = MarketplaceId(request.marketplace_id);
    let mut marketplace = state
        .marketplaces
        .marketplace_by_id(marketplace_id)
        .await
        .map_err(|error| collab_failure(&correlation_id, error))?
        .ok_or_else(|| {
            not_found(&correlation_id, EntityKind::Marketplace, request.marketplace_id)
        })?;

    // Brand-scoped cost rules, when present, replace the marketplace
    // defaults for the whole evaluation.
    marketplace.costs = state
        .marketplaces
        .effective_costs(marketplace_id, product.brand_id)
        .await
        .map_err(|error| collab_failure(&correlation_id, error))?;

    let rebate = build_rebate(&request);
    let breakdown = state
        .engine
        .evaluate_listing(
            &product,
            &marketplace,
            request.mode,
            request.value,
            request.input_tax,
            rebate,
        )
        .map_err(|error| pricing_failure(&correlation_id, error))?;

    info!(
        event_name = "pricing.calculate.completed",
        correlation_id = %correlation_id,
        sku_id = request.sku_id,
        marketplace_id = request.marketplace_id,
        mode = ?request.mode,
        selling_price = breakdown.selling_price,
        "pricing calculation completed"
    );

    Ok(Json(CalculateResponse {
        correlation_id,
        sku_id: request.sku_id,
        marketplace_id: request.marketplace_id,
        breakdown,
    }))
}

/// A rebate needs both the percentage and the mode; a percent without a
/// mode is ignored rather than guessed at.
fn build_rebate(request: &CalculateRequest) -> Option<Rebate> {
    let percent = request.rebate_percent?;
    let mode = request.rebate_mode?;
    Some(Rebate { percent, mode })
}

fn not_found(
    correlation_id: &str,
    entity: EntityKind,
    id: i64,
) -> (StatusCode, Json<ApiError>) {
    let error = PricingError::NotFound { entity, id };
    pricing_status_response(correlation_id, StatusCode::NOT_FOUND, &error)
}

fn pricing_failure(correlation_id: &str, error: PricingError) -> (StatusCode, Json<ApiError>) {
    let status = match error {
        PricingError::NotFound { .. } => StatusCode::NOT_FOUND,
        PricingError::Inactive { .. }
        | PricingError::InvalidNumber { .. }
        | PricingError::InvalidCostValue { .. }
        | PricingError::NoFeasiblePrice { .. }
        | PricingError::NoApplicableSlab => StatusCode::BAD_REQUEST,
    };
    pricing_status_response(correlation_id, status, &error)
}

fn pricing_status_response(
    correlation_id: &str,
    status: StatusCode,
    error: &PricingError,
) -> (StatusCode, Json<ApiError>) {
    warn!(
        event_name = "pricing.calculate.rejected",
        correlation_id = %correlation_id,
        status = status.as_u16(),
        error = %error,
        "pricing calculation rejected"
    );
    (
        status,
        Json(ApiError { correlation_id: correlation_id.to_string(), error: error.to_string() }),
    )
}

fn collab_failure(correlation_id: &str, error: CollabError) -> (StatusCode, Json<ApiError>) {
    warn!(
        event_name = "pricing.calculate.collaborator_failed",
        correlation_id = %correlation_id,
        error = %error,
        "collaborator lookup failed"
    );
    (
        StatusCode::BAD_GATEWAY,
        Json(ApiError { correlation_id: correlation_id.to_string(), error: error.to_string() }),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, Json};
    use pricely_core::collab::{MarketplaceProvider, ProductProvider, StaticCatalog};
    use pricely_core::{
        BrandId, CollabError, CostCategory, CostRule, CostValueType, Marketplace, MarketplaceId,
        PricingEngine, PricingMode, Product, ProductId,
    };

    use super::{calculate, CalculateRequest, PricingState};

    struct UnreachableCatalog;

    #[async_trait::async_trait]
    impl ProductProvider for UnreachableCatalog {
        async fn product_by_id(
            &self,
            _id: ProductId,
        ) -> Result<Option<Product>, CollabError> {
            Err(CollabError::Unreachable {
                service: "product-service".to_string(),
                detail: "connection refused".to_string(),
            })
        }
    }

    #[async_trait::async_trait]
    impl MarketplaceProvider for UnreachableCatalog {
        async fn marketplace_by_id(
            &self,
            _id: MarketplaceId,
        ) -> Result<Option<Marketplace>, CollabError> {
            Err(CollabError::Unreachable {
                service: "admin-service".to_string(),
                detail: "connection refused".to_string(),
            })
        }

        async fn effective_costs(
            &self,
            _marketplace: MarketplaceId,
            _brand: Option<pricely_core::BrandId>,
        ) -> Result<Vec<CostRule>, CollabError> {
            Err(CollabError::Unreachable {
                service: "admin-service".to_string(),
                detail: "connection refused".to_string(),
            })
        }
    }

    fn commission(value: f64, range: Option<&str>) -> CostRule {
        CostRule {
            id: None,
            category: CostCategory::Commission,
            value_type: CostValueType::Percent,
            value,
            price_range: range.map(str::to_string),
        }
    }

    fn state() -> PricingState {
        let catalog = StaticCatalog::new()
            .with_product(Product {
                id: ProductId(1),
                name: "Walnut desk organiser".to_string(),
                sku_code: "SKU-1".to_string(),
                cost: 1000.0,
                brand_id: None,
                enabled: true,
            })
            .with_product(Product {
                id: ProductId(2),
                name: "Retired sampler".to_string(),
                sku_code: "SKU-2".to_string(),
                cost: 100.0,
                brand_id: None,
                enabled: false,
            })
            .with_product(Product {
                id: ProductId(3),
                name: "Branded organiser".to_string(),
                sku_code: "SKU-3".to_string(),
                cost: 1000.0,
                brand_id: Some(BrandId(9)),
                enabled: true,
            })
            .with_marketplace(Marketplace {
                id: MarketplaceId(5),
                name: "bazaarly".to_string(),
                enabled: true,
                costs: vec![commission(10.0, Some("0-5000"))],
            })
            .with_brand_costs(MarketplaceId(5), BrandId(9), vec![commission(4.0, None)]);
        let catalog = Arc::new(catalog);

        PricingState {
            engine: PricingEngine::new(),
            products: catalog.clone(),
            marketplaces: catalog,
        }
    }

    fn request(sku_id: i64, mode: PricingMode, value: f64) -> CalculateRequest {
        CalculateRequest {
            sku_id,
            marketplace_id: 5,
            mode,
            value,
            input_tax: 0.0,
            rebate_percent: None,
            rebate_mode: None,
        }
    }

    #[tokio::test]
    async fn calculate_prices_a_listing_by_price() {
        let Json(response) =
            calculate(State(state()), Json(request(1, PricingMode::ByPrice, 1900.0)))
                .await
                .expect("calculation should succeed");

        assert_eq!(response.sku_id, 1);
        assert_eq!(response.breakdown.commission, 190.0);
        assert_eq!(response.breakdown.profit_percent, 71.0);
        assert!(!response.correlation_id.is_empty());
    }

    #[tokio::test]
    async fn calculate_solves_the_inverse_direction() {
        let Json(response) =
            calculate(State(state()), Json(request(1, PricingMode::ByProfitPercent, 71.0)))
                .await
                .expect("calculation should succeed");

        assert!((response.breakdown.selling_price - 1900.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn brand_scoped_costs_replace_marketplace_defaults() {
        let Json(response) =
            calculate(State(state()), Json(request(3, PricingMode::ByPrice, 1900.0)))
                .await
                .expect("calculation should succeed");

        // 4% brand commission instead of the 10% marketplace default.
        assert_eq!(response.breakdown.commission, 76.0);
    }

    #[tokio::test]
    async fn rebate_percent_without_a_mode_is_ignored() {
        let mut req = request(1, PricingMode::ByPrice, 1900.0);
        req.rebate_percent = Some(20.0);

        let Json(response) = calculate(State(state()), Json(req))
            .await
            .expect("calculation should succeed");

        assert_eq!(response.breakdown.commission, 190.0);
        assert_eq!(response.breakdown.commission_before_rebate, None);
        assert_eq!(response.breakdown.pending_receivable, None);
    }

    #[tokio::test]
    async fn rebate_applies_when_both_percent_and_mode_are_present() {
        let mut req = request(1, PricingMode::ByPrice, 1900.0);
        req.rebate_percent = Some(20.0);
        req.rebate_mode = Some(pricely_core::RebateMode::Net);

        let Json(response) = calculate(State(state()), Json(req))
            .await
            .expect("calculation should succeed");

        assert_eq!(response.breakdown.commission, 152.0);
        assert_eq!(response.breakdown.commission_before_rebate, Some(190.0));
    }

    #[tokio::test]
    async fn unknown_sku_maps_to_not_found() {
        let (status, Json(body)) =
            calculate(State(state()), Json(request(99, PricingMode::ByPrice, 1900.0)))
                .await
                .err()
                .expect("calculation should fail");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.error.contains("product 99"));
    }

    #[tokio::test]
    async fn disabled_product_maps_to_bad_request() {
        let (status, Json(body)) =
            calculate(State(state()), Json(request(2, PricingMode::ByPrice, 500.0)))
                .await
                .err()
                .expect("calculation should fail");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("not active"));
    }

    #[tokio::test]
    async fn unreachable_collaborator_maps_to_bad_gateway() {
        let state = PricingState {
            engine: PricingEngine::new(),
            products: Arc::new(UnreachableCatalog),
            marketplaces: Arc::new(UnreachableCatalog),
        };

        let (status, Json(body)) =
            calculate(State(state), Json(request(1, PricingMode::ByPrice, 1900.0)))
                .await
                .err()
                .expect("calculation should fail");

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.error.contains("unreachable"));
    }

    #[tokio::test]
    async fn invalid_value_maps_to_bad_request() {
        let (status, Json(body)) =
            calculate(State(state()), Json(request(1, PricingMode::ByPrice, -10.0)))
                .await
                .err()
                .expect("calculation should fail");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("value"));
    }
}
