use std::sync::Arc;

use pricely_core::collab::{MarketplaceProvider, ProductProvider};
use pricely_core::config::{AppConfig, ConfigError, LoadOptions};
use pricely_core::PricingEngine;
use thiserror::Error;
use tracing::info;

use crate::clients::{AdminServiceClient, ClientError, ProductServiceClient};
use crate::pricing::PricingState;

pub struct Application {
    pub config: AppConfig,
    pub engine: PricingEngine,
    pub products: Arc<dyn ProductProvider>,
    pub marketplaces: Arc<dyn MarketplaceProvider>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("collaborator client construction failed: {0}")]
    Clients(#[from] ClientError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let products = ProductServiceClient::from_config(&config.collaborators)?;
    let marketplaces = AdminServiceClient::from_config(&config.collaborators)?;
    info!(
        event_name = "system.bootstrap.collaborators_configured",
        correlation_id = "bootstrap",
        product_service_url = %config.collaborators.product_service_url,
        admin_service_url = %config.collaborators.admin_service_url,
        "collaborator clients constructed"
    );

    Ok(Application {
        config,
        engine: PricingEngine::new(),
        products: Arc::new(products),
        marketplaces: Arc::new(marketplaces),
    })
}

impl Application {
    pub fn into_state(self) -> PricingState {
        PricingState { engine: self.engine, products: self.products, marketplaces: self.marketplaces }
    }
}
