use std::time::Duration;

use async_trait::async_trait;
use pricely_core::collab::{MarketplaceProvider, ProductProvider};
use pricely_core::config::CollaboratorsConfig;
use pricely_core::{
    BrandId, CollabError, CostRule, Marketplace, MarketplaceId, Product, ProductId,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http client construction failed: {0}")]
    Build(#[from] reqwest::Error),
}

/// Read-only client for the product catalog service.
pub struct ProductServiceClient {
    http: Client,
    base_url: String,
    auth_token: Option<SecretString>,
}

/// Read-only client for the marketplace admin service, which owns
/// marketplace lifecycle state and the cost rule tables.
pub struct AdminServiceClient {
    http: Client,
    base_url: String,
    auth_token: Option<SecretString>,
}

fn build_http(timeout_secs: u64) -> Result<Client, ClientError> {
    Ok(Client::builder().timeout(Duration::from_secs(timeout_secs)).build()?)
}

fn authorize(request: RequestBuilder, token: &Option<SecretString>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token.expose_secret()),
        None => request,
    }
}

/// Shared response handling: 404 is an absent entity, any other failure
/// status is the collaborator's problem, and an unparseable body counts as
/// a payload fault rather than a missing entity.
async fn fetch_optional<T: serde::de::DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<Option<T>, CollabError> {
    let response = request.send().await.map_err(|error| CollabError::Unreachable {
        service: service.to_string(),
        detail: error.to_string(),
    })?;

    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !response.status().is_success() {
        return Err(CollabError::UnexpectedStatus {
            service: service.to_string(),
            status: response.status().as_u16(),
        });
    }

    let payload = response.json::<T>().await.map_err(|error| CollabError::Payload {
        service: service.to_string(),
        detail: error.to_string(),
    })?;
    Ok(Some(payload))
}

impl ProductServiceClient {
    pub fn from_config(config: &CollaboratorsConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http(config.timeout_secs)?,
            base_url: config.product_service_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }
}

#[async_trait]
impl ProductProvider for ProductServiceClient {
    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, CollabError> {
        let url = format!("{}/api/products/{}", self.base_url, id.0);
        fetch_optional("product-service", authorize(self.http.get(&url), &self.auth_token)).await
    }
}

impl AdminServiceClient {
    pub fn from_config(config: &CollaboratorsConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http(config.timeout_secs)?,
            base_url: config.admin_service_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }
}

#[async_trait]
impl MarketplaceProvider for AdminServiceClient {
    async fn marketplace_by_id(
        &self,
        id: MarketplaceId,
    ) -> Result<Option<Marketplace>, CollabError> {
        let url = format!("{}/api/marketplaces/{}", self.base_url, id.0);
        fetch_optional("admin-service", authorize(self.http.get(&url), &self.auth_token)).await
    }

    async fn effective_costs(
        &self,
        marketplace: MarketplaceId,
        brand: Option<BrandId>,
    ) -> Result<Vec<CostRule>, CollabError> {
        let url = format!("{}/api/marketplaces/{}/costs", self.base_url, marketplace.0);
        let mut request = self.http.get(&url);
        if let Some(brand) = brand {
            request = request.query(&[("brandId", brand.0)]);
        }
        let costs: Option<Vec<CostRule>> =
            fetch_optional("admin-service", authorize(request, &self.auth_token)).await?;
        Ok(costs.unwrap_or_default())
    }
}
