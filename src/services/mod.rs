//! Domain services
//!
//! Each service owns a fixed catalog of GraphQL documents (under `graphql/`)
//! and exposes one method per operation. Services hold no per-request state;
//! credentials travel as call arguments.

pub mod auth;
pub mod cart;
pub mod product;

pub use auth::AuthService;
pub use cart::{CartService, FallbackCart};
pub use product::ProductService;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::graphql_client::{GraphQLClient, GraphQLExecutor};
use std::sync::Arc;

/// The services behind the REST routes
#[derive(Clone)]
pub struct Services {
    pub products: ProductService,
    pub carts: CartService,
    pub auth: AuthService,
}

impl Services {
    /// Wire services to explicit executors.
    ///
    /// `api` serves every operation; `storefront` only receives the cart
    /// creation fallback.
    pub fn new(
        api: Arc<dyn GraphQLExecutor>,
        storefront: Arc<dyn GraphQLExecutor>,
        ecommerce_url: impl Into<String>,
    ) -> Self {
        Self {
            products: ProductService::new(api.clone()),
            carts: CartService::new(api.clone(), storefront, ecommerce_url),
            auth: AuthService::new(api),
        }
    }

    /// Build HTTP clients for both upstream endpoints from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        let api = GraphQLClient::builder(&config.api_url)
            .store(&config.store_code)
            .http_client(http.clone())
            .build()?;
        let storefront = GraphQLClient::builder(config.storefront_graphql_url())
            .store(&config.store_code)
            .http_client(http)
            .build()?;

        tracing::debug!(?api, ?storefront, "Configured GraphQL clients");

        Ok(Self::new(
            Arc::new(api),
            Arc::new(storefront),
            config.ecommerce_base_url(),
        ))
    }
}
