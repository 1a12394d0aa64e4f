//! Gateway builder and main orchestration

use crate::config::Config;
use crate::error::Result;
use crate::runtime::ServeMux;
use crate::services::Services;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;

/// Main Gateway struct - entry point for the library
pub struct Gateway {
    mux: ServeMux,
    config: Config,
}

impl Gateway {
    /// Create a new gateway builder
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    /// Get the ServeMux
    pub fn mux(&self) -> &ServeMux {
        &self.mux
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert gateway into Axum router
    pub fn into_router(self) -> Router {
        self.mux.into_router()
    }
}

/// Builder for creating a Gateway
pub struct GatewayBuilder {
    config: Config,
    services: Option<Services>,
    cors: bool,
}

impl GatewayBuilder {
    /// Create a new gateway builder
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            services: None,
            cors: true,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Use prebuilt services instead of deriving HTTP clients from the config.
    pub fn with_services(mut self, services: Services) -> Self {
        self.services = Some(services);
        self
    }

    /// Toggle the permissive CORS layer.
    pub fn enable_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    /// Build the gateway
    pub fn build(self) -> Result<Gateway> {
        let services = match self.services {
            Some(services) => services,
            None => Services::from_config(&self.config)?,
        };

        Ok(Gateway {
            mux: ServeMux::new(services).with_cors(self.cors),
            config: self.config,
        })
    }

    /// Build and start the gateway server on the configured address
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Build and serve until `shutdown` resolves
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let gateway = self.build()?;
        let addr: SocketAddr = gateway.config.listen_addr();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("Gateway server listening on {}", listener.local_addr()?);

        let app = gateway.into_router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}
