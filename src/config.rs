//! Process configuration

use clap::{Parser, ValueEnum};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_API_URL: &str = "https://online.mmvietnam.com/graphql";
pub const DEFAULT_ECOMMERCE_URL: &str = "https://online.mmvietnam.com";
pub const DEFAULT_STORE_CODE: &str = "b2c_10010_vi";
pub const DEFAULT_PORT: u16 = 5000;

/// Deployment environment. Development turns on debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

/// Gateway configuration, read from flags with environment fallbacks.
#[derive(Debug, Clone, Parser)]
#[command(name = "rest-graphql-gateway", version, about = "REST facade over a GraphQL storefront API")]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "LISTEN_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Upstream GraphQL endpoint
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Storefront root, used for checkout links and the cart creation fallback
    #[arg(long, env = "ECOMMERCE_URL", default_value = DEFAULT_ECOMMERCE_URL)]
    pub ecommerce_url: String,

    /// Store view sent in the `Store` header
    #[arg(long, env = "STORE_CODE", default_value = DEFAULT_STORE_CODE)]
    pub store_code: String,

    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,
}

impl Config {
    /// True when `APP_ENV` is `development`
    pub fn debug(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Socket address the server binds
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Storefront root without a trailing slash
    pub fn ecommerce_base_url(&self) -> &str {
        self.ecommerce_url.trim_end_matches('/')
    }

    /// GraphQL endpoint hosted by the storefront itself
    pub fn storefront_graphql_url(&self) -> String {
        format!("{}/graphql", self.ecommerce_base_url())
    }

    /// Default `tracing` filter when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug() {
            "debug"
        } else {
            "info"
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            api_url: DEFAULT_API_URL.to_string(),
            ecommerce_url: DEFAULT_ECOMMERCE_URL.to_string(),
            store_code: DEFAULT_STORE_CODE.to_string(),
            environment: Environment::default(),
        }
    }
}
