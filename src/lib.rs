//! # rest-graphql-gateway
//!
//! A REST facade in front of a single GraphQL e-commerce endpoint. Each route
//! binds its inputs to a fixed GraphQL document, forwards it upstream and
//! relays the JSON reply unchanged.
//!
//! ## Routes
//!
//! | Method | Path | Input |
//! |---|---|---|
//! | POST | `/search` | `{keyword}` |
//! | GET | `/product/{sku}` | |
//! | GET | `/product/article/{article_number}` | |
//! | POST | `/cart/create` | `{customer_token?}` |
//! | POST | `/cart/add` | `{cart_id, sku, quantity?}` + bearer token |
//! | GET | `/cart/{cart_id}` | bearer token |
//! | POST | `/checkout/start` | `{cart_id}` |
//! | POST | `/login` | `{email, password}` |
//! | POST | `/mcard-login` | `{input}` |
//! | GET | `/token-lifetime` | |
//!
//! Upstream GraphQL `errors` are never interpreted: a 2xx upstream reply is
//! relayed with status 200 whatever it contains.
//!
//! ## Main Components
//!
//! - [`Gateway`]: The main entry point for creating and running the gateway.
//! - [`GatewayBuilder`]: Configuration builder for the gateway.
//! - [`GraphQLClient`]: HTTP client for one upstream GraphQL endpoint.
//! - [`Services`]: Product, cart and auth operations.
//! - [`ServeMux`]: REST routing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rest_graphql_gateway::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = Gateway::builder()
//!         .with_config(Config::default())
//!         .build()?
//!         .into_router();
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod graphql_client;
pub mod middleware;
pub mod runtime;
pub mod services;
pub mod types;

pub use config::{Config, Environment};
pub use error::{Error, Result, TransportError};
pub use gateway::{Gateway, GatewayBuilder};
pub use graphql_client::{GraphQLClient, GraphQLClientBuilder, GraphQLExecutor};
pub use middleware::BearerToken;
pub use runtime::ServeMux;
pub use services::{AuthService, CartService, FallbackCart, ProductService, Services};
pub use types::{ErrorBody, GraphQLRequest};
