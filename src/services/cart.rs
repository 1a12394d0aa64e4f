//! Cart operations

use crate::error::{Error, Result};
use crate::graphql_client::GraphQLExecutor;
use crate::types::GraphQLRequest;
use serde_json::Value;
use std::sync::Arc;

const CREATE_GUEST_CART: &str = include_str!("../../graphql/cart/create_guest_cart.graphql");
const CREATE_EMPTY_CART: &str = include_str!("../../graphql/cart/create_empty_cart.graphql");
const ADD_TO_CART: &str = include_str!("../../graphql/cart/add_to_cart.graphql");
const GET_CART: &str = include_str!("../../graphql/cart/get_cart.graphql");

/// Outcome of the storefront cart-creation fallback.
#[derive(Debug)]
pub enum FallbackCart {
    /// The storefront returned a cart id
    Created(String),
    /// The call succeeded but carried no cart id
    Missing,
    /// The storefront could not be reached or answered non-2xx
    Failed(Error),
}

/// Cart operations against the primary API, plus the storefront fallback for
/// customer cart creation.
#[derive(Clone)]
pub struct CartService {
    api: Arc<dyn GraphQLExecutor>,
    storefront: Arc<dyn GraphQLExecutor>,
    ecommerce_url: String,
}

impl CartService {
    /// `api` serves the cart operations, `storefront` only the creation fallback
    pub fn new(
        api: Arc<dyn GraphQLExecutor>,
        storefront: Arc<dyn GraphQLExecutor>,
        ecommerce_url: impl Into<String>,
    ) -> Self {
        Self {
            api,
            storefront,
            ecommerce_url: ecommerce_url.into(),
        }
    }

    /// Create a guest cart. `None` when the reply lacks `data.createGuestCart.cart.id`.
    pub async fn create_guest_cart(&self) -> Result<Option<String>> {
        let reply = self
            .api
            .execute(&GraphQLRequest::new(CREATE_GUEST_CART), None)
            .await?;
        Ok(string_at(&reply, "/data/createGuestCart/cart/id"))
    }

    /// Create an empty cart for the customer owning `auth_token`.
    pub async fn create_empty_cart(&self, auth_token: &str) -> Result<Option<String>> {
        let reply = self
            .api
            .execute(&GraphQLRequest::new(CREATE_EMPTY_CART), Some(auth_token))
            .await?;
        Ok(string_at(&reply, "/data/cartId"))
    }

    /// Same mutation as [`create_empty_cart`](Self::create_empty_cart), sent to
    /// the storefront's own GraphQL endpoint.
    pub async fn create_empty_cart_via_storefront(&self, auth_token: &str) -> FallbackCart {
        let request = GraphQLRequest::new(CREATE_EMPTY_CART);
        match self.storefront.execute(&request, Some(auth_token)).await {
            Ok(reply) => match string_at(&reply, "/data/cartId") {
                Some(id) => FallbackCart::Created(id),
                None => FallbackCart::Missing,
            },
            Err(err) => FallbackCart::Failed(err),
        }
    }

    /// Create a cart for a customer, or a guest cart when no token is given.
    ///
    /// With a token the standard mutation is tried first; the storefront is
    /// only asked when that call succeeds without a cart id. A transport
    /// failure of the standard call is returned as-is.
    pub async fn create_cart(&self, customer_token: Option<&str>) -> Result<String> {
        let Some(token) = customer_token.filter(|t| !t.is_empty()) else {
            return self.create_guest_cart().await?.ok_or(Error::CartNotCreated);
        };

        if let Some(id) = self.create_empty_cart(token).await? {
            return Ok(id);
        }

        tracing::info!("createEmptyCart returned no cart id, trying storefront endpoint");
        match self.create_empty_cart_via_storefront(token).await {
            FallbackCart::Created(id) => Ok(id),
            FallbackCart::Missing => Err(Error::CartNotCreated),
            FallbackCart::Failed(err) => {
                tracing::warn!("Storefront cart creation failed: {}", err);
                Err(err)
            }
        }
    }

    /// Add one line item. The reply, `user_errors` included, is returned as-is.
    pub async fn add_to_cart(
        &self,
        cart_id: impl Into<Value>,
        sku: impl Into<Value>,
        quantity: impl Into<Value>,
        auth_token: Option<&str>,
    ) -> Result<Value> {
        let request = GraphQLRequest::new(ADD_TO_CART)
            .variable("cartId", cart_id)
            .variable("sku", sku)
            .variable("quantity", quantity);
        self.api.execute(&request, auth_token).await
    }

    /// Cart lines and grand total as computed upstream.
    pub async fn get_cart(
        &self,
        cart_id: impl Into<Value>,
        auth_token: Option<&str>,
    ) -> Result<Value> {
        let request = GraphQLRequest::new(GET_CART).variable("cartId", cart_id);
        self.api.execute(&request, auth_token).await
    }

    /// Storefront checkout page for `cart_id`. No network call.
    pub fn checkout_url(&self, cart_id: &str) -> String {
        format!("{}/checkout/cart/?cart_id={}", self.ecommerce_url, cart_id)
    }
}

fn string_at(reply: &Value, pointer: &str) -> Option<String> {
    reply
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}
