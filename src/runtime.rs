//! Runtime support for the REST facade - routing and request handlers.

use crate::error::Result;
use crate::middleware::{self, BearerToken, PathParam, RawBody};
use crate::services::Services;
use crate::types::{value_to_text, CartCreated, CheckoutStarted, ErrorBody, RequestBody};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

/// ServeMux - maps REST routes onto service calls
///
/// Successful calls answer with the upstream GraphQL reply verbatim; failures
/// answer with an [`ErrorBody`]. It can be converted into an Axum router.
#[derive(Clone)]
pub struct ServeMux {
    services: Arc<Services>,
    cors: bool,
}

impl ServeMux {
    /// Mux over `services` with CORS enabled
    pub fn new(services: Services) -> Self {
        Self {
            services: Arc::new(services),
            cors: true,
        }
    }

    /// Toggle the permissive CORS layer (on by default).
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    /// Services backing the handlers
    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Convert to Axum router
    pub fn into_router(self) -> Router {
        let mut router = Router::new()
            .route("/search", post(search))
            .route("/product/{sku}", get(product_details))
            .route("/product/article/{article_number}", get(product_by_article_number))
            .route("/cart/create", post(create_cart))
            .route("/cart/add", post(add_to_cart))
            .route("/cart/{cart_id}", get(get_cart))
            .route("/checkout/start", post(start_checkout))
            .route("/login", post(login))
            .route("/mcard-login", post(mcard_login))
            .route("/token-lifetime", get(token_lifetime))
            .fallback(not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .with_state(self.services);

        if self.cors {
            router = router.layer(middleware::cors_layer());
        }

        router
            .layer(middleware::trace_layer())
            .layer(middleware::catch_panic_layer())
    }
}

type AppState = State<Arc<Services>>;

async fn search(State(services): AppState, RawBody(body): RawBody) -> Result<Json<Value>> {
    let keyword = RequestBody::from_slice(&body).require("keyword")?;
    Ok(Json(services.products.search(keyword).await?))
}

async fn product_details(
    State(services): AppState,
    PathParam(sku): PathParam,
) -> Result<Json<Value>> {
    Ok(Json(services.products.details(sku).await?))
}

async fn product_by_article_number(
    State(services): AppState,
    PathParam(article_number): PathParam,
) -> Result<Json<Value>> {
    Ok(Json(services.products.by_article_number(article_number).await?))
}

async fn create_cart(
    State(services): AppState,
    RawBody(body): RawBody,
) -> Result<Json<CartCreated>> {
    let body = RequestBody::from_slice(&body);
    let customer_token = body.get("customer_token").map(value_to_text);

    let cart_id = services.carts.create_cart(customer_token.as_deref()).await?;
    Ok(Json(CartCreated { cart_id }))
}

async fn add_to_cart(
    State(services): AppState,
    token: BearerToken,
    RawBody(body): RawBody,
) -> Result<Json<Value>> {
    let body = RequestBody::from_slice(&body);
    let cart_id = body.require("cart_id")?;
    let sku = body.require("sku")?;
    let quantity = body.get("quantity").cloned().unwrap_or(Value::from(1));

    let reply = services
        .carts
        .add_to_cart(cart_id, sku, quantity, token.as_deref())
        .await?;
    Ok(Json(reply))
}

async fn get_cart(
    State(services): AppState,
    token: BearerToken,
    PathParam(cart_id): PathParam,
) -> Result<Json<Value>> {
    Ok(Json(services.carts.get_cart(cart_id, token.as_deref()).await?))
}

async fn start_checkout(
    State(services): AppState,
    RawBody(body): RawBody,
) -> Result<Json<CheckoutStarted>> {
    let cart_id = RequestBody::from_slice(&body).require("cart_id")?;
    let redirect_url = services.carts.checkout_url(&value_to_text(&cart_id));

    Ok(Json(CheckoutStarted {
        success: true,
        cart_id,
        redirect_url,
    }))
}

async fn login(State(services): AppState, RawBody(body): RawBody) -> Result<Json<Value>> {
    let body = RequestBody::from_slice(&body);
    let email = body.require("email")?;
    let password = body.require("password")?;
    Ok(Json(services.auth.login(email, password).await?))
}

async fn mcard_login(State(services): AppState, RawBody(body): RawBody) -> Result<Json<Value>> {
    let input = RequestBody::from_slice(&body).require("input")?;
    Ok(Json(services.auth.mcard_login(input).await?))
}

async fn token_lifetime(State(services): AppState) -> Result<Json<Value>> {
    Ok(Json(services.auth.token_lifetime().await?))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found")))
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed")),
    )
}
