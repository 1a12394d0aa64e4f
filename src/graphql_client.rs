//! Upstream GraphQL client

use crate::error::{Error, Result, TransportError};
use crate::types::GraphQLRequest;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

/// Header carrying the upstream store view
pub const STORE_HEADER: &str = "Store";

/// Executes GraphQL requests on behalf of the services.
///
/// The auth token is a per-call argument, so one executor can be shared by every
/// in-flight request without one caller's credentials reaching another's call.
#[async_trait::async_trait]
pub trait GraphQLExecutor: Send + Sync {
    /// Send `request` upstream, adding `Authorization: Bearer <token>` when a
    /// non-empty token is given, and return the reply body verbatim.
    async fn execute(&self, request: &GraphQLRequest, auth_token: Option<&str>) -> Result<Value>;
}

/// HTTP client for a single GraphQL endpoint
///
/// Holds the endpoint URL and the base header set sent with every call.
/// Cloning is cheap: the underlying connection pool is shared.
///
/// # Example
///
/// ```rust,no_run
/// use rest_graphql_gateway::GraphQLClient;
///
/// # async fn example() -> rest_graphql_gateway::Result<()> {
/// let client = GraphQLClient::builder("https://shop.example.com/graphql")
///     .store("default")
///     .build()?;
///
/// let reply = client
///     .execute("query { storeConfig { store_name } }", None, None)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GraphQLClient {
    /// GraphQL endpoint URL
    endpoint: String,

    /// Base headers sent with every call
    headers: HeaderMap,

    http: reqwest::Client,
}

impl GraphQLClient {
    /// Start building a client for `endpoint`.
    pub fn builder(endpoint: impl Into<String>) -> GraphQLClientBuilder {
        GraphQLClientBuilder::new(endpoint)
    }

    /// Create a client with the default header set
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::builder(endpoint).build()
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Base headers sent with every call
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Set or clear the instance-wide `Authorization` header.
    ///
    /// A non-empty token overwrites the header with `Bearer <token>`; `None` or
    /// an empty token removes it.
    pub fn set_auth_token(&mut self, token: Option<&str>) -> Result<()> {
        match bearer_value(token)? {
            Some(value) => {
                self.headers.insert(AUTHORIZATION, value);
            }
            None => {
                self.headers.remove(AUTHORIZATION);
            }
        }
        Ok(())
    }

    /// Execute a GraphQL document.
    ///
    /// `extra_headers` are merged over the base headers and win on conflict.
    pub async fn execute(
        &self,
        query: &str,
        variables: Option<Map<String, Value>>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        let request = GraphQLRequest {
            query: query.to_string(),
            variables,
        };
        self.send(&request, extra_headers).await
    }

    /// POST `request` and return the parsed JSON body.
    ///
    /// Non-2xx replies and network failures become [`TransportError`]s. A 2xx
    /// body is returned untouched, GraphQL `errors` included.
    pub async fn send(
        &self,
        request: &GraphQLRequest,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        let mut headers = self.headers.clone();
        if let Some(extra) = extra_headers {
            for (name, value) in extra {
                headers.insert(name.clone(), value.clone());
            }
        }

        tracing::debug!(
            endpoint = %self.endpoint,
            operation = request.operation_name().unwrap_or("anonymous"),
            authenticated = headers.contains_key(AUTHORIZATION),
            "Executing GraphQL request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("GraphQL request to {} failed: {}", self.endpoint, e);
                TransportError::Request(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("GraphQL endpoint {} returned {}", self.endpoint, status);
            return Err(TransportError::Status { status, body }.into());
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait::async_trait]
impl GraphQLExecutor for GraphQLClient {
    async fn execute(&self, request: &GraphQLRequest, auth_token: Option<&str>) -> Result<Value> {
        match bearer_value(auth_token)? {
            Some(value) => {
                let mut extra = HeaderMap::new();
                extra.insert(AUTHORIZATION, value);
                self.send(request, Some(&extra)).await
            }
            None => self.send(request, None).await,
        }
    }
}

impl std::fmt::Debug for GraphQLClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLClient")
            .field("endpoint", &self.endpoint)
            .field(
                "headers",
                &self.headers.keys().map(HeaderName::as_str).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder for configuring GraphQL client creation.
pub struct GraphQLClientBuilder {
    endpoint: String,
    headers: HeaderMap,
    http: Option<reqwest::Client>,
}

impl GraphQLClientBuilder {
    fn new(endpoint: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            endpoint: endpoint.into(),
            headers,
            http: None,
        }
    }

    /// Send `Store: <code>` with every call.
    pub fn store(self, code: impl AsRef<str>) -> Self {
        self.header(STORE_HEADER, code)
    }

    /// Add a base header. Invalid names or values are skipped with a warning.
    pub fn header(mut self, name: &str, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        } else {
            tracing::warn!("Ignoring invalid base header {}", name);
        }
        self
    }

    /// Share an existing connection pool.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<GraphQLClient> {
        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .build()
                .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?,
        };

        Ok(GraphQLClient {
            endpoint: self.endpoint,
            headers: self.headers,
            http,
        })
    }
}

fn bearer_value(token: Option<&str>) -> Result<Option<HeaderValue>> {
    match token.filter(|t| !t.is_empty()) {
        Some(token) => {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| Error::InvalidHeader("auth token".to_string()))?;
            value.set_sensitive(true);
            Ok(Some(value))
        }
        None => Ok(None),
    }
}
