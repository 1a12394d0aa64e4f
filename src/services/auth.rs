//! Customer authentication

use crate::error::Result;
use crate::graphql_client::GraphQLExecutor;
use crate::types::GraphQLRequest;
use serde_json::Value;
use std::sync::Arc;

const LOGIN: &str = include_str!("../../graphql/auth/login.graphql");
const MCARD_LOGIN: &str = include_str!("../../graphql/auth/mcard_login.graphql");
const TOKEN_LIFETIME: &str = include_str!("../../graphql/auth/token_lifetime.graphql");

#[derive(Clone)]
pub struct AuthService {
    executor: Arc<dyn GraphQLExecutor>,
}

impl AuthService {
    /// Wrap the executor that serves the auth operations
    pub fn new(executor: Arc<dyn GraphQLExecutor>) -> Self {
        Self { executor }
    }

    /// Exchange credentials for a customer token.
    ///
    /// Bad credentials come back as a GraphQL `errors` array, not an `Err`.
    pub async fn login(&self, email: impl Into<Value>, password: impl Into<Value>) -> Result<Value> {
        let request = GraphQLRequest::new(LOGIN)
            .variable("email", email)
            .variable("password", password);
        self.executor.execute(&request, None).await
    }

    /// Membership-card login. `input` is forwarded untouched.
    pub async fn mcard_login(&self, input: Value) -> Result<Value> {
        let request = GraphQLRequest::new(MCARD_LOGIN).variable("input", input);
        self.executor.execute(&request, None).await
    }

    pub async fn token_lifetime(&self) -> Result<Value> {
        self.executor
            .execute(&GraphQLRequest::new(TOKEN_LIFETIME), None)
            .await
    }
}
