//! Product catalog lookups

use crate::error::Result;
use crate::graphql_client::GraphQLExecutor;
use crate::types::GraphQLRequest;
use serde_json::Value;
use std::sync::Arc;

const SEARCH: &str = include_str!("../../graphql/product/search.graphql");
const DETAILS: &str = include_str!("../../graphql/product/details.graphql");
const BY_ARTICLE_NUMBER: &str = include_str!("../../graphql/product/by_article_number.graphql");

#[derive(Clone)]
pub struct ProductService {
    executor: Arc<dyn GraphQLExecutor>,
}

impl ProductService {
    /// Wrap the executor that serves the catalog operations
    pub fn new(executor: Arc<dyn GraphQLExecutor>) -> Self {
        Self { executor }
    }

    /// Keyword search, sorted by relevance. Returns the upstream reply as-is.
    pub async fn search(&self, keyword: impl Into<Value>) -> Result<Value> {
        let request = GraphQLRequest::new(SEARCH).variable("keyword", keyword);
        self.executor.execute(&request, None).await
    }

    /// Exact-match lookup by SKU.
    ///
    /// The reply lists matches under `data.products.items`; it may be empty.
    pub async fn details(&self, sku: impl Into<Value>) -> Result<Value> {
        let request = GraphQLRequest::new(DETAILS).variable("sku", sku);
        self.executor.execute(&request, None).await
    }

    /// Exact-match lookup on the store's `mm_art_no` attribute.
    pub async fn by_article_number(&self, article_number: impl Into<Value>) -> Result<Value> {
        let request =
            GraphQLRequest::new(BY_ARTICLE_NUMBER).variable("articleNumber", article_number);
        self.executor.execute(&request, None).await
    }
}
