//! Lot search
//!
//! Backs the product search box of the register page. After a sale the
//! checkout clears the query and refreshes, so stock shown is current.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::{LotSearchResponse, LotSummary};

use crate::ClientResult;
use crate::collaborators::ProductSearch;
use crate::http::HttpClient;

/// Search box state plus the last results
pub struct LotSearch<C> {
    http: C,
    endpoint: String,
    query: RwLock<String>,
    results: RwLock<Vec<LotSummary>>,
}

impl<C: HttpClient> LotSearch<C> {
    pub fn new(http: C, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            query: RwLock::new(String::new()),
            results: RwLock::new(Vec::new()),
        }
    }

    pub fn query(&self) -> String {
        self.query.read().clone()
    }

    pub fn results(&self) -> Vec<LotSummary> {
        self.results.read().clone()
    }

    /// Set the query and run it
    pub async fn search(&self, query: &str) -> ClientResult<Vec<LotSummary>> {
        *self.query.write() = query.trim().to_string();
        self.run().await
    }

    async fn run(&self) -> ClientResult<Vec<LotSummary>> {
        let query = self.query();
        if query.is_empty() {
            self.results.write().clear();
            return Ok(Vec::new());
        }

        let response: LotSearchResponse = self
            .http
            .get(&self.endpoint, &[("query", query.clone())])
            .await?;
        tracing::debug!(%query, hits = response.lotes.len(), "Lot search");

        *self.results.write() = response.lotes.clone();
        Ok(response.lotes)
    }
}

#[async_trait]
impl<C: HttpClient> ProductSearch for LotSearch<C> {
    fn clear_query(&self) {
        self.query.write().clear();
    }

    async fn refresh(&self) -> ClientResult<()> {
        self.run().await.map(|_| ())
    }
}
