//! Sale history
//!
//! Paged search over recorded sales and sale deletion (the server restores
//! the stock of the deleted sale's lots).

use chrono::NaiveDate;
use shared::{SaleHistoryPage, SaleId};

use crate::config::Endpoints;
use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

const DEFAULT_PAGE_SIZE: u32 = 10;

/// Filters of the history search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleHistoryQuery {
    pub start_date: Option<NaiveDate>,
    /// Inclusive
    pub end_date: Option<NaiveDate>,
    pub sale_id: Option<SaleId>,
    /// 1-based
    pub page: u32,
    pub page_size: u32,
}

impl Default for SaleHistoryQuery {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            sale_id: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SaleHistoryQuery {
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn sale(mut self, id: SaleId) -> Self {
        self.sale_id = Some(id);
        self
    }

    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.page = page.max(1);
        self.page_size = page_size.max(1);
        self
    }

    /// Query-string pairs, dates as `YYYY-MM-DD`
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(start) = self.start_date {
            params.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(id) = self.sale_id {
            params.push(("venda_id", id.to_string()));
        }
        params.push(("page", self.page.to_string()));
        params.push(("page_size", self.page_size.to_string()));
        params
    }
}

/// Number of pages for `total` records, as the server computes it
pub fn page_count(total: u64, page_size: u32) -> u64 {
    let size = u64::from(page_size.max(1));
    total.div_ceil(size)
}

#[derive(serde::Deserialize)]
struct DeleteResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// History API
pub struct SalesHistory<C> {
    http: C,
    endpoints: Endpoints,
}

impl<C: HttpClient> SalesHistory<C> {
    pub fn new(http: C, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    pub async fn search(&self, query: &SaleHistoryQuery) -> ClientResult<SaleHistoryPage> {
        let params = query.to_params();
        let page: SaleHistoryPage = match self.http.get(&self.endpoints.search_sales, &params).await
        {
            // Bad filters come back as 400 with the usual envelope
            Err(ClientError::Api {
                status: 400,
                message: Some(message),
            }) => return Err(ClientError::Rejected(message)),
            other => other?,
        };

        if !page.success {
            return Err(ClientError::Rejected(
                page.message.unwrap_or_else(|| "Erro ao buscar vendas.".into()),
            ));
        }
        Ok(page)
    }

    /// Delete a sale. Returns the server's confirmation message.
    pub async fn delete(&self, sale_id: SaleId) -> ClientResult<String> {
        let path = self.endpoints.delete_sale_path(sale_id);
        let response: DeleteResponse = self.http.delete(&path).await?;
        let message = response
            .message
            .unwrap_or_else(|| format!("Venda #{} apagada.", sale_id));

        if !response.success {
            return Err(ClientError::Rejected(message));
        }
        tracing::info!(%sale_id, "Sale deleted");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_include_only_set_filters() {
        let query = SaleHistoryQuery::default();
        assert_eq!(
            query.to_params(),
            vec![("page", "1".to_string()), ("page_size", "10".to_string())]
        );

        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let query = SaleHistoryQuery::default()
            .between(start, end)
            .sale(SaleId(12))
            .page(2, 25);
        assert_eq!(
            query.to_params(),
            vec![
                ("start_date", "2025-03-01".to_string()),
                ("end_date", "2025-03-31".to_string()),
                ("venda_id", "12".to_string()),
                ("page", "2".to_string()),
                ("page_size", "25".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_zero_is_clamped() {
        let query = SaleHistoryQuery::default().page(0, 0);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 1);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 5);
    }
}
