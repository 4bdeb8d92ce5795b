// caixa-client/tests/common/mod.rs
// Test doubles shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use caixa_client::{
    CartDisplay, CartHandle, CartItem, ClientError, ClientResult, Decimal, HttpClient, Notifier,
    ProductSearch,
};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::oneshot;

/// Host page: renders the cart total and collects alerts
#[derive(Default)]
pub struct FakePage {
    pub rendered_total: Mutex<String>,
    pub alerts: Mutex<Vec<String>>,
    pub refreshes: Mutex<Vec<usize>>,
}

impl FakePage {
    pub fn rendering(cart: &CartHandle) -> Arc<Self> {
        let page = Arc::new(Self::default());
        page.refresh(&cart.items());
        page
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.alerts.lock().last().cloned()
    }
}

impl CartDisplay for FakePage {
    fn rendered_total(&self) -> String {
        self.rendered_total.lock().clone()
    }

    fn refresh(&self, items: &[CartItem]) {
        let total: Decimal = items.iter().map(CartItem::subtotal).sum();
        *self.rendered_total.lock() = format!("{:.2}", total);
        self.refreshes.lock().push(items.len());
    }
}

impl Notifier for FakePage {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }
}

/// Product search that only counts calls
#[derive(Default)]
pub struct CountingSearch {
    pub cleared: AtomicUsize,
    pub refreshed: AtomicUsize,
}

#[async_trait]
impl ProductSearch for CountingSearch {
    fn clear_query(&self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
    }

    async fn refresh(&self) -> ClientResult<()> {
        self.refreshed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Product search whose refresh always fails
#[derive(Default)]
pub struct FailingSearch {
    pub refreshed: AtomicUsize,
}

#[async_trait]
impl ProductSearch for FailingSearch {
    fn clear_query(&self) {}

    async fn refresh(&self) -> ClientResult<()> {
        self.refreshed.fetch_add(1, Ordering::SeqCst);
        Err(ClientError::Api {
            status: 503,
            message: Some("busca indisponível".into()),
        })
    }
}

#[derive(Default)]
struct ScriptedInner {
    responses: Mutex<VecDeque<ClientResult<serde_json::Value>>>,
    requests: Mutex<Vec<(String, serde_json::Value)>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

/// In-memory HTTP client answering from a script
#[derive(Clone, Default)]
pub struct ScriptedHttp {
    inner: Arc<ScriptedInner>,
}

impl ScriptedHttp {
    pub fn respond(&self, response: ClientResult<serde_json::Value>) -> &Self {
        self.inner.responses.lock().push_back(response);
        self
    }

    /// Hold the next request until the returned sender fires (or is dropped)
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.inner.gate.lock() = Some(rx);
        tx
    }

    pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.inner.requests.lock().clone()
    }

    async fn answer<T: DeserializeOwned>(&self, path: &str, body: serde_json::Value) -> ClientResult<T> {
        self.inner.requests.lock().push((path.to_string(), body));

        let gate = self.inner.gate.lock().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }

        let next = self
            .inner
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::InvalidResponse("no scripted response".into())));
        Ok(serde_json::from_value(next?)?)
    }
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T> {
        let query: serde_json::Map<String, serde_json::Value> = query
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
            .collect();
        self.answer(path, serde_json::Value::Object(query)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.answer(path, body).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.answer(path, serde_json::Value::Null).await
    }
}

pub fn line(lot_id: i64, quantity: u32, cents: i64) -> CartItem {
    CartItem {
        lot_id,
        lot_code: format!("L-{:03}", lot_id),
        name: format!("Muda {}", lot_id),
        quantity,
        unit_price: Decimal::new(cents, 2),
    }
}
