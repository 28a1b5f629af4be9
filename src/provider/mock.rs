//! Deterministic provider double for tests and offline development.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use tokio::sync::mpsc;

use super::{ProviderError, ProviderEvent, WalletProvider};

/// A request the double has served, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub params: Value,
}

/// Scripted wallet provider.
///
/// Responses are queued per method with [`MockProvider::script_ok`] /
/// [`MockProvider::script_err`] and served in order; the last scripted
/// response for a method is sticky and replays for subsequent calls.
/// Synthetic events reach every subscriber via [`MockProvider::emit`].
#[derive(Default)]
pub struct MockProvider {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, ProviderError>>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<ProviderEvent>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a resolved response for `method`.
    pub fn script_ok(&self, method: &str, response: Value) {
        self.responses.lock().entry(method.to_string()).or_default().push_back(Ok(response));
    }

    /// Queues a rejection for `method`.
    pub fn script_err(&self, method: &str, error: ProviderError) {
        self.responses.lock().entry(method.to_string()).or_default().push_back(Err(error));
    }

    /// Emits a synthetic event to every open subscription.
    pub fn emit(&self, event: ProviderEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Every request served so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Params of every request issued for `method`.
    pub fn requests_for(&self, method: &str) -> Vec<Value> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method)
            .map(|r| r.params.clone())
            .collect()
    }

    /// How many requests were issued for `method`.
    pub fn request_count(&self, method: &str) -> usize {
        self.requests.lock().iter().filter(|r| r.method == method).count()
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.requests.lock().push(RecordedRequest { method: method.to_string(), params });

        let mut responses = self.responses.lock();
        match responses.get_mut(method) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(|| {
                Err(ProviderError::new(format!("no scripted response for {}", method)))
            }),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(ProviderError::new(format!("no scripted response for {}", method)))),
            None => Err(ProviderError::new(format!("no scripted response for {}", method))),
        }
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<ProviderEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(flavor = "current_thread")]
    async fn test_scripted_responses_serve_in_order_then_stick() {
        let mock = MockProvider::new();
        mock.script_ok("eth_chainId", json!("0x1"));
        mock.script_ok("eth_chainId", json!("0x89"));

        assert_eq!(mock.request("eth_chainId", json!([])).await.unwrap(), json!("0x1"));
        assert_eq!(mock.request("eth_chainId", json!([])).await.unwrap(), json!("0x89"));
        // last response replays
        assert_eq!(mock.request("eth_chainId", json!([])).await.unwrap(), json!("0x89"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unscripted_method_rejects() {
        let mock = MockProvider::new();
        let err = mock.request("eth_getBalance", json!([])).await.unwrap_err();
        assert!(err.message.contains("eth_getBalance"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_requests_are_recorded_with_params() {
        let mock = MockProvider::new();
        mock.script_ok("eth_getBalance", json!("0x0"));
        let _ = mock.request("eth_getBalance", json!(["0xabc", "latest"])).await;

        assert_eq!(mock.request_count("eth_getBalance"), 1);
        assert_eq!(mock.requests_for("eth_getBalance"), vec![json!(["0xabc", "latest"])]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_emit_reaches_all_subscribers() {
        let mock = MockProvider::new();
        let mut a = mock.subscribe();
        let mut b = mock.subscribe();

        mock.emit(ProviderEvent::ChainChanged("0x5".to_string()));

        assert_eq!(a.recv().await, Some(ProviderEvent::ChainChanged("0x5".to_string())));
        assert_eq!(b.recv().await, Some(ProviderEvent::ChainChanged("0x5".to_string())));
    }
}
