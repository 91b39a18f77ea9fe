//! Shared test support utilities for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mayar_core::http::{AdapterResult, Headers};
use mayar_core::{HttpAdapter, HttpMethod, MayarProvider, ProviderConfig, RawResponse, RequestPayload, TransportError};
use serde_json::{json, Value};

/// One request seen by [`ScriptedAdapter`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub payload: RequestPayload,
}

/// Adapter double replying from a queue of scripted outcomes
///
/// When the queue is empty it replies with an empty 200 JSON object.
#[derive(Default)]
pub struct ScriptedAdapter {
    replies: Mutex<VecDeque<AdapterResult>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedAdapter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply_json(self: &Arc<Self>, body: Value) -> Arc<Self> {
        self.push(Ok(RawResponse::ok_json(&body)))
    }

    pub fn reply_raw(self: &Arc<Self>, status: u16, body: &str) -> Arc<Self> {
        self.push(Ok(RawResponse::new(status, body)))
    }

    pub fn fail(self: &Arc<Self>, error: TransportError) -> Arc<Self> {
        self.push(Err(error))
    }

    fn push(self: &Arc<Self>, reply: AdapterResult) -> Arc<Self> {
        self.replies.lock().unwrap().push_back(reply);
        Arc::clone(self)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl HttpAdapter for ScriptedAdapter {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: RequestPayload,
        _headers: &Headers,
    ) -> AdapterResult {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            payload,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::ok_json(&json!({}))))
    }
}

/// Provider backed by a scripted adapter
pub fn provider_with(adapter: &Arc<ScriptedAdapter>) -> MayarProvider {
    let adapter: Arc<dyn HttpAdapter> = Arc::clone(adapter) as Arc<dyn HttpAdapter>;
    MayarProvider::with_adapter(ProviderConfig::new().with_api_token("test-token"), adapter)
        .expect("provider should build")
}

/// Minimal valid invoice payload
pub fn invoice_payload() -> Value {
    json!({
        "name": "Ana",
        "email": "ana@example.com",
        "mobile": "08123456789",
        "redirectUrl": "https://shop.example/thanks",
        "description": "Order #1",
        "expiredAt": "2026-12-31T23:59:59.000Z",
        "items": [{"quantity": 1, "rate": 150000, "description": "T-shirt"}]
    })
}

/// Successful list body with pagination
pub fn paginated_body() -> Value {
    json!({
        "statusCode": 200,
        "messages": "success",
        "hasMore": true,
        "pageCount": 4,
        "pageSize": 10,
        "page": 1,
        "data": [{"id": "a"}, {"id": "b"}]
    })
}
