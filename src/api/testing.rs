//! In-process [`Transport`] that records every request for assertions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use super::request::{ApiRequest, Transport};
use crate::error::ApiResult;

type Responder = dyn Fn(&ApiRequest) -> ApiResult<Value> + Send + Sync;

pub(crate) struct RecordingTransport {
    calls: Mutex<Vec<ApiRequest>>,
    holds: Mutex<HashMap<usize, Arc<Notify>>>,
    responder: Box<Responder>,
}

impl RecordingTransport {
    pub(crate) fn replying(
        responder: impl Fn(&ApiRequest) -> ApiResult<Value> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            holds: Mutex::new(HashMap::new()),
            responder: Box::new(responder),
        })
    }

    /// The `index`-th request (0-based) waits for `gate` before answering.
    pub(crate) fn hold(&self, index: usize, gate: Arc<Notify>) {
        self.holds.lock().unwrap().insert(index, gate);
    }

    pub(crate) fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// `"METHOD /path"` per call, in arrival order.
    pub(crate) fn log(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| format!("{} {}", call.method, call.path))
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        let gate = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(request.clone());
            let index = calls.len() - 1;
            self.holds.lock().unwrap().remove(&index)
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }

        (self.responder)(&request)
    }
}
