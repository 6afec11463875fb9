//! Recording adapter for the `RpcTransport` port.

use std::sync::{Arc, Mutex};

use crate::cassette::format::Outcome;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{RpcTransport, TransportError};

/// Records every call while delegating to an inner transport.
pub struct RecordingRpcTransport {
    inner: Box<dyn RpcTransport>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRpcTransport {
    /// Creates a recording transport wrapping the given implementation.
    pub fn new(inner: Box<dyn RpcTransport>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl RpcTransport for RecordingRpcTransport {
    fn invoke(&self, service: &str, method: &str, params: &str) -> Result<String, TransportError> {
        let result = self.inner.invoke(service, method, params);
        let outcome = match &result {
            Ok(body) => Outcome::Response(body.clone()),
            Err(e) => Outcome::TransportError(e.to_string()),
        };
        match self.recorder.lock() {
            Ok(mut recorder) => recorder.record(service, method, params, outcome),
            Err(_) => tracing::warn!(service, method, "recorder lock poisoned; call not recorded"),
        }
        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
