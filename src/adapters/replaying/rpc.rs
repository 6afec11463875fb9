//! Replaying adapter for the `RpcTransport` port.

use std::sync::Mutex;

use crate::cassette::format::{Cassette, Outcome};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{RpcTransport, TransportError};

/// Serves recorded responses from a cassette.
pub struct ReplayingRpcTransport {
    replayer: Mutex<CassetteReplayer>,
    endpoint: String,
}

impl ReplayingRpcTransport {
    /// Creates a replaying transport for a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        Self {
            replayer: Mutex::new(CassetteReplayer::new(cassette)),
            endpoint: cassette.endpoint.clone(),
        }
    }

    /// Number of recorded calls not yet replayed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replayer.lock().map_or(0, |replayer| replayer.remaining())
    }
}

impl RpcTransport for ReplayingRpcTransport {
    fn invoke(&self, service: &str, method: &str, params: &str) -> Result<String, TransportError> {
        let outcome = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            replayer.next_interaction(service, method, params).outcome
        };
        match outcome {
            Outcome::Response(body) => Ok(body),
            Outcome::TransportError(message) => Err(message.into()),
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
