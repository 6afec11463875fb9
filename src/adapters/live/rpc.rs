//! Live adapter for the `RpcTransport` port over HTTP.

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::ports::{RpcTransport, TransportError};
use crate::xmlmc;

const XMLMC_CONTENT_TYPE: &str = "text/xmlmc";

/// Posts XMLMC method calls to an instance endpoint with API-key auth.
pub struct LiveRpcTransport {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl LiveRpcTransport {
    /// Creates a transport for `endpoint` (e.g. `https://eurapi.hornbill.com/acme/xmlmc`).
    #[must_use]
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, service: &str, method: &str) -> String {
        format!("{}/{service}/?method={method}", self.endpoint)
    }
}

impl RpcTransport for LiveRpcTransport {
    fn invoke(&self, service: &str, method: &str, params: &str) -> Result<String, TransportError> {
        let url = self.url(service, method);
        tracing::trace!(%url, "invoking xmlmc method");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, XMLMC_CONTENT_TYPE)
            .header(AUTHORIZATION, format!("ESP-APIKEY {}", self.api_key))
            .body(xmlmc::method_call(service, method, params))
            .send()
            .map_err(|e| -> TransportError { format!("request to {url} failed: {e}").into() })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| -> TransportError { format!("failed to read response: {e}").into() })?;

        // Failed calls usually still carry a methodCallResult body with the
        // instance's error text; only an empty body is a transport failure.
        if !status.is_success() && body.trim().is_empty() {
            return Err(format!("HTTP {}", status.as_u16()).into());
        }
        Ok(body)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
