//! RPC transport port for XMLMC method calls.

/// Error type returned by transport implementations.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Delivers one XMLMC method call and returns the raw response body.
///
/// Abstracting the transport keeps HTTP and authentication out of the
/// client, and allows cassette recording and replay of whole runs.
pub trait RpcTransport: Send + Sync {
    /// Invokes `service`/`method` with a rendered `<params>` block (empty
    /// when the call takes no parameters).
    ///
    /// # Errors
    ///
    /// Returns an error when the call cannot be delivered or its response
    /// cannot be read. A response reporting a failure status is not an
    /// error at this level.
    fn invoke(&self, service: &str, method: &str, params: &str) -> Result<String, TransportError>;

    /// Human-readable location of the instance, used in recordings.
    fn endpoint(&self) -> &str {
        "unknown"
    }
}
