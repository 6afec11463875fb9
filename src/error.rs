//! Error types for remote calls and reconciliation.

use thiserror::Error;

use crate::relation::RelationshipKey;

/// Failure of a single XMLMC method call.
///
/// Every variant carries the name of the operation that failed, so the
/// rendered message reads `operation:Stage:cause`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcError {
    /// The transport could not deliver the call or read its response.
    #[error("{operation}:Invoke:{cause}")]
    Invocation {
        /// Operation that issued the call.
        operation: &'static str,
        /// Transport error text.
        cause: String,
    },

    /// The response body is not a well-formed `methodCallResult`.
    #[error("{operation}:Unmarshal:{cause}")]
    Decode {
        /// Operation that issued the call.
        operation: &'static str,
        /// Parser error text.
        cause: String,
    },

    /// The instance answered with a non-`ok` status.
    #[error("{operation}:Xmlmc:{message}")]
    RemoteStatus {
        /// Operation that issued the call.
        operation: &'static str,
        /// Error text supplied by the instance, verbatim.
        message: String,
    },
}

impl RpcError {
    /// Returns the name of the operation that failed.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Invocation { operation, .. }
            | Self::Decode { operation, .. }
            | Self::RemoteStatus { operation, .. } => operation,
        }
    }
}

/// Errors raised while applying reconciliation actions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// A remote call failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Create was requested for a relationship that already exists remotely.
    #[error("relationship {key} is already cached; refusing to create it again")]
    AlreadyCached {
        /// Key of the existing relationship.
        key: RelationshipKey,
    },

    /// Update or delete was requested for a relationship not in the cache.
    #[error("relationship {key} is not cached")]
    NotCached {
        /// Key that was looked up.
        key: RelationshipKey,
    },

    /// The cache entry has no remote ID (it was created earlier in this run).
    #[error("relationship {key} has no remote id; it was created during this run")]
    MissingRemoteId {
        /// Key of the entry lacking an ID.
        key: RelationshipKey,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_error_renders_operation_and_stage() {
        let err = RpcError::Invocation {
            operation: "count_links",
            cause: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "count_links:Invoke:connection refused");

        let err = RpcError::RemoteStatus {
            operation: "create_dependency",
            message: "Record already exists".into(),
        };
        assert_eq!(err.to_string(), "create_dependency:Xmlmc:Record already exists");
        assert_eq!(err.operation(), "create_dependency");
    }

    #[test]
    fn reconcile_error_is_transparent_over_rpc() {
        let err: ReconcileError =
            RpcError::Decode { operation: "fetch_links", cause: "eof".into() }.into();
        assert_eq!(err.to_string(), "fetch_links:Unmarshal:eof");
    }
}
