//! Cassette data structures for recording and replaying RPC calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the transport produced for one call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The raw response body.
    Response(String),
    /// The transport error text.
    TransportError(String),
}

/// A single recorded method call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// XMLMC service, e.g. `data`.
    pub service: String,
    /// XMLMC method, e.g. `queryExec`.
    pub method: String,
    /// Rendered `<params>` block sent with the call.
    pub params: String,
    /// What came back.
    pub outcome: Outcome,
}

/// A cassette containing a sequence of recorded calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Instance endpoint the calls were made against.
    pub endpoint: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Parses a cassette from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not describe a cassette.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
