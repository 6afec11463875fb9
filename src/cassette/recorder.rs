//! Records RPC calls into a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction, Outcome};

/// Records calls and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    endpoint: String,
    interactions: Vec<Interaction>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            endpoint: endpoint.into(),
            interactions: Vec::new(),
            next_seq: 0,
        }
    }

    /// Record one call. The `seq` field is assigned automatically.
    pub fn record(
        &mut self,
        service: impl Into<String>,
        method: impl Into<String>,
        params: impl Into<String>,
        outcome: Outcome,
    ) {
        self.interactions.push(Interaction {
            seq: self.next_seq,
            service: service.into(),
            method: method.into(),
            params: params.into(),
            outcome,
        });
        self.next_seq += 1;
    }

    /// Number of calls recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Write everything recorded so far to disk.
    ///
    /// The recorder stays usable; a later call rewrites the file with the
    /// calls recorded since.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name.clone(),
            recorded_at: Utc::now(),
            endpoint: self.endpoint.clone(),
            interactions: self.interactions.clone(),
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, yaml)?;
        Ok(self.path.clone())
    }
}
