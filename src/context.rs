//! Service context bundling the port trait objects a command needs.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::{LiveRpcTransport, LogProgress};
use crate::adapters::recording::RecordingRpcTransport;
use crate::adapters::replaying::ReplayingRpcTransport;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::{self, SyncConfig};
use crate::ports::{ProgressReporter, RpcTransport};

/// Records every RPC call to the cassette at this path.
pub const RECORD_VAR: &str = "RELSYNC_RECORD";

/// Serves every RPC call from the cassette at this path.
pub const REPLAY_VAR: &str = "RELSYNC_REPLAY";

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// Transport for XMLMC method calls.
    pub rpc: Box<dyn RpcTransport>,
    /// Sink for cache-build progress.
    pub progress: Box<dyn ProgressReporter>,
    /// Optional cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context talking to `endpoint`.
    #[must_use]
    pub fn live(endpoint: &str, api_key: &str) -> Self {
        Self::from_parts(Box::new(LiveRpcTransport::new(endpoint, api_key)), Box::new(LogProgress::new()))
    }

    /// Creates a live context that records every call and writes a cassette
    /// to `path` when dropped.
    #[must_use]
    pub fn recording(endpoint: &str, api_key: &str, path: &Path) -> Self {
        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(path, "relsync-session", endpoint)));
        let live = Box::new(LiveRpcTransport::new(endpoint, api_key));
        Self {
            rpc: Box::new(RecordingRpcTransport::new(live, Arc::clone(&recorder))),
            progress: Box::new(LogProgress::new()),
            recorder: Some(recorder),
        }
    }

    /// Creates a context whose calls are served from the cassette at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::from_parts(
            Box::new(ReplayingRpcTransport::new(&cassette)),
            Box::new(LogProgress::new()),
        ))
    }

    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn from_parts(rpc: Box<dyn RpcTransport>, progress: Box<dyn ProgressReporter>) -> Self {
        Self { rpc, progress, recorder: None }
    }

    /// Picks adapters for `config` from the environment.
    ///
    /// `RELSYNC_REPLAY` wins over everything and needs no API key;
    /// otherwise the API key is required and `RELSYNC_RECORD` adds a
    /// recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the replay cassette is unreadable or the API key
    /// is missing.
    pub fn for_config(config: &SyncConfig) -> Result<Self, String> {
        if let Some(path) = env_path(REPLAY_VAR) {
            tracing::info!(cassette = %path.display(), "replaying recorded session");
            return Self::replaying(&path);
        }

        let api_key = config::api_key().map_err(|e| e.to_string())?;
        Ok(match env_path(RECORD_VAR) {
            Some(path) => {
                tracing::info!(cassette = %path.display(), "recording session");
                Self::recording(&config.endpoint, &api_key, &path)
            }
            None => Self::live(&config.endpoint, &api_key),
        })
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let Ok(recorder) = recorder.lock() else {
            tracing::warn!("recorder lock poisoned; cassette not written");
            return;
        };
        match recorder.write() {
            Ok(path) => eprintln!("Recording saved to: {}", path.display()),
            Err(e) => tracing::warn!(error = %e, "failed to write cassette"),
        }
    }
}
