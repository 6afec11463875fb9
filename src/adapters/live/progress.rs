//! Live adapter for the `ProgressReporter` port that writes log lines.

use std::sync::Mutex;

use crate::ports::ProgressReporter;

#[derive(Debug, Default)]
struct State {
    label: String,
    total: u64,
    done: u64,
}

/// Reports progress as `info` log events, one per page.
#[derive(Debug, Default)]
pub struct LogProgress {
    state: Mutex<State>,
}

impl LogProgress {
    /// Creates a reporter with no retrieval in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for LogProgress {
    fn start(&self, label: &str, total: u64) {
        if let Ok(mut state) = self.state.lock() {
            *state = State { label: label.to_string(), total, done: 0 };
        }
    }

    fn update(&self, done: u64) {
        if let Ok(mut state) = self.state.lock() {
            state.done = done.clamp(state.done, state.total);
            tracing::info!(label = %state.label, done = state.done, total = state.total, "retrieving");
        }
    }

    fn finish(&self) {
        if let Ok(state) = self.state.lock() {
            tracing::debug!(label = %state.label, done = state.done, total = state.total, "retrieval finished");
        }
    }
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn start(&self, _label: &str, _total: u64) {}
    fn update(&self, _done: u64) {}
    fn finish(&self) {}
}
