//! Progress port for long-running cache builds.

/// Receives progress of a paged retrieval.
///
/// Rendering (bars, spinners, log lines) belongs to the implementation;
/// callers only report positions.
pub trait ProgressReporter: Send + Sync {
    /// A retrieval of `total` records labelled `label` is starting.
    fn start(&self, label: &str, total: u64);

    /// `done` records have been retrieved so far. Never exceeds the total
    /// passed to [`ProgressReporter::start`] and never decreases.
    fn update(&self, done: u64);

    /// The retrieval has ended, successfully or not.
    fn finish(&self);
}
