//! Dry-run policy applied to every remote call.

use super::operation::Operation;
use crate::xmlmc::ParamBuilder;

/// What the client should do with a fully built call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Send the call to the transport.
    Execute,
    /// The call was logged and its parameters discarded; report success.
    Simulated,
}

/// Decides between executing a call and simulating it.
///
/// Read-only calls always execute. Mutating calls are simulated in dry-run
/// mode. In dry-run mode every call's parameters are logged at `debug`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DryRunPolicy {
    dry_run: bool,
}

impl DryRunPolicy {
    /// Policy that executes every call.
    #[must_use]
    pub fn execute() -> Self {
        Self { dry_run: false }
    }

    /// Policy that simulates mutating calls.
    #[must_use]
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Policy for a configuration flag.
    #[must_use]
    pub fn from_flag(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Applies the policy to a call whose parameters are fully built.
    ///
    /// On [`Decision::Simulated`] the builder has been cleared so the next
    /// call starts fresh.
    pub fn decide(self, operation: Operation, params: &mut ParamBuilder) -> Decision {
        if !self.dry_run {
            return Decision::Execute;
        }

        let (subject, verb) = operation.log_tags();
        tracing::debug!("[DRYRUN] [{subject}] [{verb}] {}", params.render());

        if operation.is_mutating() {
            params.clear();
            Decision::Simulated
        } else {
            Decision::Execute
        }
    }
}
