//! Converges remote asset relationships toward a desired state.

pub mod apply;
pub mod plan;

pub use apply::Reconciler;
pub use plan::{
    decide_dependency, decide_link, dependency_removals, format_actions, link_removals, SyncAction,
};
