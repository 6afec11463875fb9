//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the reconciler and an external
//! system (the instance's RPC endpoint, progress rendering).
//! Implementations live in `src/adapters/`.

pub mod progress;
pub mod rpc;

pub use progress::ProgressReporter;
pub use rpc::{RpcTransport, TransportError};
