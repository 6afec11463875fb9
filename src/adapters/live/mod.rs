//! Live adapters for real external interactions.

pub mod progress;
pub mod rpc;

pub use progress::{LogProgress, SilentProgress};
pub use rpc::LiveRpcTransport;
