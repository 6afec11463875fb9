//! Replaying adapters that serve recorded interactions.

pub mod rpc;

pub use rpc::ReplayingRpcTransport;
