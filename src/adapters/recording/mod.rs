//! Recording adapters that capture interactions to cassettes.

pub mod rpc;

pub use rpc::RecordingRpcTransport;
