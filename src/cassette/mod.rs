//! Cassette format for recording and replaying RPC calls.

pub mod format;
pub mod recorder;
pub mod replayer;
