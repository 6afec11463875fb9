//! Adapters implementing the port traits.
//!
//! `live` talks to the real instance, `recording` wraps a live adapter and
//! captures every call to a cassette, `replaying` serves a cassette back.

pub mod live;
pub mod recording;
pub mod replaying;
