//! Best-time server for PAIR-A-DOX.
//!
//! Keeps a single global record (the lowest solo completion time) and
//! serves it over HTTP to game sessions.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod store;
