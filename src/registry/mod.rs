//! Service Registry Module
//!
//! Tracks which instances of each logical service are alive, based on periodic
//! heartbeats sent by the instances themselves.
//!
//! ## Core Mechanisms
//! - **Registration**: An instance announces `(name, host, port)`; announcing the same
//!   address twice refreshes the existing entry instead of duplicating it.
//! - **Heartbeats**: Refresh the `last_seen` timestamp of a known instance.
//! - **Lazy Expiry**: Instances older than the TTL are pruned when a name is read, so a
//!   caller never sees a stale address. An optional sweeper task can prune eagerly.

pub mod handlers;
pub mod protocol;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;
