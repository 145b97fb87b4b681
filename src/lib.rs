//! Distributed Library Platform Library
//!
//! This library crate defines the service fabric and the library backends built on it.
//! It serves as the foundation for the `library-mesh` binary (`main.rs`).
//!
//! ## Fabric Modules
//! - **`registry`**: The discovery registry. Tracks instances per logical service name,
//!   refreshed by heartbeats and evicted lazily once they outlive the TTL.
//! - **`discovery`**: The client side of discovery. Registry client, heartbeat agent,
//!   selection policies and the resolver that turns a name into a live base URL.
//! - **`gateway`**: The reverse proxy. Resolves the first path segment and relays the
//!   request and the backend's answer.
//!
//! ## Backend Modules
//! - **`catalog`**: In-memory book catalog with availability flags.
//! - **`readers`**: In-memory reader registry with active/blocked status.
//! - **`loans`**: The loan ledger and the cross-service issue/return workflow.
//!
//! `config` holds the command line surface and `error` the shared error taxonomy.

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod gateway;
pub mod loans;
pub mod readers;
pub mod registry;

#[cfg(test)]
mod testing;
