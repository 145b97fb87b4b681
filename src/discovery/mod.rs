//! Discovery Client Module
//!
//! The client half of service discovery, used by every process that is not the
//! registry itself.
//!
//! ## Submodules
//! - **`client`**: Thin HTTP client for the registry endpoints.
//! - **`agent`**: Background task that registers an instance and keeps it alive.
//! - **`balancer`**: Selection policies that pick one instance out of the live set.
//! - **`resolver`**: Turns a logical service name into a base URL.

pub mod agent;
pub mod balancer;
pub mod client;
pub mod resolver;
