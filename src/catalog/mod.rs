//! Catalog Service Module
//!
//! In-memory book catalog. Besides browsing, it exposes the availability switch the
//! loan orchestrator flips when a book goes out or comes back.

pub mod handlers;
pub mod repository;
pub mod types;


/// Logical name under which catalog instances register.
pub const SERVICE_NAME: &str = "catalog";
