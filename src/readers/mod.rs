//! Reader Service Module
//!
//! In-memory reader registry. A reader is either `active` or `blocked`; only active
//! readers may borrow books.

pub mod handlers;
pub mod repository;
pub mod types;


/// Logical name under which reader instances register.
pub const SERVICE_NAME: &str = "readers";
