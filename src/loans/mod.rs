//! Loan Service Module
//!
//! Owns the loan ledger and orchestrates the cross-service workflow behind issuing and
//! returning a book.
//!
//! ## Workflow
//! 1. **Validate reader**: resolve `readers`, the reader must exist and be active.
//! 2. **Validate book**: resolve `catalog`, the book must exist and be available.
//! 3. **Commit**: append an `Active` record to the local ledger.
//! 4. **Side effect**: ask the catalog to flip the book's availability.
//!
//! Steps run strictly in order and nothing is written before both checks pass. Step 4
//! is fire-and-forget: if the flip fails the loan stays committed while the catalog may
//! still list the book as available. There is no retry and no compensation.

pub mod error;
pub mod handlers;
pub mod ledger;
pub mod orchestrator;
pub mod types;


/// Logical name under which loan instances register.
pub const SERVICE_NAME: &str = "loans";
