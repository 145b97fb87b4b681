//! Local loan ledger.
//!
//! Ids are `count + 1` at creation time. Records are never removed, so ids are never
//! reused.

use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::LoanError;
use super::types::{LoanRecord, LoanStatus};

pub struct LoanLedger {
    loans: RwLock<Vec<LoanRecord>>,
}

impl LoanLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            loans: RwLock::new(Vec::new()),
        })
    }

    /// Appends a new `Active` record and returns it.
    pub async fn open(&self, book_id: u64, reader_id: u64) -> LoanRecord {
        let mut loans = self.loans.write().await;

        let record = LoanRecord {
            id: loans.len() as u64 + 1,
            book_id,
            reader_id,
            status: LoanStatus::Active,
        };
        loans.push(record.clone());

        tracing::info!(
            "Opened loan {} (book {} -> reader {})",
            record.id,
            book_id,
            reader_id
        );
        record
    }

    /// Moves an active loan to `Returned`. Missing and already-returned loans are
    /// both `LoanNotFound`.
    pub async fn close(&self, loan_id: u64) -> Result<LoanRecord, LoanError> {
        let mut loans = self.loans.write().await;

        let record = loans
            .iter_mut()
            .find(|l| l.id == loan_id && l.status == LoanStatus::Active)
            .ok_or(LoanError::LoanNotFound(loan_id))?;

        record.status = LoanStatus::Returned;
        tracing::info!("Closed loan {} (book {})", record.id, record.book_id);
        Ok(record.clone())
    }

    pub async fn get(&self, loan_id: u64) -> Option<LoanRecord> {
        self.loans
            .read()
            .await
            .iter()
            .find(|l| l.id == loan_id)
            .cloned()
    }

    pub async fn history(&self, reader_id: u64) -> Vec<LoanRecord> {
        self.loans
            .read()
            .await
            .iter()
            .filter(|l| l.reader_id == reader_id)
            .cloned()
            .collect()
    }

    pub async fn active(&self) -> Vec<LoanRecord> {
        self.loans
            .read()
            .await
            .iter()
            .filter(|l| l.status == LoanStatus::Active)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.loans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
