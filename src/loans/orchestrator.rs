use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::error::LoanError;
use super::ledger::LoanLedger;
use super::types::{LoanRecord, ReturnConfirmation};
use crate::catalog;
use crate::catalog::types::Book;
use crate::discovery::resolver::{ResolvedAddress, Resolver};
use crate::error::FabricError;
use crate::readers;

/// The part of a reader record the loan rules look at. The status stays free text:
/// anything other than `"active"` blocks the loan.
#[derive(Debug, Deserialize)]
struct ReaderStanding {
    status: String,
}

const READER_ACTIVE: &str = "active";

/// Drives the issue/return workflows against the reader and catalog services.
///
/// Every call resolves afresh, so successive loans may land on different instances.
pub struct LoanOrchestrator {
    resolver: Resolver,
    ledger: Arc<LoanLedger>,
    http_client: Client,
}

impl LoanOrchestrator {
    pub fn new(resolver: Resolver, ledger: Arc<LoanLedger>) -> Self {
        Self {
            resolver,
            ledger,
            http_client: Client::new(),
        }
    }

    pub fn ledger(&self) -> &Arc<LoanLedger> {
        &self.ledger
    }

    pub async fn issue_loan(&self, book_id: u64, reader_id: u64) -> Result<LoanRecord, LoanError> {
        tracing::info!("Issuing book {} to reader {}", book_id, reader_id);

        let readers_base = self.resolver.resolve(readers::SERVICE_NAME).await?;
        let reader: ReaderStanding = self
            .fetch(&readers_base, &format!("readers/{}", reader_id), "Reader Service")
            .await?
            .ok_or(LoanError::ReaderNotFound(reader_id))?;
        if reader.status != READER_ACTIVE {
            return Err(LoanError::ReaderBlocked(reader_id));
        }

        let catalog_base = self.resolver.resolve(catalog::SERVICE_NAME).await?;
        let book: Book = self
            .fetch(&catalog_base, &format!("catalog/books/{}", book_id), "Catalog Service")
            .await?
            .ok_or(LoanError::BookNotFound(book_id))?;
        if !book.available {
            return Err(LoanError::BookUnavailable(book_id));
        }

        let record = self.ledger.open(book_id, reader_id).await;

        self.flip_availability(&catalog_base, book_id, false).await;

        Ok(record)
    }

    pub async fn return_loan(&self, loan_id: u64) -> Result<ReturnConfirmation, LoanError> {
        let record = self.ledger.close(loan_id).await?;

        // The loan is already closed; a catalog outage only leaves the book marked loaned.
        match self.resolver.resolve(catalog::SERVICE_NAME).await {
            Ok(catalog_base) => {
                self.flip_availability(&catalog_base, record.book_id, true)
                    .await
            }
            Err(e) => tracing::warn!(
                "Catalog status flip failed for book {} (loan {}): {}",
                record.book_id,
                loan_id,
                e
            ),
        }

        Ok(ReturnConfirmation {
            message: "Book successfully returned".to_string(),
        })
    }

    pub async fn history(&self, reader_id: u64) -> Vec<LoanRecord> {
        self.ledger.history(reader_id).await
    }

    pub async fn active(&self) -> Vec<LoanRecord> {
        self.ledger.active().await
    }

    /// GETs a JSON entity. `Ok(None)` means the service answered 404.
    async fn fetch<T: DeserializeOwned>(
        &self,
        base: &ResolvedAddress,
        path: &str,
        service_label: &str,
    ) -> Result<Option<T>, FabricError> {
        let unavailable = || FabricError::ServiceUnavailable(format!("{} is unavailable", service_label));

        let response = self
            .http_client
            .get(base.url(path))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("{} at {} unreachable: {}", service_label, base.instance, e);
                unavailable()
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response.json::<T>().await.map(Some).map_err(|e| {
                FabricError::GatewayTransport(format!(
                    "{} returned an unreadable body: {}",
                    service_label, e
                ))
            }),
            status => Err(FabricError::GatewayTransport(format!(
                "{} answered {}",
                service_label, status
            ))),
        }
    }

    /// Fire-and-forget availability update. Failures are logged only.
    async fn flip_availability(&self, catalog_base: &ResolvedAddress, book_id: u64, available: bool) {
        let url = catalog_base.url(&format!("catalog/books/{}/status", book_id));

        let result = self
            .http_client
            .put(&url)
            .query(&[("available", available)])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Book {} availability set to {}", book_id, available)
            }
            Ok(response) => tracing::warn!(
                "Catalog status flip failed for book {}: catalog answered {}",
                book_id,
                response.status()
            ),
            Err(e) => tracing::warn!("Catalog status flip failed for book {}: {}", book_id, e),
        }
    }
}
