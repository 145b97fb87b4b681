use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoanStatus {
    Active,
    Returned,
}

/// One entry of the loan ledger.
///
/// The only mutation after creation is `Active -> Returned`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub id: u64,
    pub book_id: u64,
    pub reader_id: u64,
    pub status: LoanStatus,
}

/// Body of `POST /loans`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoan {
    pub book_id: u64,
    pub reader_id: u64,
}

/// Answer of `PUT /loans/{id}/return`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnConfirmation {
    pub message: String,
}
