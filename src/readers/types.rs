use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReaderStatus {
    Active,
    Blocked,
}

impl FromStr for ReaderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ReaderStatus::Active),
            "blocked" => Ok(ReaderStatus::Blocked),
            other => Err(format!(
                "Invalid status '{}'. Use 'active' or 'blocked'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reader {
    pub id: u64,
    pub name: String,
    pub status: ReaderStatus,
}

/// Body of `POST /readers`. New readers always start active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReader {
    pub id: u64,
    pub name: String,
}

/// Query string of `PUT /readers/{id}/status`. Kept as text so an unknown value is a
/// business error (400) instead of a parse rejection.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusParams {
    pub status: String,
}
