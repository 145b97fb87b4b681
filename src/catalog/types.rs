use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    pub available: bool,
}

/// Body of `POST /catalog/books`. New books always start available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub id: u64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<NewBook> for Book {
    fn from(book: NewBook) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            description: book.description,
            available: true,
        }
    }
}

/// Query string of `PUT /catalog/books/{id}/status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityParams {
    pub available: bool,
}
