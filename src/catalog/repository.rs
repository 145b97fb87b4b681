use std::sync::Arc;
use tokio::sync::RwLock;

use super::types::{Book, NewBook};
use crate::error::{FabricError, FabricResult};

pub struct BookRepository {
    books: RwLock<Vec<Book>>,
}

impl BookRepository {
    pub fn new(books: Vec<Book>) -> Arc<Self> {
        Arc::new(Self {
            books: RwLock::new(books),
        })
    }

    /// The two books every fresh catalog starts with.
    pub fn seeded() -> Arc<Self> {
        Self::new(vec![
            Book {
                id: 101,
                title: "Python HPC".to_string(),
                author: "Boguslavsky Vlad".to_string(),
                description: Some("Variant 12".to_string()),
                available: true,
            },
            Book {
                id: 102,
                title: "Clean Code".to_string(),
                author: "Robert Martin".to_string(),
                description: Some("Architecture".to_string()),
                available: true,
            },
        ])
    }

    pub async fn all(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn get(&self, id: u64) -> Option<Book> {
        self.books.read().await.iter().find(|b| b.id == id).cloned()
    }

    /// Case-insensitive substring match on the author.
    pub async fn find_by_author(&self, author: &str) -> Vec<Book> {
        let needle = author.to_lowercase();
        self.books
            .read()
            .await
            .iter()
            .filter(|b| b.author.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub async fn add(&self, book: NewBook) -> FabricResult<Book> {
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.id == book.id) {
            return Err(FabricError::InvalidState(format!(
                "Book id {} is already taken",
                book.id
            )));
        }

        let book = Book::from(book);
        books.push(book.clone());
        tracing::info!("Added book {} ({})", book.id, book.title);
        Ok(book)
    }

    pub async fn set_available(&self, id: u64, available: bool) -> FabricResult<Book> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| FabricError::NotFound("Book not found".to_string()))?;

        book.available = available;
        tracing::debug!("Book {} available={}", id, available);
        Ok(book.clone())
    }
}
