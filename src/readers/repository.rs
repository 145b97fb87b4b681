use std::sync::Arc;
use tokio::sync::RwLock;

use super::types::{NewReader, Reader, ReaderStatus};
use crate::error::{FabricError, FabricResult};

pub struct ReaderRepository {
    readers: RwLock<Vec<Reader>>,
}

impl ReaderRepository {
    pub fn new(readers: Vec<Reader>) -> Arc<Self> {
        Arc::new(Self {
            readers: RwLock::new(readers),
        })
    }

    pub fn seeded() -> Arc<Self> {
        Self::new(vec![
            Reader {
                id: 12,
                name: "Inokentiy Varmilov".to_string(),
                status: ReaderStatus::Active,
            },
            Reader {
                id: 13,
                name: "Vladyslav Bohuslavskyi".to_string(),
                status: ReaderStatus::Active,
            },
        ])
    }

    pub async fn all(&self) -> Vec<Reader> {
        self.readers.read().await.clone()
    }

    pub async fn get(&self, id: u64) -> Option<Reader> {
        self.readers.read().await.iter().find(|r| r.id == id).cloned()
    }

    pub async fn register(&self, reader: NewReader) -> FabricResult<Reader> {
        let mut readers = self.readers.write().await;
        if readers.iter().any(|r| r.id == reader.id) {
            return Err(FabricError::InvalidState(
                "Reader with this ID already registered".to_string(),
            ));
        }

        let reader = Reader {
            id: reader.id,
            name: reader.name,
            status: ReaderStatus::Active,
        };
        readers.push(reader.clone());
        tracing::info!("Registered reader {}", reader.id);
        Ok(reader)
    }

    pub async fn set_status(&self, id: u64, status: ReaderStatus) -> FabricResult<Reader> {
        let mut readers = self.readers.write().await;
        let reader = readers
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| FabricError::NotFound("Reader not found".to_string()))?;

        reader.status = status;
        tracing::info!("Reader {} is now {:?}", id, status);
        Ok(reader.clone())
    }
}
