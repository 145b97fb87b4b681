use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    routing::{get, put},
};
use std::sync::Arc;

use super::repository::ReaderRepository;
use super::types::{NewReader, Reader, ReaderStatus, StatusParams};
use crate::error::{FabricError, FabricResult};

pub fn router(readers: Arc<ReaderRepository>) -> Router {
    Router::new()
        .route("/readers", get(handle_list_readers).post(handle_register_reader))
        .route("/readers/:id", get(handle_get_reader))
        .route("/readers/:id/status", put(handle_set_status))
        .layer(Extension(readers))
}

pub async fn handle_list_readers(
    Extension(readers): Extension<Arc<ReaderRepository>>,
) -> Json<Vec<Reader>> {
    Json(readers.all().await)
}

pub async fn handle_get_reader(
    Extension(readers): Extension<Arc<ReaderRepository>>,
    Path(id): Path<u64>,
) -> FabricResult<Json<Reader>> {
    readers
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| FabricError::NotFound("Reader not found".to_string()))
}

pub async fn handle_register_reader(
    Extension(readers): Extension<Arc<ReaderRepository>>,
    Json(reader): Json<NewReader>,
) -> FabricResult<Json<Reader>> {
    readers.register(reader).await.map(Json)
}

pub async fn handle_set_status(
    Extension(readers): Extension<Arc<ReaderRepository>>,
    Path(id): Path<u64>,
    Query(params): Query<StatusParams>,
) -> FabricResult<Json<Reader>> {
    let status: ReaderStatus = params.status.parse().map_err(FabricError::InvalidState)?;
    readers.set_status(id, status).await.map(Json)
}
