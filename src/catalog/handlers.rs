use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    routing::{get, put},
};
use std::sync::Arc;

use super::repository::BookRepository;
use super::types::{AvailabilityParams, Book, NewBook};
use crate::error::{FabricError, FabricResult};
use crate::registry::protocol::StatusResponse;

pub fn router(books: Arc<BookRepository>) -> Router {
    Router::new()
        .route("/catalog/books", get(handle_list_books).post(handle_add_book))
        .route("/catalog/books/:id", get(handle_get_book))
        .route("/catalog/books/search/:author", get(handle_search_by_author))
        .route("/catalog/books/:id/status", put(handle_set_availability))
        .layer(Extension(books))
}

pub async fn handle_list_books(Extension(books): Extension<Arc<BookRepository>>) -> Json<Vec<Book>> {
    Json(books.all().await)
}

pub async fn handle_get_book(
    Extension(books): Extension<Arc<BookRepository>>,
    Path(id): Path<u64>,
) -> FabricResult<Json<Book>> {
    books
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| FabricError::NotFound("Book not found".to_string()))
}

pub async fn handle_search_by_author(
    Extension(books): Extension<Arc<BookRepository>>,
    Path(author): Path<String>,
) -> Json<Vec<Book>> {
    Json(books.find_by_author(&author).await)
}

pub async fn handle_add_book(
    Extension(books): Extension<Arc<BookRepository>>,
    Json(book): Json<NewBook>,
) -> FabricResult<Json<Book>> {
    books.add(book).await.map(Json)
}

pub async fn handle_set_availability(
    Extension(books): Extension<Arc<BookRepository>>,
    Path(id): Path<u64>,
    Query(params): Query<AvailabilityParams>,
) -> FabricResult<Json<StatusResponse>> {
    books.set_available(id, params.available).await?;
    Ok(Json(StatusResponse::new("success")))
}
