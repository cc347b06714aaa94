//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookInput, BookQuery, BookWithCounts},
        copy::CopyDetails,
    },
};

use super::{CurrentOwner, MessageResponse};

/// List books with copy counts
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("identity_header" = [])),
    params(BookQuery),
    responses(
        (status = 200, description = "Books ordered by title", body = Vec<BookWithCounts>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<BookWithCounts>>> {
    let books = state
        .services
        .catalog
        .search_books(user.id, query.search.as_deref())
        .await?;
    Ok(Json(books))
}

/// Get a book
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookWithCounts),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookWithCounts>> {
    let book = state.services.catalog.get_book(id, user.id).await?;
    Ok(Json(book))
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("identity_header" = [])),
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Title or author missing")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Json(input): Json<BookInput>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.catalog.create_book(user.id, input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Replace a book's details
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Title or author missing"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
    Json(input): Json<BookInput>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.update_book(id, user.id, input).await?;
    Ok(Json(book))
}

/// Delete a book with its copies and their checkouts
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.delete_book(id, user.id).await?;
    Ok(Json(MessageResponse::new("Book deleted successfully")))
}

/// List the copies of a book
#[utoipa::path(
    get,
    path = "/books/{id}/copies",
    tag = "copies",
    security(("identity_header" = [])),
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Copies ordered by copy number", body = Vec<CopyDetails>)
    )
)]
pub async fn list_copies(
    State(state): State<crate::AppState>,
    CurrentOwner(user): CurrentOwner,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<CopyDetails>>> {
    let copies = state.services.catalog.list_copies(id, user.id).await?;
    Ok(Json(copies))
}
