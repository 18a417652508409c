//! HTTP handlers for the Books API

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::authors_client::AuthorDirectory;
use crate::error::BookResult;
use crate::models::{AuthorRef, Book, BookFilter, CreateBook, UpdateBook};
use crate::repository::BookRepository;
use crate::service::BookService;

/// OpenAPI documentation for the Books API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_books,
        create_book,
        get_book,
        update_book,
        delete_book,
        get_book_author,
    ),
    components(
        schemas(Book, CreateBook, UpdateBook, BookFilter, AuthorRef),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Books", description = "Book catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the books router with all HTTP endpoints
pub fn router<R, A>(service: BookService<R, A>) -> Router
where
    R: BookRepository + 'static,
    A: AuthorDirectory + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/{id}/author", get(get_book_author))
        .with_state(shared_service)
}

/// List books
#[utoipa::path(
    get,
    path = "",
    tag = "Books",
    params(BookFilter),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_books<R: BookRepository, A: AuthorDirectory>(
    State(service): State<Arc<BookService<R, A>>>,
    Query(filter): Query<BookFilter>,
) -> BookResult<Json<Vec<Book>>> {
    let books = service.list_books(filter).await?;
    Ok(Json(books))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "",
    tag = "Books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created successfully", body = Book),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_book<R: BookRepository, A: AuthorDirectory>(
    State(service): State<Arc<BookService<R, A>>>,
    ValidatedJson(input): ValidatedJson<CreateBook>,
) -> BookResult<impl IntoResponse> {
    let book = service.create_book(input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_book<R: BookRepository, A: AuthorDirectory>(
    State(service): State<Arc<BookService<R, A>>>,
    Path(id): Path<i64>,
) -> BookResult<Json<Book>> {
    let book = service.get_book(id).await?;
    Ok(Json(book))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated successfully", body = Book),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_book<R: BookRepository, A: AuthorDirectory>(
    State(service): State<Arc<BookService<R, A>>>,
    Path(id): Path<i64>,
    ValidatedJson(update): ValidatedJson<UpdateBook>,
) -> BookResult<Json<Book>> {
    let book = service.update_book(id, update).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted successfully"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_book<R: BookRepository, A: AuthorDirectory>(
    State(service): State<Arc<BookService<R, A>>>,
    Path(id): Path<i64>,
) -> BookResult<StatusCode> {
    service.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve the author of a book against the authors directory
#[utoipa::path(
    get,
    path = "/{id}/author",
    tag = "Books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Author of the book", body = AuthorRef),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_book_author<R: BookRepository, A: AuthorDirectory>(
    State(service): State<Arc<BookService<R, A>>>,
    Path(id): Path<i64>,
) -> BookResult<Json<AuthorRef>> {
    let author = service.author_for_book(id).await?;
    Ok(Json(author))
}
