//! HTTP handlers for the Authors API

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NoGroundingContextResponse, NotFoundResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AuthorResult;
use crate::models::{
    Answer, AskQuestion, AuthorResponse, AuthorSummary, CreateAuthor, ListAuthors, SearchAuthors,
    SimilarityMatch,
};
use crate::rag::RagOrchestrator;
use crate::registry::AuthorRegistry;
use crate::search::SimilaritySearchEngine;
use crate::store::VectorStore;

/// OpenAPI documentation for the Authors API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_authors,
        create_author,
        get_author,
        summarize_author,
        search_authors,
        ask_question,
    ),
    components(
        schemas(
            AuthorResponse, CreateAuthor, SimilarityMatch, SearchAuthors,
            AskQuestion, Answer, AuthorSummary
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse,
            NoGroundingContextResponse
        )
    ),
    tags(
        (name = "Authors", description = "Author directory, similarity search and Q&A endpoints")
    )
)]
pub struct ApiDoc;

/// Everything the authors routes need, bundled as one axum state.
pub struct AuthorsState<S: VectorStore> {
    pub registry: AuthorRegistry<S>,
    pub engine: SimilaritySearchEngine<S>,
    pub rag: RagOrchestrator<S>,
}

/// Create the authors router with all HTTP endpoints
pub fn router<S: VectorStore + 'static>(state: AuthorsState<S>) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(list_authors).post(create_author))
        .route("/search", post(search_authors))
        .route("/ask", post(ask_question))
        .route("/{id}", get(get_author))
        .route("/{id}/summary", get(summarize_author))
        .with_state(shared_state)
}

/// List authors ordered by id
#[utoipa::path(
    get,
    path = "",
    tag = "Authors",
    params(ListAuthors),
    responses(
        (status = 200, description = "List of authors", body = Vec<AuthorResponse>),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_authors<S: VectorStore>(
    State(state): State<Arc<AuthorsState<S>>>,
    Query(query): Query<ListAuthors>,
) -> AuthorResult<Json<Vec<AuthorResponse>>> {
    let authors = state.registry.list_all(query.limit).await?;
    Ok(Json(authors.into_iter().map(Into::into).collect()))
}

/// Create a new author with an automatically generated profile embedding
#[utoipa::path(
    post,
    path = "",
    tag = "Authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created successfully", body = AuthorResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_author<S: VectorStore>(
    State(state): State<Arc<AuthorsState<S>>>,
    ValidatedJson(input): ValidatedJson<CreateAuthor>,
) -> AuthorResult<impl IntoResponse> {
    let author = state.registry.create(input).await?;
    Ok((StatusCode::CREATED, Json(AuthorResponse::from(author))))
}

/// Get an author by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Authors",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author found", body = AuthorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_author<S: VectorStore>(
    State(state): State<Arc<AuthorsState<S>>>,
    Path(id): Path<i64>,
) -> AuthorResult<Json<AuthorResponse>> {
    let author = state.registry.get_by_id(id).await?;
    Ok(Json(author.into()))
}

/// Generate a short profile summary for an author
#[utoipa::path(
    get,
    path = "/{id}/summary",
    tag = "Authors",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Generated summary", body = AuthorSummary),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn summarize_author<S: VectorStore>(
    State(state): State<Arc<AuthorsState<S>>>,
    Path(id): Path<i64>,
) -> AuthorResult<Json<AuthorSummary>> {
    let summary = state.registry.summarize(id).await?;
    Ok(Json(summary))
}

/// Search authors by free-text similarity
#[utoipa::path(
    post,
    path = "/search",
    tag = "Authors",
    request_body = SearchAuthors,
    responses(
        (status = 200, description = "Matches ordered by descending similarity", body = Vec<SimilarityMatch>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_authors<S: VectorStore>(
    State(state): State<Arc<AuthorsState<S>>>,
    ValidatedJson(request): ValidatedJson<SearchAuthors>,
) -> AuthorResult<Json<Vec<SimilarityMatch>>> {
    let matches = state
        .engine
        .search_by_text(&request.query, request.top_k, request.similarity_threshold)
        .await?;
    Ok(Json(matches))
}

/// Answer a question grounded in the most similar author records
#[utoipa::path(
    post,
    path = "/ask",
    tag = "Authors",
    request_body = AskQuestion,
    responses(
        (status = 200, description = "Grounded answer with its context records", body = Answer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NoGroundingContextResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn ask_question<S: VectorStore>(
    State(state): State<Arc<AuthorsState<S>>>,
    ValidatedJson(request): ValidatedJson<AskQuestion>,
) -> AuthorResult<Json<Answer>> {
    let answer = state
        .rag
        .answer_question(&request.question, request.top_k)
        .await?;
    Ok(Json(answer))
}
