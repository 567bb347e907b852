//! Author HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{AuthorResponse, GetAuthor, ListAuthorBooks, ListAuthors};
use crate::infrastructure::http::dto::{
    ApiResponse, AuthorBooksParams, AuthorIdParams, PageParams, PaginatedAuthors, PaginatedBooks,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::ApiQuery;
use crate::infrastructure::http::state::AppState;

pub async fn get_all_authors(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<ApiResponse<PaginatedAuthors>>, ApiError> {
    let page = state.page_request(&params)?;
    let result = state.list_authors_handler.handle(ListAuthors { page }).await?;

    Ok(Json(ApiResponse::success(
        "all authors fetched successfully",
        PaginatedAuthors::from(result),
    )))
}

pub async fn get_author(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<AuthorIdParams>,
) -> Result<Json<ApiResponse<AuthorResponse>>, ApiError> {
    let author = state
        .get_author_handler
        .handle(GetAuthor {
            author_id: params.author_id,
        })
        .await?;

    Ok(Json(ApiResponse::success("Author fetched successfully.", author)))
}

/// 作者的书籍（包括未发布的）
pub async fn get_author_books(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<AuthorBooksParams>,
) -> Result<Json<ApiResponse<PaginatedBooks>>, ApiError> {
    let page = state.page_request(&params.page())?;
    let result = state
        .list_author_books_handler
        .handle(ListAuthorBooks {
            author_id: params.author_id,
            page,
        })
        .await?;

    Ok(Json(ApiResponse::success(
        "all books fetched successfully",
        PaginatedBooks::from(result),
    )))
}
