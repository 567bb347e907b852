//! Book HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{
    BookResponse, GetBook, GetBookChapters, GetBookContent, GetChapterPages, ListBooks,
    ListGenreBooks, ListGenres, RateBook, RateBookResponse, TopBooks,
};
use crate::domain::catalog::ContentTree;
use crate::infrastructure::http::dto::{
    ApiResponse, BookIdParams, BooksPayload, ChapterPagesParams, ChaptersPayload,
    GenreBooksParams, GenresPayload, PageParams, PagesPayload, PaginatedBooks, RateBookRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::{ApiJson, ApiQuery};
use crate::infrastructure::http::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// 已发布书籍分页列表
pub async fn get_all_books(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<PaginatedBooks> {
    let page = state.page_request(&params)?;
    let result = state.list_books_handler.handle(ListBooks { page }).await?;

    Ok(Json(ApiResponse::success(
        "all books fetched successfully",
        PaginatedBooks::from(result),
    )))
}

pub async fn get_book(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<BookIdParams>,
) -> ApiResult<BookResponse> {
    let book = state
        .get_book_handler
        .handle(GetBook {
            book_id: params.book_id,
        })
        .await?;

    Ok(Json(ApiResponse::success("Book fetched successfully.", book)))
}

/// 评分最高的书籍
pub async fn top_books(State(state): State<Arc<AppState>>) -> ApiResult<BooksPayload> {
    let books = state
        .top_books_handler
        .handle(TopBooks {
            limit: state.top_books,
        })
        .await?;

    Ok(Json(ApiResponse::success(
        "top books fetched successfully",
        BooksPayload { books },
    )))
}

pub async fn get_book_chapters(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<BookIdParams>,
) -> ApiResult<ChaptersPayload> {
    let chapters = state
        .get_book_chapters_handler
        .handle(GetBookChapters {
            book_id: params.book_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(
        "book chapters fetched successfully",
        ChaptersPayload { chapters },
    )))
}

pub async fn get_chapter_pages(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ChapterPagesParams>,
) -> ApiResult<PagesPayload> {
    let pages = state
        .get_chapter_pages_handler
        .handle(GetChapterPages {
            book_id: params.book_id,
            chapter_number: params.chapter_number,
        })
        .await?;

    Ok(Json(ApiResponse::success(
        "chapter pages fetched successfully",
        PagesPayload { pages },
    )))
}

/// 整本书的 Book -> Chapter -> Page 内容树
pub async fn get_book_content(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<BookIdParams>,
) -> ApiResult<ContentTree> {
    let tree = state
        .get_book_content_handler
        .handle(GetBookContent {
            book_id: params.book_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(
        "book content fetched successfully",
        tree,
    )))
}

pub async fn get_genres(State(state): State<Arc<AppState>>) -> ApiResult<GenresPayload> {
    let genres = state.list_genres_handler.handle(ListGenres).await?;

    Ok(Json(ApiResponse::success(
        "genres fetched successfully",
        GenresPayload { genres },
    )))
}

pub async fn get_genre_books(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<GenreBooksParams>,
) -> ApiResult<PaginatedBooks> {
    let page = state.page_request(&params.page())?;
    let result = state
        .list_genre_books_handler
        .handle(ListGenreBooks {
            genre_id: params.genre_id,
            page,
        })
        .await?;

    Ok(Json(ApiResponse::success(
        "genre books fetched successfully",
        PaginatedBooks::from(result),
    )))
}

/// 评分（同一用户重复评分会覆盖）
pub async fn rate_book(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RateBookRequest>,
) -> ApiResult<RateBookResponse> {
    let response = state
        .rate_book_handler
        .handle(RateBook {
            book_id: req.book_id,
            user_id: req.user_id,
            rating: req.rating,
        })
        .await?;

    state.invalidate_cache();

    Ok(Json(ApiResponse::success("Book rated successfully.", response)))
}
