//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                          GET   健康检查
//! - /api/books/get_all_books           GET   已发布书籍分页列表
//! - /api/books/get_book                GET   单本书籍
//! - /api/books/top_books               GET   评分最高的书籍
//! - /api/books/get_book_chapters       GET   书籍章节
//! - /api/books/get_chapter_pages       GET   章节页面
//! - /api/books/get_book_content        GET   完整内容树
//! - /api/books/get_genres              GET   所有分类
//! - /api/books/get_genre_books         GET   分类下的书籍
//! - /api/books/rate_book               POST  评分
//! - /api/authors/get_all_authors       GET   作者分页列表
//! - /api/authors/get_author            GET   单个作者
//! - /api/authors/get_author_books      GET   作者的书籍
//! - /api/info/get_announcement         GET   最新公告
//! - /api/info/contact-us               POST  联系我们
//!
//! `/api/books` 下的 GET 响应经过响应缓存

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::middleware::response_cache_middleware;
use super::state::AppState;
use crate::infrastructure::memory::ResponseCache;

/// 创建所有路由
pub fn create_routes(cache: Option<Arc<ResponseCache>>) -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes(cache))
}

/// API 路由
fn api_routes(cache: Option<Arc<ResponseCache>>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/books", book_routes(cache))
        .nest("/authors", author_routes())
        .nest("/info", info_routes())
}

/// Book 路由
fn book_routes(cache: Option<Arc<ResponseCache>>) -> Router<Arc<AppState>> {
    let router = Router::new()
        .route("/get_all_books", get(handlers::get_all_books))
        .route("/get_book", get(handlers::get_book))
        .route("/top_books", get(handlers::top_books))
        .route("/get_book_chapters", get(handlers::get_book_chapters))
        .route("/get_chapter_pages", get(handlers::get_chapter_pages))
        .route("/get_book_content", get(handlers::get_book_content))
        .route("/get_genres", get(handlers::get_genres))
        .route("/get_genre_books", get(handlers::get_genre_books))
        .route("/rate_book", post(handlers::rate_book));

    match cache {
        Some(cache) => {
            router.route_layer(middleware::from_fn_with_state(cache, response_cache_middleware))
        }
        None => router,
    }
}

/// Author 路由
fn author_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/get_all_authors", get(handlers::get_all_authors))
        .route("/get_author", get(handlers::get_author))
        .route("/get_author_books", get(handlers::get_author_books))
}

/// Info 路由
fn info_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/get_announcement", get(handlers::get_announcement))
        .route("/contact-us", post(handlers::contact_us))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    use crate::application::ports::{
        AuthorRecord, AuthorRepositoryPort, BookRecord, BookRepositoryPort, ChapterRecord,
        ContentRepositoryPort, GenreRecord, GenreRepositoryPort, PageRecord, RatingRecord,
    };
    use crate::config::AppConfig;
    use crate::domain::catalog::{BookStatus, Rating};
    use crate::infrastructure::http::middleware::CACHE_STATUS_HEADER;
    use crate::infrastructure::http::{build_router, AppState};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteAuthorRepository,
        SqliteBookRepository, SqliteContentRepository, SqliteGenreRepository,
        SqliteInfoRepository,
    };

    fn author() -> AuthorRecord {
        AuthorRecord {
            id: 1,
            first_name: "Jane".to_string(),
            last_name: "Austen".to_string(),
        }
    }

    fn genre() -> GenreRecord {
        GenreRecord {
            id: 1,
            title: "Romance".to_string(),
            description: String::new(),
        }
    }

    fn book(id: i64, title: &str, status: BookStatus) -> BookRecord {
        let day = NaiveDate::from_ymd_opt(2024, 1, id as u32).unwrap();
        BookRecord {
            id,
            title: title.to_string(),
            description: format!("About {}", title),
            cover_image: None,
            status,
            published: day,
            created: day,
            updated: day,
            authors: vec![author()],
            genres: vec![genre()],
        }
    }

    async fn app() -> Router {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let book_repo = Arc::new(SqliteBookRepository::new(pool.clone()));
        let author_repo = Arc::new(SqliteAuthorRepository::new(pool.clone()));
        let genre_repo = Arc::new(SqliteGenreRepository::new(pool.clone()));
        let content_repo = Arc::new(SqliteContentRepository::new(pool.clone()));
        let info_repo = Arc::new(SqliteInfoRepository::new(pool));

        author_repo.save(&author()).await.unwrap();
        genre_repo.save(&genre()).await.unwrap();
        book_repo
            .save(&book(1, "Emma", BookStatus::Released))
            .await
            .unwrap();
        book_repo
            .save(&book(2, "Persuasion", BookStatus::Released))
            .await
            .unwrap();
        book_repo
            .save(&book(3, "Sanditon", BookStatus::Draft))
            .await
            .unwrap();
        book_repo
            .upsert_rating(&RatingRecord {
                book_id: 2,
                user_id: 1,
                rating: Rating::new(5).unwrap(),
            })
            .await
            .unwrap();

        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        content_repo
            .save_chapter(&ChapterRecord {
                id: 10,
                book_id: 1,
                title: "Volume I".to_string(),
                description: String::new(),
                chapter_number: 1,
                created: at,
                updated: at,
            })
            .await
            .unwrap();
        for (id, number) in [(101, 1), (102, 2)] {
            content_repo
                .save_page(&PageRecord {
                    id,
                    chapter_id: 10,
                    title: String::new(),
                    content: format!("page {}", number),
                    page_number: number,
                    created: at,
                    updated: at,
                })
                .await
                .unwrap();
        }

        let state = AppState::new(
            book_repo,
            author_repo,
            genre_repo,
            content_repo,
            info_repo,
            &AppConfig::default(),
        );
        build_router(Arc::new(state))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let cache = response
            .headers()
            .get(CACHE_STATUS_HEADER)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, cache, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, _, body) = send(app, request).await;
        (status, body)
    }

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, _, body) = send(app, request).await;
        (status, body)
    }

    #[tokio::test]
    async fn test_ping() {
        let app = app().await;
        let (status, body) = get(&app, "/api/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["payload"]["service"], "bookstore");
        assert_eq!(body["data"]["payload"]["cache"]["total_entries"], 0);
    }

    #[tokio::test]
    async fn test_get_all_books_pages() {
        let app = app().await;

        let (status, body) = get(&app, "/api/books/get_all_books").await;
        assert_eq!(status, StatusCode::OK);
        let payload = &body["data"]["payload"];
        assert_eq!(payload["books"][0]["title"], "Emma");
        assert_eq!(payload["books"][0]["rating"], "0");
        assert_eq!(payload["books"][0]["genre"][0]["title"], "Romance");
        assert_eq!(payload["next_page"], 1);
        assert_eq!(payload["prev_page"], -1);

        let (_, body) = get(&app, "/api/books/get_all_books?limit=1&offset=1").await;
        let payload = &body["data"]["payload"];
        assert_eq!(payload["books"][0]["title"], "Persuasion");
        assert_eq!(payload["books"][0]["rating"], "5");
        assert_eq!(payload["next_page"], -1);
        assert_eq!(payload["prev_page"], 0);

        // 草稿不出现在列表中
        let (_, body) = get(&app, "/api/books/get_all_books?limit=10").await;
        assert_eq!(body["data"]["payload"]["books"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_and_invalid_pages() {
        let app = app().await;

        let (status, body) = get(&app, "/api/books/get_all_books?limit=1&offset=2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({
                "status": "error",
                "data": {
                    "message": "This page is empty",
                    "payload": null,
                    "error": {"details": "empty page"}
                }
            })
        );

        let (status, _) = get(&app, "/api/books/get_all_books?limit=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get(&app, "/api/authors/get_all_authors?offset=-1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get(&app, "/api/books/get_all_books?limit=1000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_params_use_envelope() {
        let app = app().await;

        for uri in [
            "/api/books/get_all_books?limit=abc",
            "/api/books/get_book",
            "/api/authors/get_author_books?author_id=x",
        ] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["status"], "error");
            assert_eq!(body["data"]["message"], "Invalid request");
            assert!(body["data"]["error"]["details"].is_string());
        }

        let (status, body) = post(&app, "/api/books/rate_book", json!({"book_id": 1})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_get_book_hides_drafts() {
        let app = app().await;

        let (status, body) = get(&app, "/api/books/get_book?book_id=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["payload"]["published"], "2024-01-01");

        let (status, body) = get(&app, "/api/books/get_book?book_id=3").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["data"]["message"], "Book not found.");
    }

    #[tokio::test]
    async fn test_top_books_and_genres() {
        let app = app().await;

        let (_, body) = get(&app, "/api/books/top_books").await;
        let titles: Vec<&str> = body["data"]["payload"]["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Persuasion", "Emma"]);

        let (_, body) = get(&app, "/api/books/get_genres").await;
        assert_eq!(body["data"]["payload"]["genres"][0]["title"], "Romance");

        let (_, body) = get(&app, "/api/books/get_genre_books?genre_id=1&limit=5").await;
        assert_eq!(body["data"]["payload"]["books"].as_array().unwrap().len(), 2);

        let (status, _) = get(&app, "/api/books/get_genre_books?genre_id=9").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_book_content() {
        let app = app().await;

        let (_, body) = get(&app, "/api/books/get_book_chapters?book_id=1").await;
        assert_eq!(body["data"]["payload"]["chapters"][0]["title"], "Volume I");

        let (_, body) =
            get(&app, "/api/books/get_chapter_pages?book_id=1&chapter_number=1").await;
        assert_eq!(body["data"]["payload"]["pages"][1]["content"], "page 2");

        let (status, _) =
            get(&app, "/api/books/get_chapter_pages?book_id=1&chapter_number=7").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = get(&app, "/api/books/get_book_content?book_id=1").await;
        let tree = &body["data"]["payload"];
        assert_eq!(tree["title"], "Emma");
        assert_eq!(tree["chapters"][0]["pages"][0]["page_number"], 1);
        assert_eq!(tree["chapters"][0]["pages"][1]["page_number"], 2);
    }

    #[tokio::test]
    async fn test_rate_book_invalidates_cache() {
        let app = app().await;
        let cached_get = |uri: &'static str| {
            let app = app.clone();
            async move {
                let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
                send(&app, request).await
            }
        };

        let (_, cache, body) = cached_get("/api/books/get_book?book_id=1").await;
        assert_eq!(cache.as_deref(), Some("MISS"));
        assert_eq!(body["data"]["payload"]["rating"], "0");

        let (_, cache, _) = cached_get("/api/books/get_book?book_id=1").await;
        assert_eq!(cache.as_deref(), Some("HIT"));

        let (status, body) = post(
            &app,
            "/api/books/rate_book",
            json!({"book_id": 1, "user_id": 7, "rating": 4}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["payload"]["average_rating"], "4");

        let (_, cache, body) = cached_get("/api/books/get_book?book_id=1").await;
        assert_eq!(cache.as_deref(), Some("MISS"));
        assert_eq!(body["data"]["payload"]["rating"], "4");

        let (status, _) = post(
            &app,
            "/api/books/rate_book",
            json!({"book_id": 1, "user_id": 7, "rating": 6}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_authors() {
        let app = app().await;

        let (_, body) = get(&app, "/api/authors/get_all_authors").await;
        let payload = &body["data"]["payload"];
        assert_eq!(payload["authors"][0]["last_name"], "Austen");
        assert_eq!(payload["next_page"], -1);

        let (status, _) = get(&app, "/api/authors/get_author?author_id=2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // 作者的书籍包含草稿
        let (_, body) = get(&app, "/api/authors/get_author_books?author_id=1&limit=3").await;
        assert_eq!(body["data"]["payload"]["books"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_info_endpoints() {
        let app = app().await;

        let (status, _) = get(&app, "/api/info/get_announcement").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = post(
            &app,
            "/api/info/contact-us",
            json!({"email": "reader@example.com", "message": "Love the site"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["payload"]["email"], "reader@example.com");

        let (status, _) = post(
            &app,
            "/api/info/contact-us",
            json!({"email": "nope", "message": "hi"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
