//! Catalog Service

use std::collections::HashMap;
use std::sync::Arc;

use super::sources::{AuthorBooks, AuthorsWithBooks, GenreBooks, ReleasedBooks};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AuthorRecord, AuthorRepositoryPort, BookRecord, BookRepositoryPort, ContentRepositoryPort,
    GenreRepositoryPort, RecordSource,
};
use crate::domain::catalog::{
    assemble_content_tree, average_rating, BookSummary, ChapterSummary, ContentTree, PageSummary,
};
use crate::domain::{paginate, PageRequest, PageResult};

/// 对任意记录源执行一次分页读取
///
/// - 页为空时返回 `EmptyPage`
/// - 记录源的任何错误都作为 `SourceFault` 原样上报一次，不重试
/// - 记录源返回的条数少于窗口长度时同样是 `SourceFault`，不返回残缺页
pub async fn fetch_page<S>(
    source: &S,
    request: &PageRequest,
) -> Result<PageResult<S::Item>, ApplicationError>
where
    S: RecordSource + ?Sized,
{
    let total = source.count().await?;
    let window = paginate(total, request)?;

    let mut items = source.slice(window.start, window.end).await?;
    if items.len() < window.len() {
        // 记录在 count 与 slice 之间被删除，页元数据已不可信
        tracing::warn!(
            total = total,
            start = window.start,
            end = window.end,
            returned = items.len(),
            "Record source returned a short slice"
        );
        return Err(ApplicationError::SourceFault(format!(
            "expected {} records in [{}, {}), got {}",
            window.len(),
            window.start,
            window.end,
            items.len()
        )));
    }
    if items.len() > window.len() {
        tracing::warn!(
            start = window.start,
            end = window.end,
            returned = items.len(),
            "Record source returned a long slice, truncating"
        );
        items.truncate(window.len());
    }

    tracing::debug!(
        total = total,
        limit = request.limit(),
        offset = request.offset(),
        returned = items.len(),
        "Page fetched"
    );

    Ok(PageResult::new(items, &window))
}

/// 目录服务
pub struct CatalogService {
    book_repo: Arc<dyn BookRepositoryPort>,
    author_repo: Arc<dyn AuthorRepositoryPort>,
    genre_repo: Arc<dyn GenreRepositoryPort>,
    content_repo: Arc<dyn ContentRepositoryPort>,
}

impl CatalogService {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        author_repo: Arc<dyn AuthorRepositoryPort>,
        genre_repo: Arc<dyn GenreRepositoryPort>,
        content_repo: Arc<dyn ContentRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            author_repo,
            genre_repo,
            content_repo,
        }
    }

    /// 已发布书籍列表
    pub async fn list_books(
        &self,
        request: &PageRequest,
    ) -> Result<PageResult<BookRecord>, ApplicationError> {
        fetch_page(&ReleasedBooks::new(self.book_repo.clone()), request).await
    }

    /// 有作品的作者列表
    pub async fn list_authors(
        &self,
        request: &PageRequest,
    ) -> Result<PageResult<AuthorRecord>, ApplicationError> {
        fetch_page(&AuthorsWithBooks::new(self.author_repo.clone()), request).await
    }

    /// 某位作者的书籍列表，作者不存在时返回 NotFound
    pub async fn list_author_books(
        &self,
        author_id: i64,
        request: &PageRequest,
    ) -> Result<PageResult<BookRecord>, ApplicationError> {
        self.author_repo
            .find_with_books_by_id(author_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Author", author_id))?;

        fetch_page(&AuthorBooks::new(self.book_repo.clone(), author_id), request).await
    }

    /// 某个分类下的书籍列表，分类不存在时返回 NotFound
    pub async fn list_genre_books(
        &self,
        genre_id: i64,
        request: &PageRequest,
    ) -> Result<PageResult<BookRecord>, ApplicationError> {
        self.genre_repo
            .find_by_id(genre_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Genre", genre_id))?;

        fetch_page(&GenreBooks::new(self.book_repo.clone(), genre_id), request).await
    }

    /// 计算一组书籍的平均评分，返回 book_id -> 平均分
    pub async fn average_ratings(
        &self,
        books: &[BookRecord],
    ) -> Result<HashMap<i64, String>, ApplicationError> {
        let ids: Vec<i64> = books.iter().map(|b| b.id).collect();
        let ratings = self.book_repo.find_ratings(&ids).await?;

        Ok(ids
            .into_iter()
            .map(|id| {
                let book_ratings = ratings.get(&id).map(Vec::as_slice).unwrap_or(&[]);
                (id, average_rating(book_ratings))
            })
            .collect())
    }

    /// 组装整本书的内容树
    pub async fn book_content(&self, book_id: i64) -> Result<ContentTree, ApplicationError> {
        let book = self
            .book_repo
            .find_released_by_id(book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", book_id))?;

        let chapters = self.content_repo.find_chapters(book_id).await?;
        let pages = self.content_repo.find_pages_by_book(book_id).await?;

        let mut pages_by_chapter: HashMap<i64, Vec<PageSummary>> = HashMap::new();
        for page in pages {
            pages_by_chapter
                .entry(page.chapter_id)
                .or_default()
                .push(PageSummary {
                    id: page.id,
                    content: page.content,
                    page_number: page.page_number,
                });
        }

        let chapters = chapters
            .into_iter()
            .map(|c| ChapterSummary {
                id: c.id,
                title: c.title,
                description: c.description,
                chapter_number: c.chapter_number,
            })
            .collect();

        let tree = assemble_content_tree(
            BookSummary {
                id: book.id,
                title: book.title,
                description: book.description,
            },
            chapters,
            pages_by_chapter,
        );

        tracing::debug!(
            book_id = book_id,
            chapters = tree.chapters().len(),
            pages = tree.page_count(),
            "Content tree assembled"
        );

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};

    use crate::application::ports::{
        ChapterRecord, GenreRecord, PageRecord, RatingRecord, RepositoryError, VecSource,
    };
    use crate::domain::catalog::{BookStatus, Rating};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteAuthorRepository,
        SqliteBookRepository, SqliteContentRepository, SqliteGenreRepository,
    };

    struct FailingSource;

    #[async_trait]
    impl RecordSource for FailingSource {
        type Item = i64;

        async fn count(&self) -> Result<usize, RepositoryError> {
            Ok(5)
        }

        async fn slice(&self, _start: usize, _end: usize) -> Result<Vec<i64>, RepositoryError> {
            Err(RepositoryError::DatabaseError("connection reset".to_string()))
        }
    }

    /// count 之后记录被删掉的记录源
    struct ShrinkingSource;

    #[async_trait]
    impl RecordSource for ShrinkingSource {
        type Item = i64;

        async fn count(&self) -> Result<usize, RepositoryError> {
            Ok(10)
        }

        async fn slice(&self, start: usize, _end: usize) -> Result<Vec<i64>, RepositoryError> {
            Ok(vec![start as i64])
        }
    }

    fn request(limit: i64, offset: i64) -> PageRequest {
        PageRequest::new(limit, offset).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_page_slices_source() {
        let source = VecSource::new((0..10).collect::<Vec<i64>>());

        let first = fetch_page(&source, &request(3, 0)).await.unwrap();
        assert_eq!(first.items, vec![0, 1, 2]);
        assert_eq!(first.next_page, Some(1));
        assert_eq!(first.prev_page, None);

        let last = fetch_page(&source, &request(3, 3)).await.unwrap();
        assert_eq!(last.items, vec![9]);
        assert_eq!(last.effective_limit, 1);
        assert_eq!(last.next_page, None);
        assert_eq!(last.prev_page, Some(2));
    }

    #[tokio::test]
    async fn test_fetch_page_reports_empty_page() {
        let source = VecSource::new((0..9).collect::<Vec<i64>>());
        let result = fetch_page(&source, &request(3, 4)).await;
        assert!(matches!(result, Err(ApplicationError::EmptyPage)));
    }

    #[tokio::test]
    async fn test_fetch_page_surfaces_source_fault() {
        let result = fetch_page(&FailingSource, &request(2, 0)).await;
        assert!(matches!(result, Err(ApplicationError::SourceFault(_))));
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_short_slice() {
        let result = fetch_page(&ShrinkingSource, &request(3, 0)).await;
        assert!(matches!(result, Err(ApplicationError::SourceFault(_))));

        // 最后一页只剩一条时窗口长度为 1，不受影响
        let page = fetch_page(&ShrinkingSource, &request(3, 3)).await.unwrap();
        assert_eq!(page.items, vec![9]);
        assert_eq!(page.effective_limit, 1);
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn book(id: i64, title: &str, status: BookStatus, authors: Vec<AuthorRecord>) -> BookRecord {
        BookRecord {
            id,
            title: title.to_string(),
            description: format!("{} description", title),
            cover_image: None,
            status,
            published: date(2024, 1, id as u32),
            created: date(2024, 1, 1),
            updated: date(2024, 1, 1),
            authors,
            genres: Vec::new(),
        }
    }

    async fn service() -> (CatalogService, Arc<SqliteBookRepository>, Arc<SqliteContentRepository>) {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let book_repo = Arc::new(SqliteBookRepository::new(pool.clone()));
        let author_repo = Arc::new(SqliteAuthorRepository::new(pool.clone()));
        let genre_repo = Arc::new(SqliteGenreRepository::new(pool.clone()));
        let content_repo = Arc::new(SqliteContentRepository::new(pool.clone()));

        let author = AuthorRecord {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Byron".to_string(),
        };
        author_repo.save(&author).await.unwrap();
        genre_repo
            .save(&GenreRecord {
                id: 1,
                title: "Poetry".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();

        book_repo
            .save(&book(1, "Alpha", BookStatus::Released, vec![author.clone()]))
            .await
            .unwrap();
        book_repo
            .save(&book(2, "Beta", BookStatus::Draft, vec![author.clone()]))
            .await
            .unwrap();
        book_repo
            .save(&book(3, "Gamma", BookStatus::Released, Vec::new()))
            .await
            .unwrap();

        let service = CatalogService::new(
            book_repo.clone(),
            author_repo,
            genre_repo,
            content_repo.clone(),
        );
        (service, book_repo, content_repo)
    }

    #[tokio::test]
    async fn test_list_books_only_released() {
        let (service, _, _) = service().await;

        let page = service.list_books(&request(1, 0)).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Alpha");
        assert_eq!(page.next_page, Some(1));

        let page = service.list_books(&request(1, 1)).await.unwrap();
        assert_eq!(page.items[0].title, "Gamma");
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(0));

        let result = service.list_books(&request(1, 2)).await;
        assert!(matches!(result, Err(ApplicationError::EmptyPage)));
    }

    #[tokio::test]
    async fn test_list_author_books_includes_all_statuses() {
        let (service, _, _) = service().await;

        let page = service.list_author_books(1, &request(5, 0)).await.unwrap();
        let titles: Vec<&str> = page.items.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);

        let missing = service.list_author_books(99, &request(5, 0)).await;
        assert!(matches!(
            missing,
            Err(ApplicationError::NotFound { resource_type: "Author", id: 99 })
        ));
    }

    #[tokio::test]
    async fn test_list_authors() {
        let (service, _, _) = service().await;
        let page = service.list_authors(&request(10, 0)).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].first_name, "Ada");
    }

    #[tokio::test]
    async fn test_list_genre_books_unknown_genre() {
        let (service, _, _) = service().await;
        let result = service.list_genre_books(42, &request(1, 0)).await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));

        // 分类存在但没有书籍
        let result = service.list_genre_books(1, &request(1, 0)).await;
        assert!(matches!(result, Err(ApplicationError::EmptyPage)));
    }

    #[tokio::test]
    async fn test_average_ratings_default_and_mean() {
        let (service, book_repo, _) = service().await;
        for (user_id, value) in [(10, 4), (11, 5)] {
            book_repo
                .upsert_rating(&RatingRecord {
                    book_id: 1,
                    user_id,
                    rating: Rating::new(value).unwrap(),
                })
                .await
                .unwrap();
        }

        let books = service.list_books(&request(5, 0)).await.unwrap().items;
        let averages = service.average_ratings(&books).await.unwrap();
        assert_eq!(averages[&1], "4.5");
        assert_eq!(averages[&3], "0");
    }

    #[tokio::test]
    async fn test_book_content_tree() {
        let (service, _, content_repo) = service().await;
        let now = Utc::now();

        for (id, number) in [(20, 2), (10, 1)] {
            content_repo
                .save_chapter(&ChapterRecord {
                    id,
                    book_id: 1,
                    title: format!("Chapter {}", number),
                    description: String::new(),
                    chapter_number: number,
                    created: now,
                    updated: now,
                })
                .await
                .unwrap();
        }
        for (id, chapter_id, number) in [(102, 10, 2), (101, 10, 1), (201, 20, 1)] {
            content_repo
                .save_page(&PageRecord {
                    id,
                    chapter_id,
                    title: String::new(),
                    content: format!("page {}", id),
                    page_number: number,
                    created: now,
                    updated: now,
                })
                .await
                .unwrap();
        }

        let tree = service.book_content(1).await.unwrap();
        assert_eq!(tree.title(), "Alpha");
        assert_eq!(tree.page_count(), 3);
        let numbers: Vec<i64> = tree.chapters().iter().map(|c| c.chapter_number()).collect();
        assert_eq!(numbers, vec![1, 2]);
        let pages: Vec<i64> = tree.pages().map(|p| p.id()).collect();
        assert_eq!(pages, vec![101, 102, 201]);

        // 未发布的书籍对目录不可见
        let draft = service.book_content(2).await;
        assert!(matches!(draft, Err(ApplicationError::NotFound { .. })));
    }
}
