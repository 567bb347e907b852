//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、RecordSource）
//! - catalog: 目录服务（分页、评分聚合、内容树）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod catalog;
pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use catalog::{fetch_page, CatalogService};

pub use commands::{
    handlers::{
        ContactMessageResponse, RateBookHandler, RateBookResponse, SubmitContactMessageHandler,
    },
    RateBook, SubmitContactMessage,
};

pub use error::ApplicationError;

pub use ports::{
    AnnouncementRecord, AuthorRecord, AuthorRepositoryPort, BookRecord, BookRepositoryPort,
    ChapterRecord, ContactMessageRecord, ContentRepositoryPort, GenreRecord, GenreRepositoryPort,
    InfoRepositoryPort, PageRecord, RatingRecord, RecordSource, RepositoryError, VecSource,
};

pub use queries::{
    // Author queries
    GetAuthor,
    ListAuthorBooks,
    ListAuthors,
    // Book queries
    GetBook,
    GetBookChapters,
    GetBookContent,
    GetChapterPages,
    ListBooks,
    ListGenreBooks,
    ListGenres,
    TopBooks,
    // Info queries
    GetLatestAnnouncement,
    // Handlers
    handlers::{
        AnnouncementResponse, AuthorResponse, BookResponse, ChapterResponse, GenreResponse,
        PageResponse, GetAuthorHandler, GetBookChaptersHandler, GetBookContentHandler,
        GetBookHandler, GetChapterPagesHandler, GetLatestAnnouncementHandler,
        ListAuthorBooksHandler, ListAuthorsHandler, ListBooksHandler, ListGenreBooksHandler,
        ListGenresHandler, TopBooksHandler,
    },
};
