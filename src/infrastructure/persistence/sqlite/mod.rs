//! SQLite Persistence - SQLite 数据库持久化实现

mod author_repo;
mod book_repo;
mod content_repo;
mod database;
mod genre_repo;
mod info_repo;

pub use author_repo::SqliteAuthorRepository;
pub use book_repo::SqliteBookRepository;
pub use content_repo::SqliteContentRepository;
pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
pub use genre_repo::SqliteGenreRepository;
pub use info_repo::SqliteInfoRepository;
