//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod record_source;
mod repositories;

pub use record_source::{RecordSource, VecSource};
pub use repositories::{
    AnnouncementRecord, AuthorRecord, AuthorRepositoryPort, BookRecord, BookRepositoryPort,
    ChapterRecord, ContactMessageRecord, ContentRepositoryPort, GenreRecord, GenreRepositoryPort,
    InfoRepositoryPort, PageRecord, RatingRecord, RepositoryError,
};
