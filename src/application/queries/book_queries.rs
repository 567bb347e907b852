//! Book Queries

use crate::domain::PageRequest;

/// 已发布书籍分页列表
#[derive(Debug, Clone)]
pub struct ListBooks {
    pub page: PageRequest,
}

/// 获取单本已发布书籍
#[derive(Debug, Clone)]
pub struct GetBook {
    pub book_id: i64,
}

/// 评分最高的书籍
#[derive(Debug, Clone)]
pub struct TopBooks {
    pub limit: usize,
}

/// 书籍章节列表
#[derive(Debug, Clone)]
pub struct GetBookChapters {
    pub book_id: i64,
}

/// 章节页面列表
#[derive(Debug, Clone)]
pub struct GetChapterPages {
    pub book_id: i64,
    pub chapter_number: i64,
}

/// 整本书内容树
#[derive(Debug, Clone)]
pub struct GetBookContent {
    pub book_id: i64,
}

/// 所有分类
#[derive(Debug, Clone)]
pub struct ListGenres;

/// 分类下的书籍分页列表
#[derive(Debug, Clone)]
pub struct ListGenreBooks {
    pub genre_id: i64,
    pub page: PageRequest,
}
