//! Author Queries

use crate::domain::PageRequest;

/// 作者分页列表
#[derive(Debug, Clone)]
pub struct ListAuthors {
    pub page: PageRequest,
}

/// 获取作者详情
#[derive(Debug, Clone)]
pub struct GetAuthor {
    pub author_id: i64,
}

/// 作者书籍分页列表
#[derive(Debug, Clone)]
pub struct ListAuthorBooks {
    pub author_id: i64,
    pub page: PageRequest,
}
