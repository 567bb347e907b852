//! Book Commands

/// 用户为书籍评分（同一用户重复评分会覆盖）
#[derive(Debug, Clone)]
pub struct RateBook {
    pub book_id: i64,
    pub user_id: i64,
    pub rating: i64,
}
