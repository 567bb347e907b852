//! Domain Layer - 领域层
//!
//! - Catalog Context: 书籍目录（评分、内容树）
//! - Pagination: 所有列表共享的分页计算

pub mod catalog;
pub mod pagination;

pub use pagination::{paginate, PageRequest, PageResult, PageWindow, PaginationError};
