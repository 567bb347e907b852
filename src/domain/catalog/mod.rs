//! Catalog Context - 书籍目录限界上下文
//!
//! 职责:
//! - 评分聚合
//! - Book -> Chapter -> Page 内容树组装
//! - 目录相关的值对象

mod content_tree;
mod errors;
mod rating;
mod value_objects;

pub use content_tree::{
    assemble_content_tree, BookSummary, ChapterNode, ChapterSummary, ContentTree, PageNode,
    PageSummary,
};
pub use errors::CatalogError;
pub use rating::{average_rating, Rating, DEFAULT_AVERAGE_RATING};
pub use value_objects::{BookStatus, ContactEmail};
