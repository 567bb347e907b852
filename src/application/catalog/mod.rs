//! Catalog - 目录编排
//!
//! `CatalogService` 把分页计算、记录源和内容树组装组合起来，
//! 是 query handler 访问目录的唯一入口。

mod service;
mod sources;

pub use service::{fetch_page, CatalogService};
pub use sources::{AuthorBooks, AuthorsWithBooks, GenreBooks, ReleasedBooks};
