//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod author_handlers;
mod book_handlers;
mod info_handlers;

pub use author_handlers::*;
pub use book_handlers::*;
pub use info_handlers::*;
