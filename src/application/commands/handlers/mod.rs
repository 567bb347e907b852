//! Command Handlers 实现

mod book_handlers;
mod info_handlers;

pub use book_handlers::*;
pub use info_handlers::*;
