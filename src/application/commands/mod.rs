//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：评分、留言

mod book_commands;
mod info_commands;

pub mod handlers;

pub use book_commands::*;
pub use info_commands::*;
