//! HTTP Handlers

mod authors;
mod books;
mod info;
mod ping;

pub use authors::*;
pub use books::*;
pub use info::*;
pub use ping::*;
