//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod article_handlers;
mod feed_handlers;
mod neighbor_handlers;
mod preview_handlers;

pub use article_handlers::*;
pub use feed_handlers::*;
pub use neighbor_handlers::*;
pub use preview_handlers::*;
