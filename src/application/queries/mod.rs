//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：首页分页、文章组装、相邻文章与预览状态

mod article_queries;
mod feed_queries;
mod neighbor_queries;
mod preview_queries;

pub mod handlers;

pub use article_queries::*;
pub use feed_queries::*;
pub use neighbor_queries::*;
pub use preview_queries::*;
