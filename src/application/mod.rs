//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ContentClient、PreviewSession）
//! - commands: CQRS 命令及处理器（预览进入/退出）
//! - queries: CQRS 查询及处理器（首页分页、文章、相邻文章）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{ExitPreviewHandler, PreviewState, ResolvePreviewHandler},
    ExitPreviewCommand, ExitPreviewResponse, ResolvePreviewCommand, ResolvePreviewResponse,
};

pub use error::ApplicationError;

pub use ports::{
    ContentClientPort, ContentError, Ordering, Predicate, PreviewSession, PreviewSessionPort,
    QueryOptions, SortDirection, FIRST_PUBLICATION_DATE,
};

pub use queries::{
    handlers::{
        ArticlePage, GetArticleHandler, GetArticlePageHandler, GetFeedHandler,
        GetNeighborsHandler, GetNextFeedPageHandler, GetPreviewStatusHandler,
        ListArticleUidsHandler, PreviewStatus,
    },
    GetArticle, GetArticlePage, GetFeed, GetNeighbors, GetNextFeedPage, GetPreviewStatus,
    ListArticleUids, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
