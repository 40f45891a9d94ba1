//! Feed Queries

use crate::domain::article::Cursor;

/// 首页默认每页文章数
pub const DEFAULT_PAGE_SIZE: u32 = 2;

/// 单页上限
pub const MAX_PAGE_SIZE: u32 = 100;

/// 列表类查询只请求摘要字段
pub const SUMMARY_FIELDS: &[&str] = &["posts.title", "posts.subtitle", "posts.author"];

/// 获取首页第一页
#[derive(Debug, Clone, Default)]
pub struct GetFeed {
    /// None 时使用配置的默认值
    pub page_size: Option<u32>,
}

/// 按游标获取下一页
#[derive(Debug, Clone)]
pub struct GetNextFeedPage {
    pub cursor: Cursor,
}

/// 列出全部文章 uid（静态路径）
#[derive(Debug, Clone, Default)]
pub struct ListArticleUids;
