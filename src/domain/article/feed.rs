//! 客户端可见的文章列表
//!
//! 合并策略为"替换"：首页结果始终展示，其后只展示最近一次加载的页。
//! 再次加载时覆盖上一批额外结果，而不是追加。

use serde::Serialize;

use super::{ArticleSummary, Cursor, FeedPage};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedView {
    first: Vec<ArticleSummary>,
    extra: Vec<ArticleSummary>,
    next_cursor: Option<Cursor>,
}

impl FeedView {
    /// 以首页初始化
    pub fn new(first_page: FeedPage) -> Self {
        Self {
            first: first_page.results,
            extra: Vec::new(),
            next_cursor: first_page.next_cursor,
        }
    }

    /// 应用新加载的一页：替换额外结果并推进游标
    pub fn apply_next(&mut self, page: FeedPage) {
        self.extra = page.results;
        self.next_cursor = page.next_cursor;
    }

    /// 当前可见的文章
    pub fn visible(&self) -> impl Iterator<Item = &ArticleSummary> {
        self.first.iter().chain(self.extra.iter())
    }

    pub fn first_page(&self) -> &[ArticleSummary] {
        &self.first
    }

    pub fn extra(&self) -> &[ArticleSummary] {
        &self.extra
    }

    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next_cursor.as_ref()
    }

    /// 是否还能继续加载
    pub fn can_load_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}
