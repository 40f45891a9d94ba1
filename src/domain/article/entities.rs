//! Article Context - Entities

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Cursor, DocumentId, Uid};
use crate::domain::rich_text::RichTextElement;

/// 文章正文中的一个标题段落
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlock {
    /// 段落标题（文章内作为展示 key）
    pub heading: String,
    /// 原始富文本
    pub body: Vec<RichTextElement>,
    /// 纯文本投影
    pub text: String,
    /// HTML 投影
    pub html: String,
}

/// 完整文章
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub id: DocumentId,
    pub uid: Uid,
    /// 首次发布时间；未发布时为 None
    pub published_at: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner: Option<String>,
    pub content: Vec<ContentBlock>,
    /// 预计阅读时长（分钟）
    pub estimated_read_time: u32,
}

/// 文章摘要（列表投影）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleSummary {
    pub id: DocumentId,
    pub uid: Uid,
    pub published_at: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl From<&Article> for ArticleSummary {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            uid: article.uid.clone(),
            published_at: article.published_at,
            title: article.title.clone(),
            subtitle: article.subtitle.clone(),
            author: article.author.clone(),
        }
    }
}

/// 一页文章列表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedPage {
    pub results: Vec<ArticleSummary>,
    /// 下一页游标；没有更多页时为 None
    pub next_cursor: Option<Cursor>,
}

impl FeedPage {
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// 相邻文章（按发布时间）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NeighborPair {
    pub previous: Option<ArticleSummary>,
    pub next: Option<ArticleSummary>,
}
