//! Data Transfer Objects
//!
//! 对外 JSON 保持内容仓库的文档形状：`{ uid, first_publication_date, data: {...} }`

use serde::{Deserialize, Serialize};

use crate::domain::article::{Article, ArticleSummary, ContentBlock, FeedPage, NeighborPair};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct FeedRequest {
    pub page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct NextPageRequest {
    pub cursor: String,
}

/// 内容仓库回调预览时带的参数
#[derive(Debug, Default, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default, rename = "documentId")]
    pub document_id: String,
}

// ============================================================================
// Post DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PostSummaryData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// 列表中的文章
#[derive(Debug, Serialize)]
pub struct PostSummaryResponse {
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub data: PostSummaryData,
}

impl From<ArticleSummary> for PostSummaryResponse {
    fn from(summary: ArticleSummary) -> Self {
        Self {
            uid: summary.uid.to_string(),
            first_publication_date: summary.published_at.map(|d| d.to_rfc3339()),
            data: PostSummaryData {
                title: summary.title,
                subtitle: summary.subtitle,
                author: summary.author,
            },
        }
    }
}

/// 首页分页
#[derive(Debug, Serialize)]
pub struct PostsPaginationResponse {
    pub next_page: Option<String>,
    pub results: Vec<PostSummaryResponse>,
}

impl From<FeedPage> for PostsPaginationResponse {
    fn from(page: FeedPage) -> Self {
        Self {
            next_page: page.next_cursor.map(|c| c.as_str().to_string()),
            results: page.results.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ContentBlockResponse {
    pub heading: String,
    pub text: String,
    pub html: String,
}

impl From<ContentBlock> for ContentBlockResponse {
    fn from(block: ContentBlock) -> Self {
        Self {
            heading: block.heading,
            text: block.text,
            html: block.html,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner: Option<BannerResponse>,
    pub content: Vec<ContentBlockResponse>,
}

/// 完整文章
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub estimated_read_time: u32,
    pub data: PostData,
}

impl From<Article> for PostResponse {
    fn from(article: Article) -> Self {
        Self {
            uid: article.uid.to_string(),
            first_publication_date: article.published_at.map(|d| d.to_rfc3339()),
            estimated_read_time: article.estimated_read_time,
            data: PostData {
                title: article.title,
                subtitle: article.subtitle,
                author: article.author,
                banner: article.banner.map(|url| BannerResponse { url }),
                content: article.content.into_iter().map(Into::into).collect(),
            },
        }
    }
}

/// 相邻文章链接
#[derive(Debug, Serialize)]
pub struct NeighborLink {
    pub uid: String,
    pub title: String,
}

impl From<ArticleSummary> for NeighborLink {
    fn from(summary: ArticleSummary) -> Self {
        Self {
            uid: summary.uid.to_string(),
            title: summary.title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub previous_post: Option<NeighborLink>,
    pub next_post: Option<NeighborLink>,
}

impl From<NeighborPair> for NavigationResponse {
    fn from(pair: NeighborPair) -> Self {
        Self {
            previous_post: pair.previous.map(Into::into),
            next_post: pair.next.map(Into::into),
        }
    }
}

/// 文章页
#[derive(Debug, Serialize)]
pub struct PostPageResponse {
    pub post: PostResponse,
    pub navigation: NavigationResponse,
    pub preview: bool,
}

#[derive(Debug, Serialize)]
pub struct UidsResponse {
    pub uids: Vec<String>,
}
