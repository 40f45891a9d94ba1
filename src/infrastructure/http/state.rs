//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ExitPreviewHandler, ResolvePreviewHandler,
    // Query handlers
    GetArticleHandler, GetArticlePageHandler, GetFeedHandler, GetNeighborsHandler,
    GetNextFeedPageHandler, GetPreviewStatusHandler, ListArticleUidsHandler,
    // Ports
    ContentClientPort, PreviewSessionPort,
};

/// 预览 cookie 设置
#[derive(Debug, Clone)]
pub struct PreviewCookie {
    pub name: String,
    pub max_age_secs: u64,
}

impl PreviewCookie {
    pub fn new(name: impl Into<String>, max_age_secs: u64) -> Self {
        Self {
            name: name.into(),
            max_age_secs,
        }
    }

    /// 写入会话 id 的 `Set-Cookie` 值
    pub fn set(&self, session_id: &str) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name, session_id, self.max_age_secs
        )
    }

    /// 清除 cookie 的 `Set-Cookie` 值
    pub fn clear(&self) -> String {
        format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", self.name)
    }
}

impl Default for PreviewCookie {
    fn default() -> Self {
        Self::new("spacetraveling_preview", 3600)
    }
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub content_client: Arc<dyn ContentClientPort>,
    pub preview_sessions: Arc<dyn PreviewSessionPort>,
    pub preview_cookie: PreviewCookie,

    // ========== Command Handlers ==========
    pub resolve_preview_handler: ResolvePreviewHandler,
    pub exit_preview_handler: ExitPreviewHandler,

    // ========== Query Handlers ==========
    pub get_feed_handler: GetFeedHandler,
    pub get_next_feed_page_handler: GetNextFeedPageHandler,
    pub list_article_uids_handler: ListArticleUidsHandler,
    pub get_article_handler: GetArticleHandler,
    pub get_article_page_handler: GetArticlePageHandler,
    pub get_neighbors_handler: GetNeighborsHandler,
    pub get_preview_status_handler: GetPreviewStatusHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        content_client: Arc<dyn ContentClientPort>,
        preview_sessions: Arc<dyn PreviewSessionPort>,
        preview_cookie: PreviewCookie,
        default_page_size: u32,
    ) -> Self {
        Self {
            // Ports
            content_client: content_client.clone(),
            preview_sessions: preview_sessions.clone(),
            preview_cookie,

            // Command handlers
            resolve_preview_handler: ResolvePreviewHandler::new(
                content_client.clone(),
                preview_sessions.clone(),
            ),
            exit_preview_handler: ExitPreviewHandler::new(preview_sessions.clone()),

            // Query handlers
            get_feed_handler: GetFeedHandler::new(content_client.clone(), default_page_size),
            get_next_feed_page_handler: GetNextFeedPageHandler::new(content_client.clone()),
            list_article_uids_handler: ListArticleUidsHandler::new(content_client.clone()),
            get_article_handler: GetArticleHandler::new(content_client.clone()),
            get_article_page_handler: GetArticlePageHandler::new(content_client.clone()),
            get_neighbors_handler: GetNeighborsHandler::new(content_client),
            get_preview_status_handler: GetPreviewStatusHandler::new(preview_sessions),
        }
    }
}
