//! Feed Query Handlers
//!
//! 首页分页：第一页 + 按游标加载后续页

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ContentClientPort, Predicate, QueryOptions};
use crate::application::queries::{
    GetFeed, GetNextFeedPage, ListArticleUids, MAX_PAGE_SIZE, SUMMARY_FIELDS,
};
use crate::domain::article::{assemble_summary, Cursor, FeedPage, RawPage, Uid};
use crate::domain::link_resolver::POSTS_TYPE;

/// 遍历 uid 时的单页大小
const UID_WALK_PAGE_SIZE: u32 = MAX_PAGE_SIZE;

/// 原始分页结果 -> FeedPage
///
/// 任一文档结构不符时整页失败
fn to_feed_page(raw: RawPage) -> Result<FeedPage, ApplicationError> {
    let results = raw
        .results
        .iter()
        .map(assemble_summary)
        .collect::<Result<Vec<_>, _>>()?;

    let next_cursor = raw
        .next_page
        .filter(|c| !c.trim().is_empty())
        .map(Cursor::new)
        .transpose()?;

    Ok(FeedPage {
        results,
        next_cursor,
    })
}

/// GetFeed Handler
pub struct GetFeedHandler {
    content_client: Arc<dyn ContentClientPort>,
    default_page_size: u32,
}

impl GetFeedHandler {
    pub fn new(content_client: Arc<dyn ContentClientPort>, default_page_size: u32) -> Self {
        Self {
            content_client,
            default_page_size,
        }
    }

    pub async fn handle(&self, query: GetFeed) -> Result<FeedPage, ApplicationError> {
        let page_size = query
            .page_size
            .unwrap_or(self.default_page_size)
            .clamp(1, MAX_PAGE_SIZE);

        let options = QueryOptions::new()
            .with_page_size(page_size)
            .with_fetch(SUMMARY_FIELDS);
        let raw = self
            .content_client
            .query(&[Predicate::document_type(POSTS_TYPE)], &options)
            .await?;

        let page = to_feed_page(raw)?;
        tracing::debug!(
            page_size = page_size,
            results = page.results.len(),
            has_more = page.has_more(),
            "Feed first page loaded"
        );
        Ok(page)
    }
}

/// GetNextFeedPage Handler
pub struct GetNextFeedPageHandler {
    content_client: Arc<dyn ContentClientPort>,
}

impl GetNextFeedPageHandler {
    pub fn new(content_client: Arc<dyn ContentClientPort>) -> Self {
        Self { content_client }
    }

    pub async fn handle(&self, query: GetNextFeedPage) -> Result<FeedPage, ApplicationError> {
        let raw = self.content_client.next_page(&query.cursor).await?;
        let page = to_feed_page(raw)?;

        tracing::debug!(
            results = page.results.len(),
            has_more = page.has_more(),
            "Feed next page loaded"
        );
        Ok(page)
    }
}

/// ListArticleUids Handler
///
/// 逐页遍历直到游标为空；游标重复视为仓库错误
pub struct ListArticleUidsHandler {
    content_client: Arc<dyn ContentClientPort>,
}

impl ListArticleUidsHandler {
    pub fn new(content_client: Arc<dyn ContentClientPort>) -> Self {
        Self { content_client }
    }

    pub async fn handle(&self, _query: ListArticleUids) -> Result<Vec<Uid>, ApplicationError> {
        let options = QueryOptions::new().with_page_size(UID_WALK_PAGE_SIZE);
        let mut page = self
            .content_client
            .query(&[Predicate::document_type(POSTS_TYPE)], &options)
            .await?;

        let mut uids = Vec::new();
        let mut seen_cursors = HashSet::new();

        loop {
            for doc in &page.results {
                let uid = doc
                    .uid
                    .as_deref()
                    .and_then(|uid| Uid::new(uid).ok())
                    .ok_or_else(|| {
                        ApplicationError::MalformedDocument(format!("document {} has no uid", doc.id))
                    })?;
                uids.push(uid);
            }

            let Some(next) = page.next_page.take().filter(|c| !c.trim().is_empty()) else {
                break;
            };
            if !seen_cursors.insert(next.clone()) {
                return Err(ApplicationError::UpstreamUnavailable(format!(
                    "content store repeated cursor: {}",
                    next
                )));
            }
            page = self.content_client.next_page(&Cursor::new(next)?).await?;
        }

        tracing::info!(count = uids.len(), "Article uids listed");
        Ok(uids)
    }
}
