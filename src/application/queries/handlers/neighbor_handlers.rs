//! Neighbor Query Handlers
//!
//! 以当前文章为锚点，按发布时间取前一篇与后一篇：
//! - 升序 + after -> previous
//! - 降序 + after -> next

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ContentClientPort, ContentError, Ordering, Predicate, QueryOptions, FIRST_PUBLICATION_DATE,
};
use crate::application::queries::{GetNeighbors, SUMMARY_FIELDS};
use crate::domain::article::{assemble_summary, ArticleSummary, NeighborPair, RawPage};
use crate::domain::link_resolver::POSTS_TYPE;

/// GetNeighbors Handler
pub struct GetNeighborsHandler {
    content_client: Arc<dyn ContentClientPort>,
}

impl GetNeighborsHandler {
    pub fn new(content_client: Arc<dyn ContentClientPort>) -> Self {
        Self { content_client }
    }

    fn options(query: &GetNeighbors, ordering: Ordering) -> QueryOptions {
        QueryOptions::new()
            .with_page_size(1)
            .with_ordering(ordering)
            .with_after(query.document_id.clone())
            .with_fetch(SUMMARY_FIELDS)
            .with_reference(query.preview_ref.clone())
    }

    pub async fn handle(&self, query: GetNeighbors) -> Result<NeighborPair, ApplicationError> {
        let predicates = [Predicate::document_type(POSTS_TYPE)];
        let previous_options = Self::options(&query, Ordering::asc(FIRST_PUBLICATION_DATE));
        let next_options = Self::options(&query, Ordering::desc(FIRST_PUBLICATION_DATE));

        let (previous, next) = tokio::join!(
            self.content_client.query(&predicates, &previous_options),
            self.content_client.query(&predicates, &next_options),
        );

        match (previous, next) {
            (Err(previous_err), Err(next_err)) => {
                tracing::error!(
                    document_id = %query.document_id,
                    previous_error = %previous_err,
                    next_error = %next_err,
                    "Both neighbor lookups failed"
                );
                Err(previous_err.into())
            }
            (previous, next) => {
                let pair = NeighborPair {
                    previous: settle_side("previous", &query, previous)?,
                    next: settle_side("next", &query, next)?,
                };
                tracing::debug!(
                    document_id = %query.document_id,
                    has_previous = pair.previous.is_some(),
                    has_next = pair.next.is_some(),
                    "Neighbors resolved"
                );
                Ok(pair)
            }
        }
    }
}

/// 单侧查询失败时该侧为 None
fn settle_side(
    side: &'static str,
    query: &GetNeighbors,
    result: Result<RawPage, ContentError>,
) -> Result<Option<ArticleSummary>, ApplicationError> {
    match result {
        Ok(page) => Ok(page.results.first().map(assemble_summary).transpose()?),
        Err(e) => {
            tracing::warn!(
                side = side,
                document_id = %query.document_id,
                error = %e,
                "Neighbor lookup failed, treating side as absent"
            );
            Ok(None)
        }
    }
}
