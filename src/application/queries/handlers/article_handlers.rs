//! Article Query Handlers

use serde::Serialize;
use std::sync::Arc;

use super::GetNeighborsHandler;
use crate::application::error::ApplicationError;
use crate::application::ports::{ContentClientPort, QueryOptions};
use crate::application::queries::{GetArticle, GetArticlePage, GetNeighbors};
use crate::domain::article::{assemble, Article, NeighborPair};
use crate::domain::link_resolver::POSTS_TYPE;

// ============================================================================
// Response DTOs
// ============================================================================

/// 文章页：文章 + 相邻文章 + 是否处于预览
#[derive(Debug, Clone, Serialize)]
pub struct ArticlePage {
    pub article: Article,
    pub neighbors: NeighborPair,
    pub preview: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetArticle Handler
pub struct GetArticleHandler {
    content_client: Arc<dyn ContentClientPort>,
}

impl GetArticleHandler {
    pub fn new(content_client: Arc<dyn ContentClientPort>) -> Self {
        Self { content_client }
    }

    pub async fn handle(&self, query: GetArticle) -> Result<Article, ApplicationError> {
        let options = QueryOptions::new().with_reference(query.preview_ref);
        let raw = self
            .content_client
            .get_by_uid(POSTS_TYPE, &query.uid, &options)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Article", query.uid.as_str()))?;

        let article = assemble(&raw)?;
        tracing::debug!(
            uid = %article.uid,
            blocks = article.content.len(),
            read_time = article.estimated_read_time,
            "Article assembled"
        );
        Ok(article)
    }
}

/// GetArticlePage Handler
///
/// 未发布的文章（预览草稿）没有发布时间，不查询相邻文章
pub struct GetArticlePageHandler {
    articles: GetArticleHandler,
    neighbors: GetNeighborsHandler,
}

impl GetArticlePageHandler {
    pub fn new(content_client: Arc<dyn ContentClientPort>) -> Self {
        Self {
            articles: GetArticleHandler::new(content_client.clone()),
            neighbors: GetNeighborsHandler::new(content_client),
        }
    }

    pub async fn handle(&self, query: GetArticlePage) -> Result<ArticlePage, ApplicationError> {
        let preview = query.preview_ref.is_some();
        let article = self
            .articles
            .handle(GetArticle {
                uid: query.uid,
                preview_ref: query.preview_ref.clone(),
            })
            .await?;

        let neighbors = if article.published_at.is_some() {
            self.neighbors
                .handle(GetNeighbors {
                    document_id: article.id.clone(),
                    preview_ref: query.preview_ref,
                })
                .await?
        } else {
            tracing::debug!(uid = %article.uid, "Unpublished article, skipping neighbors");
            NeighborPair::default()
        };

        Ok(ArticlePage {
            article,
            neighbors,
            preview,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::{PreviewRef, RawDocument, Uid};
    use crate::infrastructure::adapters::FakeContentClient;
    use serde_json::json;

    fn uid(value: &str) -> Uid {
        Uid::new(value).unwrap()
    }

    fn sample_client() -> Arc<FakeContentClient> {
        Arc::new(FakeContentClient::with_defaults().with_sample_posts())
    }

    fn draft(id: &str, uid: &str, title: &str) -> RawDocument {
        RawDocument {
            id: id.to_string(),
            uid: Some(uid.to_string()),
            doc_type: "posts".to_string(),
            first_publication_date: None,
            data: json!({
                "title": title,
                "author": "Equipe",
                "content": [{
                    "heading": "Rascunho",
                    "body": [{ "type": "paragraph", "text": "Texto ainda em revisão", "spans": [] }]
                }]
            }),
        }
    }

    #[tokio::test]
    async fn test_get_article() {
        let handler = GetArticleHandler::new(sample_client());
        let article = handler
            .handle(GetArticle {
                uid: uid("como-utilizar-hooks"),
                preview_ref: None,
            })
            .await
            .unwrap();

        assert_eq!(article.id.as_str(), "YFzqWBIAACQAbM8y");
        assert_eq!(article.title, "Como utilizar Hooks");
        assert_eq!(article.content.len(), 1);
        assert_eq!(article.estimated_read_time, 1);
        assert!(article.content[0].html.contains("<strong>Lorem ipsum</strong>"));
    }

    #[tokio::test]
    async fn test_get_article_not_found() {
        let handler = GetArticleHandler::new(sample_client());
        let err = handler
            .handle(GetArticle {
                uid: uid("nao-existe"),
                preview_ref: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound { resource_type: "Article", .. }));
    }

    #[tokio::test]
    async fn test_article_page_with_neighbors() {
        let handler = GetArticlePageHandler::new(sample_client());
        let page = handler
            .handle(GetArticlePage {
                uid: uid("criando-um-app-cra-do-zero"),
                preview_ref: None,
            })
            .await
            .unwrap();

        assert!(!page.preview);
        assert_eq!(page.article.uid.as_str(), "criando-um-app-cra-do-zero");
        assert_eq!(
            page.neighbors.previous.map(|s| s.uid.to_string()),
            Some("como-utilizar-hooks".to_string())
        );
        assert_eq!(
            page.neighbors.next.map(|s| s.uid.to_string()),
            Some("mapas-com-react-usando-leaflet".to_string())
        );
    }

    #[tokio::test]
    async fn test_unpublished_preview_skips_neighbors() {
        let client = Arc::new(
            FakeContentClient::with_defaults()
                .with_sample_posts()
                .with_preview("preview-ref", vec![draft("draft-1", "novo-post", "Novo post")]),
        );
        let handler = GetArticlePageHandler::new(client.clone());

        let page = handler
            .handle(GetArticlePage {
                uid: uid("novo-post"),
                preview_ref: Some(PreviewRef::new("preview-ref").unwrap()),
            })
            .await
            .unwrap();

        assert!(page.preview);
        assert_eq!(page.article.title, "Novo post");
        assert!(page.article.published_at.is_none());
        assert_eq!(page.neighbors, NeighborPair::default());
        // 只有一次 get_by_uid
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_draft_is_invisible_without_preview() {
        let client = Arc::new(
            FakeContentClient::with_defaults()
                .with_preview("preview-ref", vec![draft("draft-1", "novo-post", "Novo post")]),
        );
        let handler = GetArticleHandler::new(client);

        let err = handler
            .handle(GetArticle {
                uid: uid("novo-post"),
                preview_ref: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
