//! Post HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::{
    GetArticle, GetArticlePage, GetFeed, GetNeighbors, GetNextFeedPage, ListArticleUids,
};
use crate::domain::article::{Cursor, DocumentId, Uid};
use crate::infrastructure::http::dto::{
    ApiResponse, FeedRequest, NavigationResponse, NextPageRequest, PostPageResponse, PostResponse,
    PostsPaginationResponse, UidsResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extractors::Visitor;
use crate::infrastructure::http::state::AppState;

fn parse_uid(uid: String) -> Result<Uid, ApiError> {
    Uid::new(uid).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// 首页第一页
pub async fn get_feed(
    State(state): State<Arc<AppState>>,
    Query(req): Query<FeedRequest>,
) -> Result<Json<ApiResponse<PostsPaginationResponse>>, ApiError> {
    let page = state
        .get_feed_handler
        .handle(GetFeed {
            page_size: req.page_size,
        })
        .await?;

    Ok(Json(ApiResponse::success(page.into())))
}

/// 按游标加载下一页
pub async fn get_next_feed_page(
    State(state): State<Arc<AppState>>,
    Query(req): Query<NextPageRequest>,
) -> Result<Json<ApiResponse<PostsPaginationResponse>>, ApiError> {
    let cursor = Cursor::new(req.cursor).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let page = state
        .get_next_feed_page_handler
        .handle(GetNextFeedPage { cursor })
        .await?;

    Ok(Json(ApiResponse::success(page.into())))
}

/// 全部文章 uid
pub async fn list_uids(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<UidsResponse>>, ApiError> {
    let uids = state.list_article_uids_handler.handle(ListArticleUids).await?;

    Ok(Json(ApiResponse::success(UidsResponse {
        uids: uids.into_iter().map(|uid| uid.to_string()).collect(),
    })))
}

/// 单篇文章（预览会话读取草稿）
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    visitor: Visitor,
    Path(uid): Path<String>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let article = state
        .get_article_handler
        .handle(GetArticle {
            uid: parse_uid(uid)?,
            preview_ref: visitor.preview_ref,
        })
        .await?;

    Ok(Json(ApiResponse::success(article.into())))
}

/// 文章页：文章 + 相邻文章 + 预览标记
pub async fn get_post_page(
    State(state): State<Arc<AppState>>,
    visitor: Visitor,
    Path(uid): Path<String>,
) -> Result<Json<ApiResponse<PostPageResponse>>, ApiError> {
    let page = state
        .get_article_page_handler
        .handle(GetArticlePage {
            uid: parse_uid(uid)?,
            preview_ref: visitor.preview_ref,
        })
        .await?;

    Ok(Json(ApiResponse::success(PostPageResponse {
        post: page.article.into(),
        navigation: page.neighbors.into(),
        preview: page.preview,
    })))
}

/// 相邻文章
pub async fn get_neighbors(
    State(state): State<Arc<AppState>>,
    visitor: Visitor,
    Path(document_id): Path<String>,
) -> Result<Json<ApiResponse<NavigationResponse>>, ApiError> {
    let document_id =
        DocumentId::new(document_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let pair = state
        .get_neighbors_handler
        .handle(GetNeighbors {
            document_id,
            preview_ref: visitor.preview_ref,
        })
        .await?;

    Ok(Json(ApiResponse::success(pair.into())))
}
