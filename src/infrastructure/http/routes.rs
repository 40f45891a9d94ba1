//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                    GET  健康检查
//! - /api/posts                   GET  首页第一页（?page_size=）
//! - /api/posts/:uid              GET  单篇文章（任意 slug）
//! - /api/feed                    GET  同 /api/posts
//! - /api/feed/next               GET  按游标加载下一页（?cursor=）
//! - /api/feed/uids               GET  全部文章 uid
//! - /api/post/:uid               GET  文章页（文章 + 相邻文章 + 预览标记）
//! - /api/neighbors/:document_id  GET  相邻文章
//! - /api/preview                 GET  解析预览 token（?token=&documentId=）
//! - /api/preview/status          GET  当前预览状态
//! - /api/exit-preview            GET  退出预览

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/posts", posts_routes())
        .nest("/feed", feed_routes())
        .route("/post/:uid", get(handlers::get_post_page))
        .route("/neighbors/:document_id", get(handlers::get_neighbors))
        .route("/preview", get(handlers::preview))
        .route("/preview/status", get(handlers::preview_status))
        .route("/exit-preview", get(handlers::exit_preview))
}

/// Posts 路由：`/:uid` 下不放静态路径
fn posts_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::get_feed))
        .route("/:uid", get(handlers::get_post))
}

/// Feed 路由
fn feed_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::get_feed))
        .route("/next", get(handlers::get_next_feed_page))
        .route("/uids", get(handlers::list_uids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::RawDocument;
    use crate::infrastructure::adapters::FakeContentClient;
    use crate::infrastructure::http::state::PreviewCookie;
    use crate::infrastructure::memory::InMemoryPreviewSessionManager;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn app() -> Router {
        let client = Arc::new(
            FakeContentClient::with_defaults()
                .with_sample_posts()
                .with_preview("preview-ref", Vec::new()),
        );
        let sessions = InMemoryPreviewSessionManager::new().arc();
        let state = AppState::new(client, sessions, PreviewCookie::new("preview_session", 600), 2);
        create_routes().with_state(Arc::new(state))
    }

    async fn send(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        app.clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = app();
        let body = json(send(&app, "/api/ping", None).await).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["content_store"], "up");
    }

    #[tokio::test]
    async fn test_feed_and_next_page() {
        let app = app();
        let body = json(send(&app, "/api/posts", None).await).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["results"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["results"][0]["uid"], "como-utilizar-hooks");
        assert_eq!(body["data"]["results"][0]["data"]["author"], "Joseph Oliveira");

        let cursor = body["data"]["next_page"].as_str().unwrap().to_string();
        let body = json(send(&app, &format!("/api/feed/next?cursor={}", cursor), None).await).await;
        assert_eq!(body["data"]["results"].as_array().unwrap().len(), 1);
        assert!(body["data"]["next_page"].is_null());
    }

    #[tokio::test]
    async fn test_uids() {
        let app = app();
        let body = json(send(&app, "/api/feed/uids", None).await).await;
        assert_eq!(body["data"]["uids"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_feed_control_words_are_valid_slugs() {
        let reserved = |id: &str, uid: &str| RawDocument {
            id: id.to_string(),
            uid: Some(uid.to_string()),
            doc_type: "posts".to_string(),
            first_publication_date: Some("2021-05-01T10:00:00+0000".to_string()),
            data: serde_json::json!({ "title": uid, "content": [] }),
        };
        let client = Arc::new(
            FakeContentClient::with_defaults()
                .with_document(reserved("doc-next", "next"))
                .with_document(reserved("doc-uids", "uids")),
        );
        let sessions = InMemoryPreviewSessionManager::new().arc();
        let state = AppState::new(client, sessions, PreviewCookie::new("preview_session", 600), 2);
        let app = create_routes().with_state(Arc::new(state));

        for slug in ["next", "uids"] {
            let body = json(send(&app, &format!("/api/posts/{}", slug), None).await).await;
            assert_eq!(body["errno"], 0);
            assert_eq!(body["data"]["uid"], slug);
        }
    }

    #[tokio::test]
    async fn test_post_page() {
        let app = app();
        let body = json(send(&app, "/api/post/criando-um-app-cra-do-zero", None).await).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["post"]["estimated_read_time"], 1);
        assert_eq!(
            body["data"]["navigation"]["previous_post"]["uid"],
            "como-utilizar-hooks"
        );
        assert_eq!(
            body["data"]["navigation"]["next_post"]["uid"],
            "mapas-com-react-usando-leaflet"
        );
        assert_eq!(body["data"]["preview"], false);
    }

    #[tokio::test]
    async fn test_missing_post_is_business_error() {
        let app = app();
        let response = send(&app, "/api/posts/nao-existe", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["errno"], 404);
    }

    #[tokio::test]
    async fn test_neighbors() {
        let app = app();
        let body = json(send(&app, "/api/neighbors/YFzqWBIAACQAbM8y", None).await).await;
        assert!(body["data"]["previous_post"].is_null());
        assert_eq!(body["data"]["next_post"]["uid"], "criando-um-app-cra-do-zero");
    }

    #[tokio::test]
    async fn test_invalid_preview_token_is_401() {
        let app = app();
        let response = send(&app, "/api/preview?token=expired&documentId=YFzqWBIAACQAbM8y", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let body = json(response).await;
        assert_eq!(body["errno"], 401);
        assert_eq!(body["error"], "Invalid token");

        let response = send(&app, "/api/preview", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_preview_round_trip() {
        let app = app();
        let response = send(
            &app,
            "/api/preview?token=preview-ref&documentId=YFzqWBIAACQAbM8y",
            Some("preview_session=visitor-1"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with("preview_session=visitor-1;"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("url=/post/como-utilizar-hooks"));

        let cookie = Some("preview_session=visitor-1");
        let body = json(send(&app, "/api/preview/status", cookie).await).await;
        assert_eq!(body["data"]["active"], true);

        let body = json(send(&app, "/api/post/como-utilizar-hooks", cookie).await).await;
        assert_eq!(body["data"]["preview"], true);

        let response = send(&app, "/api/exit-preview", cookie).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

        let body = json(send(&app, "/api/preview/status", cookie).await).await;
        assert_eq!(body["data"]["active"], false);
    }
}
