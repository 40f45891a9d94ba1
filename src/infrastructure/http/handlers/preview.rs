//! Preview HTTP Handlers
//!
//! 内容仓库编辑器回调 `/api/preview?token=&documentId=`：
//! 成功时写入预览 cookie 并返回跳转页；token 无效返回 401。

use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{ExitPreviewCommand, GetPreviewStatus, PreviewStatus, ResolvePreviewCommand};
use crate::domain::rich_text::is_safe_url;
use crate::infrastructure::http::dto::{ApiResponse, PreviewRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extractors::Visitor;
use crate::infrastructure::http::state::AppState;

/// 解析预览 token 并跳转到对应文章
pub async fn preview(
    State(state): State<Arc<AppState>>,
    visitor: Visitor,
    Query(req): Query<PreviewRequest>,
) -> Result<Response, ApiError> {
    let session_id = visitor
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let resolved = state
        .resolve_preview_handler
        .handle(ResolvePreviewCommand {
            token: req.token,
            document_id: req.document_id,
            session_id: session_id.clone(),
        })
        .await?;

    let page = redirect_page(&resolved.url);
    Ok((
        [(SET_COOKIE, state.preview_cookie.set(&session_id))],
        Html(page.into_string()),
    )
        .into_response())
}

/// 退出预览并回到首页
pub async fn exit_preview(State(state): State<Arc<AppState>>, visitor: Visitor) -> Response {
    if let Some(session_id) = visitor.session_id {
        let response = state
            .exit_preview_handler
            .handle(ExitPreviewCommand { session_id });
        tracing::debug!(was_active = response.was_active, "Exit preview requested");
    }

    (
        [(SET_COOKIE, state.preview_cookie.clear())],
        Redirect::temporary("/"),
    )
        .into_response()
}

/// 当前访客的预览状态
pub async fn preview_status(
    State(state): State<Arc<AppState>>,
    visitor: Visitor,
) -> Json<ApiResponse<PreviewStatus>> {
    let status = match visitor.session_id {
        Some(session_id) => state
            .get_preview_status_handler
            .handle(GetPreviewStatus { session_id }),
        None => PreviewStatus {
            active: false,
            reference: None,
        },
    };

    Json(ApiResponse::success(status))
}

/// 跳转页：meta refresh + 脚本
fn redirect_page(url: &str) -> Markup {
    let target = if is_safe_url(url) { url } else { "/" };
    // 序列化为 JS 字符串字面量，并防止提前闭合 script
    let literal = serde_json::to_string(target)
        .unwrap_or_else(|_| "\"/\"".to_string())
        .replace("</", "<\\/");

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta http-equiv="refresh" content=(format!("0; url={}", target));
                title { "Redirecting" }
                script { (PreEscaped(format!("window.location.href = {};", literal))) }
            }
            body {
                p { "Redirecting to " a href=(target) { (target) } }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_page() {
        let page = redirect_page("/post/como-utilizar-hooks").into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"content="0; url=/post/como-utilizar-hooks""#));
        assert!(page.contains(r#"window.location.href = "/post/como-utilizar-hooks";"#));
    }

    #[test]
    fn test_redirect_page_escapes_target() {
        let page = redirect_page("/post/</script><script>alert(1)").into_string();
        assert!(!page.contains("</script><script>alert(1)"));

        let page = redirect_page("javascript:alert(1)").into_string();
        assert!(page.contains(r#"content="0; url=/""#));
    }
}
