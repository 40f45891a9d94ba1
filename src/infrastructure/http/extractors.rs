//! Request Extractors
//!
//! 从 cookie 中读取访客会话及其预览 ref

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use headers::{Cookie, HeaderMapExt};

use super::state::AppState;
use crate::domain::article::PreviewRef;

/// 当前访客
#[derive(Debug, Clone, Default)]
pub struct Visitor {
    /// cookie 中的会话 id
    pub session_id: Option<String>,
    /// 会话处于预览时的 ref
    pub preview_ref: Option<PreviewRef>,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Visitor {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session_id = parts
            .headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(&state.preview_cookie.name).map(str::to_string))
            .filter(|id| !id.is_empty());

        let preview_ref = session_id
            .as_deref()
            .and_then(|id| state.preview_sessions.current(id));

        Ok(Self {
            session_id,
            preview_ref,
        })
    }
}
