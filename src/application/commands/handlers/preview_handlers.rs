//! Preview Command Handlers
//!
//! 预览解析状态：Pending -> Resolved | Rejected。
//! 只有 Resolved 会写入会话；Rejected 不触碰会话。

use std::sync::Arc;

use crate::application::commands::preview_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{ContentClientPort, PreviewSession, PreviewSessionPort};
use crate::domain::article::{DocumentId, PreviewRef};
use crate::domain::{resolve_link, DocumentLink};

/// 预览解析状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    Pending,
    Resolved { url: String },
    Rejected,
}

impl PreviewState {
    /// 仓库给出结果后结束 Pending；已结束的状态保持不变
    pub fn settle(self, link: Option<DocumentLink>) -> Self {
        match self {
            Self::Pending => match link {
                Some(link) => Self::Resolved {
                    url: resolve_link(&link),
                },
                None => Self::Rejected,
            },
            settled => settled,
        }
    }
}

/// ResolvePreview Handler
pub struct ResolvePreviewHandler {
    content_client: Arc<dyn ContentClientPort>,
    preview_sessions: Arc<dyn PreviewSessionPort>,
}

impl ResolvePreviewHandler {
    pub fn new(
        content_client: Arc<dyn ContentClientPort>,
        preview_sessions: Arc<dyn PreviewSessionPort>,
    ) -> Self {
        Self {
            content_client,
            preview_sessions,
        }
    }

    pub async fn handle(
        &self,
        cmd: ResolvePreviewCommand,
    ) -> Result<ResolvePreviewResponse, ApplicationError> {
        // 空 token / 空文档 id 不请求仓库
        let (reference, document_id) =
            match (PreviewRef::new(cmd.token), DocumentId::new(cmd.document_id)) {
                (Ok(reference), Ok(document_id)) => (reference, document_id),
                _ => {
                    tracing::warn!(
                        session_id = %cmd.session_id,
                        "Preview request without token or document id"
                    );
                    return Err(ApplicationError::InvalidToken);
                }
            };

        let link = self
            .content_client
            .resolve_preview(&reference, &document_id)
            .await?;

        match PreviewState::Pending.settle(link) {
            PreviewState::Resolved { url } => {
                self.preview_sessions
                    .enter(PreviewSession::new(cmd.session_id.clone(), reference));
                tracing::info!(
                    session_id = %cmd.session_id,
                    document_id = %document_id,
                    url = %url,
                    "Preview resolved"
                );
                Ok(ResolvePreviewResponse { url })
            }
            PreviewState::Rejected | PreviewState::Pending => {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    document_id = %document_id,
                    "Preview token rejected"
                );
                Err(ApplicationError::InvalidToken)
            }
        }
    }
}

/// ExitPreview Handler
pub struct ExitPreviewHandler {
    preview_sessions: Arc<dyn PreviewSessionPort>,
}

impl ExitPreviewHandler {
    pub fn new(preview_sessions: Arc<dyn PreviewSessionPort>) -> Self {
        Self { preview_sessions }
    }

    pub fn handle(&self, cmd: ExitPreviewCommand) -> ExitPreviewResponse {
        ExitPreviewResponse {
            was_active: self.preview_sessions.exit(&cmd.session_id),
        }
    }
}
