//! Preview Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::ports::PreviewSessionPort;
use crate::application::queries::GetPreviewStatus;
use crate::domain::article::PreviewRef;

/// 预览状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewStatus {
    pub active: bool,
    pub reference: Option<PreviewRef>,
}

/// GetPreviewStatus Handler
pub struct GetPreviewStatusHandler {
    preview_sessions: Arc<dyn PreviewSessionPort>,
}

impl GetPreviewStatusHandler {
    pub fn new(preview_sessions: Arc<dyn PreviewSessionPort>) -> Self {
        Self { preview_sessions }
    }

    pub fn handle(&self, query: GetPreviewStatus) -> PreviewStatus {
        let reference = self.preview_sessions.current(&query.session_id);
        PreviewStatus {
            active: reference.is_some(),
            reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::PreviewSession;
    use crate::infrastructure::memory::InMemoryPreviewSessionManager;

    #[test]
    fn test_preview_status() {
        let sessions = InMemoryPreviewSessionManager::new().arc();
        let handler = GetPreviewStatusHandler::new(sessions.clone());

        let status = handler.handle(GetPreviewStatus {
            session_id: "visitor".to_string(),
        });
        assert!(!status.active);

        sessions.enter(PreviewSession::new("visitor", PreviewRef::new("ref-a").unwrap()));
        let status = handler.handle(GetPreviewStatus {
            session_id: "visitor".to_string(),
        });
        assert!(status.active);
        assert_eq!(status.reference.map(|r| r.as_str().to_string()), Some("ref-a".to_string()));
    }
}
