//! In-Memory Preview Session Manager Implementation

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{PreviewSession, PreviewSessionPort};
use crate::domain::article::PreviewRef;

/// 内存预览会话管理器
pub struct InMemoryPreviewSessionManager {
    sessions: DashMap<String, PreviewSession>,
}

impl InMemoryPreviewSessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for InMemoryPreviewSessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSessionPort for InMemoryPreviewSessionManager {
    fn enter(&self, session: PreviewSession) {
        let session_id = session.id.clone();
        self.sessions.insert(session_id.clone(), session);
        tracing::info!(session_id = %session_id, "Preview session entered");
    }

    fn exit(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            tracing::info!(session_id = %session_id, "Preview session exited");
        }
        removed
    }

    fn current(&self, session_id: &str) -> Option<PreviewRef> {
        self.sessions.get(session_id).map(|s| s.reference.clone())
    }

    fn purge_expired(&self, max_age_secs: u64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(max_age_secs as i64);
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.started_at > cutoff);
        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            tracing::debug!(purged = purged, "Expired preview sessions purged");
        }
        purged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(value: &str) -> PreviewRef {
        PreviewRef::new(value).unwrap()
    }

    #[test]
    fn test_preview_session_lifecycle() {
        let manager = InMemoryPreviewSessionManager::new();
        assert!(manager.current("visitor-1").is_none());

        // Enter
        manager.enter(PreviewSession::new("visitor-1", reference("ref-a")));
        assert_eq!(manager.current("visitor-1"), Some(reference("ref-a")));

        // Re-enter overwrites
        manager.enter(PreviewSession::new("visitor-1", reference("ref-b")));
        assert_eq!(manager.current("visitor-1"), Some(reference("ref-b")));
        assert_eq!(manager.len(), 1);

        // Exit
        assert!(manager.exit("visitor-1"));
        assert!(!manager.exit("visitor-1"));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let manager = InMemoryPreviewSessionManager::new();
        let mut stale = PreviewSession::new("old", reference("ref-a"));
        stale.started_at = Utc::now() - chrono::Duration::seconds(7200);
        manager.enter(stale);
        manager.enter(PreviewSession::new("fresh", reference("ref-b")));

        assert_eq!(manager.purge_expired(3600), 1);
        assert!(manager.current("old").is_none());
        assert!(manager.current("fresh").is_some());
    }
}
