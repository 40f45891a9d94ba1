//! Preview Session Port - 访客预览状态
//!
//! 保存访客会话与预览 ref 的关联，渲染层据此决定是否展示"退出预览"

use chrono::{DateTime, Utc};

use crate::domain::article::PreviewRef;

/// 预览会话
#[derive(Debug, Clone)]
pub struct PreviewSession {
    pub id: String,
    pub reference: PreviewRef,
    pub started_at: DateTime<Utc>,
}

impl PreviewSession {
    pub fn new(id: impl Into<String>, reference: PreviewRef) -> Self {
        Self {
            id: id.into(),
            reference,
            started_at: Utc::now(),
        }
    }
}

/// Preview Session Port
pub trait PreviewSessionPort: Send + Sync {
    /// 进入预览（覆盖已有状态）
    fn enter(&self, session: PreviewSession);

    /// 退出预览；返回此前是否处于预览
    fn exit(&self, session_id: &str) -> bool;

    /// 当前预览 ref
    fn current(&self, session_id: &str) -> Option<PreviewRef>;

    /// 清理超过 max_age_secs 的会话，返回清理数量
    fn purge_expired(&self, max_age_secs: u64) -> usize;
}
