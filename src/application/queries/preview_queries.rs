//! Preview Queries

/// 查询访客是否处于预览
#[derive(Debug, Clone)]
pub struct GetPreviewStatus {
    pub session_id: String,
}
