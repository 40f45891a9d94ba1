//! Neighbor Queries

use crate::domain::article::{DocumentId, PreviewRef};

/// 获取按发布时间相邻的两篇文章
#[derive(Debug, Clone)]
pub struct GetNeighbors {
    pub document_id: DocumentId,
    pub preview_ref: Option<PreviewRef>,
}
