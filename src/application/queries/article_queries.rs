//! Article Queries

use crate::domain::article::{PreviewRef, Uid};

/// 按 uid 获取文章
#[derive(Debug, Clone)]
pub struct GetArticle {
    pub uid: Uid,
    /// 预览 ref；None 读取已发布版本
    pub preview_ref: Option<PreviewRef>,
}

/// 获取文章页：文章 + 相邻文章 + 预览标记
#[derive(Debug, Clone)]
pub struct GetArticlePage {
    pub uid: Uid,
    pub preview_ref: Option<PreviewRef>,
}
