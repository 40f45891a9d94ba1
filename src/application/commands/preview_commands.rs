//! Preview Commands - 预览相关命令

/// 解析预览 token 并进入预览
#[derive(Debug, Clone)]
pub struct ResolvePreviewCommand {
    /// 预览 token（即仓库的 ref）
    pub token: String,
    pub document_id: String,
    /// 访客会话 id，成功后写入预览标记
    pub session_id: String,
}

/// 解析成功：跳转地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvePreviewResponse {
    pub url: String,
}

/// 退出预览
#[derive(Debug, Clone)]
pub struct ExitPreviewCommand {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitPreviewResponse {
    /// 退出前是否处于预览
    pub was_active: bool,
}
