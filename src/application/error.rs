//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::ContentError;
use crate::domain::article::ArticleError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 文档结构不符（不可重试）
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// 内容仓库暂不可用（可由调用方重试）
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// 预览 token 被拒绝
    #[error("Invalid token")]
    InvalidToken,

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 是否值得调用方重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }
}

impl From<ContentError> for ApplicationError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NetworkError(_) | ContentError::Timeout | ContentError::ServiceError(_) => {
                Self::UpstreamUnavailable(err.to_string())
            }
            ContentError::InvalidResponse(msg) => Self::MalformedDocument(msg),
            ContentError::InvalidCursor(msg) => Self::ValidationError(msg),
        }
    }
}

impl From<ArticleError> for ApplicationError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::MalformedDocument(msg) => Self::MalformedDocument(msg),
            ArticleError::InvalidIdentifier(msg) => Self::ValidationError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors_are_upstream_unavailable() {
        let err: ApplicationError = ContentError::Timeout.into();
        assert!(err.is_retryable());

        let err: ApplicationError = ContentError::ServiceError("HTTP 503".to_string()).into();
        assert!(matches!(err, ApplicationError::UpstreamUnavailable(_)));
    }

    #[test]
    fn test_invalid_response_is_malformed() {
        let err: ApplicationError = ContentError::InvalidResponse("bad json".to_string()).into();
        assert!(matches!(err, ApplicationError::MalformedDocument(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_article_errors_mapped() {
        let err: ApplicationError = ArticleError::InvalidIdentifier("uid".to_string()).into();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }
}
