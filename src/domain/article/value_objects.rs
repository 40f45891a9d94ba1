//! Article Context - Value Objects
//!
//! 所有标识都是不透明字符串，本地从不解析其内容

use serde::{Deserialize, Serialize};

use super::ArticleError;

/// 文档唯一标识（内容仓库分配，跨版本稳定）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Result<Self, ArticleError> {
        non_blank(id.into(), "document id").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 文章 UID（slug），同一时刻唯一对应一篇文章
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    pub fn new(uid: impl Into<String>) -> Result<Self, ArticleError> {
        non_blank(uid.into(), "uid").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 分页游标
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(cursor: impl Into<String>) -> Result<Self, ArticleError> {
        non_blank(cursor.into(), "cursor").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 预览 ref（内容仓库签发的签名引用）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewRef(String);

impl PreviewRef {
    pub fn new(reference: impl Into<String>) -> Result<Self, ArticleError> {
        non_blank(reference.into(), "preview ref").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn non_blank(value: String, what: &'static str) -> Result<String, ArticleError> {
    if value.trim().is_empty() {
        return Err(ArticleError::InvalidIdentifier(format!("{} cannot be empty", what)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_rejected() {
        assert!(DocumentId::new("").is_err());
        assert!(Uid::new("   ").is_err());
        assert!(Cursor::new("\n").is_err());
        assert!(PreviewRef::new("").is_err());
    }

    #[test]
    fn test_value_kept_verbatim() {
        let cursor = Cursor::new("https://repo.cdn.prismic.io/api/v2/documents/search?page=2").unwrap();
        assert_eq!(
            cursor.as_str(),
            "https://repo.cdn.prismic.io/api/v2/documents/search?page=2"
        );
        assert_eq!(Uid::new("como-utilizar-hooks").unwrap().to_string(), "como-utilizar-hooks");
    }

    #[test]
    fn test_serde_transparent() {
        let id = DocumentId::new("YV9bXhEAACMAq2Hk").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"YV9bXhEAACMAq2Hk\"");
    }
}
