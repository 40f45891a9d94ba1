//! 链接解析
//!
//! 文档类型到站内路由的全函数映射：每一种类型都会得到某个路由，
//! 无法识别的类型回落到站点根路径。

use serde::{Deserialize, Serialize};

/// 回落路由
pub const DEFAULT_ROUTE: &str = "/";

/// 文章文档类型
pub const POSTS_TYPE: &str = "posts";

/// 文档类型（封闭集合）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentType {
    Posts,
    Other(String),
}

impl DocumentType {
    pub fn parse(doc_type: &str) -> Self {
        match doc_type {
            POSTS_TYPE => Self::Posts,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Posts => POSTS_TYPE,
            Self::Other(other) => other,
        }
    }
}

/// 链接解析所需的最小文档视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default, rename = "type")]
    pub doc_type: Option<String>,
}

impl DocumentLink {
    pub fn document_type(&self) -> Option<DocumentType> {
        self.doc_type.as_deref().map(DocumentType::parse)
    }
}

/// 解析文档对应的站内路由
pub fn resolve_link(link: &DocumentLink) -> String {
    match (link.document_type(), link.uid.as_deref()) {
        (Some(DocumentType::Posts), Some(uid)) if !uid.trim().is_empty() => {
            format!("/post/{}", uid)
        }
        _ => DEFAULT_ROUTE.to_string(),
    }
}
