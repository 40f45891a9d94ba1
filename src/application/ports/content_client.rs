//! Content Client Port - 内容仓库抽象
//!
//! 定义查询远程内容仓库的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::article::{Cursor, DocumentId, PreviewRef, RawDocument, RawPage, Uid};
use crate::domain::DocumentLink;

/// 发布时间字段
pub const FIRST_PUBLICATION_DATE: &str = "document.first_publication_date";

/// 内容仓库错误
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),
}

/// 查询谓词
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// 字段等于给定值
    At { path: String, value: String },
}

impl Predicate {
    pub fn at(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::At {
            path: path.into(),
            value: value.into(),
        }
    }

    /// `document.type == doc_type`
    pub fn document_type(doc_type: &str) -> Self {
        Self::at("document.type", doc_type)
    }

    /// 仓库查询语法，如 `[at(document.type, "posts")]`
    ///
    /// 值按 JSON 字符串字面量转义
    pub fn to_query(&self) -> String {
        match self {
            Self::At { path, value } => {
                format!("[at({}, {})]", path, serde_json::Value::from(value.as_str()))
            }
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// 排序规则
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ordering {
    pub field: String,
    pub direction: SortDirection,
}

impl Ordering {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// 同一字段，方向相反
    pub fn reversed(&self) -> Self {
        let direction = match self.direction {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        };
        Self {
            field: self.field.clone(),
            direction,
        }
    }

    /// 仓库查询语法，如 `[document.first_publication_date desc]`
    pub fn to_query(&self) -> String {
        match self.direction {
            SortDirection::Ascending => format!("[{}]", self.field),
            SortDirection::Descending => format!("[{} desc]", self.field),
        }
    }
}

/// 查询选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryOptions {
    pub page_size: Option<u32>,
    pub ordering: Option<Ordering>,
    /// 以该文档为锚点的游标
    ///
    /// 返回按 `ordering` 排列时位于锚点之前的文档，离锚点最近者在前：
    /// 升序 + after = 时间上的前一篇，降序 + after = 时间上的后一篇
    pub after: Option<DocumentId>,
    /// 只请求这些字段（如 `posts.title`）
    pub fetch: Vec<String>,
    /// 内容版本；None 表示主版本
    pub reference: Option<PreviewRef>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    pub fn with_after(mut self, document_id: DocumentId) -> Self {
        self.after = Some(document_id);
        self
    }

    pub fn with_fetch(mut self, fields: &[&str]) -> Self {
        self.fetch = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_reference(mut self, reference: Option<PreviewRef>) -> Self {
        self.reference = reference;
        self
    }
}

/// Content Client Port
///
/// 外部内容仓库的抽象接口；游标、ref 均为不透明值
#[async_trait]
pub trait ContentClientPort: Send + Sync {
    /// 按谓词查询一页文档
    async fn query(
        &self,
        predicates: &[Predicate],
        options: &QueryOptions,
    ) -> Result<RawPage, ContentError>;

    /// 获取游标指向的下一页
    async fn next_page(&self, cursor: &Cursor) -> Result<RawPage, ContentError>;

    /// 按 UID 获取单个文档
    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &Uid,
        options: &QueryOptions,
    ) -> Result<Option<RawDocument>, ContentError>;

    /// 校验预览 ref 并取回目标文档
    ///
    /// 仓库拒绝该 ref 时返回 `Ok(None)`；ref 有效但文档不存在时返回不带类型的链接
    async fn resolve_preview(
        &self,
        reference: &PreviewRef,
        document_id: &DocumentId,
    ) -> Result<Option<DocumentLink>, ContentError>;

    /// 检查内容仓库是否可用
    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_query_syntax() {
        assert_eq!(
            Predicate::document_type("posts").to_query(),
            "[at(document.type, \"posts\")]"
        );
    }

    #[test]
    fn test_predicate_value_is_json_escaped() {
        assert_eq!(
            Predicate::at("my.posts.uid", "a\"b\u{1}").to_query(),
            "[at(my.posts.uid, \"a\\\"b\\u0001\")]"
        );
        let query = Predicate::at("my.posts.uid", "tab\there").to_query();
        assert_eq!(query, "[at(my.posts.uid, \"tab\\there\")]");
        assert!(!query.contains("\\u{"));
    }

    #[test]
    fn test_ordering_reversed() {
        let asc = Ordering::asc(FIRST_PUBLICATION_DATE);
        assert_eq!(asc.reversed(), Ordering::desc(FIRST_PUBLICATION_DATE));
        assert_eq!(asc.reversed().reversed(), asc);
    }

    #[test]
    fn test_ordering_query_syntax() {
        assert_eq!(
            Ordering::asc(FIRST_PUBLICATION_DATE).to_query(),
            "[document.first_publication_date]"
        );
        assert_eq!(
            Ordering::desc(FIRST_PUBLICATION_DATE).to_query(),
            "[document.first_publication_date desc]"
        );
    }

    #[test]
    fn test_options_builder() {
        let options = QueryOptions::new()
            .with_page_size(2)
            .with_fetch(&["posts.title", "posts.author"]);
        assert_eq!(options.page_size, Some(2));
        assert_eq!(options.fetch, vec!["posts.title", "posts.author"]);
        assert!(options.reference.is_none());
    }
}
