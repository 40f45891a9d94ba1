//! 内容仓库返回的原始文档
//!
//! 边界形状，不做任何结构假设；由 assembler 校验后转换为领域模型

use serde::{Deserialize, Serialize};

use crate::domain::link_resolver::DocumentLink;

/// 原始文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,

    #[serde(default)]
    pub uid: Option<String>,

    #[serde(rename = "type")]
    pub doc_type: String,

    /// 形如 `2021-03-25T19:25:28+0000`
    #[serde(default)]
    pub first_publication_date: Option<String>,

    #[serde(default)]
    pub data: serde_json::Value,
}

impl RawDocument {
    pub fn link(&self) -> DocumentLink {
        DocumentLink {
            id: self.id.clone(),
            uid: self.uid.clone(),
            doc_type: Some(self.doc_type.clone()),
        }
    }
}

/// 原始分页结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    pub results: Vec<RawDocument>,

    /// 下一页的不透明游标
    #[serde(default)]
    pub next_page: Option<String>,
}
