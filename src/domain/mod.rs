//! Domain Layer - 领域层
//!
//! - Article Context: 文章组装、列表模型
//! - rich_text: 富文本投影（纯文本 / HTML）
//! - link_resolver: 文档类型到站内路由的映射

pub mod article;
pub mod link_resolver;
pub mod rich_text;

pub use link_resolver::{resolve_link, DocumentLink, DocumentType};
