//! Article Context - 文章限界上下文
//!
//! 职责:
//! - 原始文档校验与组装
//! - 文章 / 摘要 / 列表页模型
//! - 客户端列表合并策略

pub mod assembler;
mod entities;
mod errors;
mod feed;
mod raw;
mod value_objects;

pub use assembler::{assemble, assemble_summary, estimate_read_time, WORDS_PER_MINUTE};
pub use entities::{Article, ArticleSummary, ContentBlock, FeedPage, NeighborPair};
pub use errors::ArticleError;
pub use feed::FeedView;
pub use raw::{RawDocument, RawPage};
pub use value_objects::{Cursor, DocumentId, PreviewRef, Uid};
