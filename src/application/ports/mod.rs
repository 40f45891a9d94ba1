//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod content_client;
mod preview_session;

pub use content_client::{
    ContentClientPort, ContentError, Ordering, Predicate, QueryOptions, SortDirection,
    FIRST_PUBLICATION_DATE,
};
pub use preview_session::{PreviewSession, PreviewSessionPort};
