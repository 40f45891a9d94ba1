//! Prismic Adapter - 内容仓库客户端实现

mod fake_content_client;
mod http_content_client;

pub use fake_content_client::{FakeContentClient, FakeContentClientConfig};
pub use http_content_client::{HttpContentClient, HttpContentClientConfig};
