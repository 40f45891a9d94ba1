//! Spacetraveling - 博客内容服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Article: 文章组装、阅读时长、首页分页视图
//! - Rich Text: 富文本的纯文本 / HTML 投影
//! - Link Resolver: 文档 -> 站内路由
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ContentClient, PreviewSession）
//! - Commands: 预览进入 / 退出
//! - Queries: 首页分页、文章、相邻文章、预览状态
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 预览会话内存实现
//! - Adapters: 内容仓库 HTTP 客户端与离线样例仓库

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
