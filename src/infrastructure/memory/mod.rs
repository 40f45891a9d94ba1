//! Memory Layer - In-Memory State Management
//!
//! 实现 PreviewSessionManager，保存访客的预览状态

mod preview_session_manager;

pub use preview_session_manager::InMemoryPreviewSessionManager;
