//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：预览会话的进入与退出

mod preview_commands;

pub mod handlers;

pub use preview_commands::*;
