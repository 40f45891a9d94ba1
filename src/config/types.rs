//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 内容仓库配置
    #[serde(default)]
    pub content: ContentConfig,

    /// 预览配置
    #[serde(default)]
    pub preview: PreviewConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 内容仓库配置
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// 仓库 API 入口
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// 私有仓库的访问 token
    #[serde(default)]
    pub access_token: Option<String>,

    /// 请求超时时间（秒）
    #[serde(default = "default_content_timeout")]
    pub timeout_secs: u64,

    /// 使用内置的离线样例仓库
    #[serde(default)]
    pub fake: bool,

    /// 首页每页文章数
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

fn default_api_url() -> String {
    "https://spacetraveling.cdn.prismic.io/api/v2".to_string()
}

fn default_content_timeout() -> u64 {
    10
}

fn default_page_size() -> u32 {
    2
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            access_token: None,
            timeout_secs: default_content_timeout(),
            fake: false,
            default_page_size: default_page_size(),
        }
    }
}

/// 预览配置
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    /// 保存访客会话 id 的 cookie 名
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// 预览会话有效期（秒）
    #[serde(default = "default_cookie_max_age")]
    pub cookie_max_age_secs: u64,

    /// 过期会话清理间隔（秒）
    #[serde(default = "default_purge_interval")]
    pub purge_interval_secs: u64,
}

fn default_cookie_name() -> String {
    "spacetraveling_preview".to_string()
}

fn default_cookie_max_age() -> u64 {
    3600 // 1 小时
}

fn default_purge_interval() -> u64 {
    300
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_max_age_secs: default_cookie_max_age(),
            purge_interval_secs: default_purge_interval(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
