//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::application::MAX_PAGE_SIZE;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "SPACETRAVELING";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SPACETRAVELING_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SPACETRAVELING_SERVER__PORT=8080`
/// - `SPACETRAVELING_CONTENT__API_URL=https://myrepo.cdn.prismic.io/api/v2`
/// - `SPACETRAVELING_CONTENT__ACCESS_TOKEN=...`
/// - `SPACETRAVELING_CONTENT__FAKE=true`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("content.api_url", "https://spacetraveling.cdn.prismic.io/api/v2")?
        .set_default("content.timeout_secs", 10)?
        .set_default("content.fake", false)?
        .set_default("content.default_page_size", 2)?
        .set_default("preview.cookie_name", "spacetraveling_preview")?
        .set_default("preview.cookie_max_age_secs", 3600)?
        .set_default("preview.purge_interval_secs", 300)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if !config.content.fake && config.content.api_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Content API URL cannot be empty".to_string(),
        ));
    }

    if !(1..=MAX_PAGE_SIZE).contains(&config.content.default_page_size) {
        return Err(ConfigError::ValidationError(format!(
            "Default page size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    if config.preview.cookie_name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Preview cookie name cannot be empty".to_string(),
        ));
    }

    if config.preview.purge_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Preview purge interval cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    if config.content.fake {
        tracing::info!("Content Store: built-in sample posts (offline)");
    } else {
        tracing::info!("Content Store: {}", config.content.api_url);
        tracing::info!("Content Timeout: {}s", config.content.timeout_secs);
        tracing::info!(
            "Access Token: {}",
            if config.content.access_token.is_some() { "set" } else { "none" }
        );
    }
    tracing::info!("Feed Page Size: {}", config.content.default_page_size);
    tracing::info!("Preview Cookie: {}", config.preview.cookie_name);
    tracing::info!("Preview Max Age: {}s", config.preview.cookie_max_age_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_api_url() {
        let mut config = AppConfig::default();
        config.content.api_url = String::new();
        assert!(validate_config(&config).is_err());

        // 离线模式不需要仓库地址
        config.content.fake = true;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_page_size() {
        let mut config = AppConfig::default();
        config.content.default_page_size = 0;
        assert!(validate_config(&config).is_err());

        config.content.default_page_size = MAX_PAGE_SIZE + 1;
        assert!(validate_config(&config).is_err());

        config.content.default_page_size = MAX_PAGE_SIZE;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[content]
api_url = "https://myblog.cdn.prismic.io/api/v2"
fake = true
default_page_size = 5

[preview]
cookie_name = "blog_preview"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.content.api_url, "https://myblog.cdn.prismic.io/api/v2");
        assert!(config.content.fake);
        assert_eq!(config.content.default_page_size, 5);
        assert_eq!(config.content.timeout_secs, 10);
        assert_eq!(config.preview.cookie_name, "blog_preview");
        assert_eq!(config.preview.cookie_max_age_secs, 3600);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[content]\ndefault_page_size = 0").unwrap();

        let err = load_config_from_path(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
