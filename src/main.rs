//! Spacetraveling - 博客内容服务
//!
//! - Domain: article/, rich_text, link_resolver
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, adapters

use std::sync::Arc;
use std::time::Duration;

use spacetraveling::application::{ContentClientPort, PreviewSessionPort};
use spacetraveling::config::{load_config, print_config, AppConfig};
use spacetraveling::infrastructure::adapters::{
    FakeContentClient, HttpContentClient, HttpContentClientConfig,
};
use spacetraveling::infrastructure::http::{AppState, HttpServer, PreviewCookie, ServerConfig};
use spacetraveling::infrastructure::memory::InMemoryPreviewSessionManager;

/// 按配置选择内容仓库适配器
fn build_content_client(config: &AppConfig) -> anyhow::Result<Arc<dyn ContentClientPort>> {
    if config.content.fake {
        tracing::warn!("Using built-in sample posts, no content store will be contacted");
        return Ok(Arc::new(FakeContentClient::with_defaults().with_sample_posts()));
    }

    let client_config = HttpContentClientConfig::new(&config.content.api_url)
        .with_timeout(config.content.timeout_secs)
        .with_access_token(config.content.access_token.clone());
    let client = HttpContentClient::new(client_config)
        .map_err(|e| anyhow::anyhow!("Failed to create content client: {}", e))?;
    Ok(Arc::new(client))
}

/// 定期清理过期的预览会话
fn spawn_session_purge(sessions: Arc<dyn PreviewSessionPort>, interval_secs: u64, max_age_secs: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            ticker.tick().await;
            let purged = sessions.purge_expired(max_age_secs);
            if purged > 0 {
                tracing::info!(purged = purged, "Preview sessions purged");
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},spacetraveling={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Spacetraveling - 博客内容服务");
    print_config(&config);
    if config.log.json {
        tracing::warn!("JSON log output is not supported, using plain text");
    }

    let content_client = build_content_client(&config)?;
    let preview_sessions: Arc<dyn PreviewSessionPort> = InMemoryPreviewSessionManager::new().arc();

    spawn_session_purge(
        preview_sessions.clone(),
        config.preview.purge_interval_secs,
        config.preview.cookie_max_age_secs,
    );

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        content_client,
        preview_sessions,
        PreviewCookie::new(&config.preview.cookie_name, config.preview.cookie_max_age_secs),
        config.content.default_page_size,
    );

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
