//! HTTP Content Client - 调用 Prismic 风格的内容仓库 REST API
//!
//! 实现 ContentClientPort trait
//!
//! 外部 API:
//! GET {api_url}                      -> { refs: [{ ref, isMasterRef }] }
//! GET {api_url}/documents/search     -> { results: [...], next_page: "..." | null }
//!     query: ref, q, pageSize, orderings, after, fetch, access_token
//!
//! 每次调用都重新读取主版本 ref，本地不缓存任何状态。

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{ContentClientPort, ContentError, Predicate, QueryOptions};
use crate::domain::article::{Cursor, DocumentId, PreviewRef, RawDocument, RawPage, Uid};
use crate::domain::DocumentLink;

/// API 根信息
#[derive(Debug, Deserialize)]
struct ApiInfo {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(default, rename = "isMasterRef")]
    is_master_ref: bool,
}

/// HTTP Content Client 配置
#[derive(Debug, Clone)]
pub struct HttpContentClientConfig {
    /// API 入口，如 `https://spacetraveling.cdn.prismic.io/api/v2`
    pub api_url: String,
    /// 私有仓库的访问 token
    pub access_token: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpContentClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api/v2".to_string(),
            access_token: None,
            timeout_secs: 10,
        }
    }
}

impl HttpContentClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|t| !t.is_empty());
        self
    }
}

/// HTTP Content Client
pub struct HttpContentClient {
    client: Client,
    config: HttpContentClientConfig,
}

impl HttpContentClient {
    /// 创建新的 HTTP 内容客户端
    pub fn new(config: HttpContentClientConfig) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ContentError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取搜索 URL
    fn search_url(&self) -> String {
        format!("{}/documents/search", self.config.api_url)
    }

    fn with_token(&self, mut params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        if let Some(token) = &self.config.access_token {
            params.push(("access_token", token.clone()));
        }
        params
    }

    async fn get(&self, url: &str, params: &[(&'static str, String)]) -> Result<Response, ContentError> {
        tracing::debug!(url = %url, "Sending content store request");
        self.client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(map_send_error)
    }

    /// 读取主版本 ref
    async fn master_ref(&self) -> Result<String, ContentError> {
        let response = self.get(&self.config.api_url, &self.with_token(Vec::new())).await?;
        let info: ApiInfo = read_json(response).await?;
        info.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or_else(|| ContentError::InvalidResponse("API has no master ref".to_string()))
    }

    async fn reference_for(&self, options: &QueryOptions) -> Result<String, ContentError> {
        match &options.reference {
            Some(reference) => Ok(reference.as_str().to_string()),
            None => self.master_ref().await,
        }
    }

    async fn search(&self, params: Vec<(&'static str, String)>) -> Result<RawPage, ContentError> {
        let response = self.get(&self.search_url(), &self.with_token(params)).await?;
        let page: RawPage = read_json(response).await?;

        tracing::info!(
            results = page.results.len(),
            has_next = page.next_page.is_some(),
            "Content store search completed"
        );
        Ok(page)
    }
}

#[async_trait]
impl ContentClientPort for HttpContentClient {
    async fn query(
        &self,
        predicates: &[Predicate],
        options: &QueryOptions,
    ) -> Result<RawPage, ContentError> {
        let reference = self.reference_for(options).await?;
        self.search(search_params(&reference, predicates, options)).await
    }

    async fn next_page(&self, cursor: &Cursor) -> Result<RawPage, ContentError> {
        check_cursor_origin(&self.config.api_url, cursor.as_str())?;

        let response = self.get(cursor.as_str(), &[]).await?;
        read_json(response).await
    }

    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &Uid,
        options: &QueryOptions,
    ) -> Result<Option<RawDocument>, ContentError> {
        let reference = self.reference_for(options).await?;
        let predicates = [Predicate::at(format!("my.{}.uid", doc_type), uid.as_str())];
        let options = options.clone().with_page_size(1);

        let page = self.search(search_params(&reference, &predicates, &options)).await?;
        Ok(page.results.into_iter().next())
    }

    async fn resolve_preview(
        &self,
        reference: &PreviewRef,
        document_id: &DocumentId,
    ) -> Result<Option<DocumentLink>, ContentError> {
        let predicates = [Predicate::at("document.id", document_id.as_str())];
        let options = QueryOptions::new().with_page_size(1);
        let params = self.with_token(search_params(reference.as_str(), &predicates, &options));

        let response = self.get(&self.search_url(), &params).await?;
        let status = response.status();

        // 过期或伪造的 ref 会被仓库以 4xx 拒绝
        if status.is_client_error() {
            tracing::info!(status = %status, "Preview ref rejected by content store");
            return Ok(None);
        }

        let page: RawPage = read_json(response).await?;
        let link = page
            .results
            .first()
            .map(RawDocument::link)
            .unwrap_or_else(|| DocumentLink {
                id: document_id.to_string(),
                uid: None,
                doc_type: None,
            });
        Ok(Some(link))
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(&self.config.api_url)
            .query(&self.with_token(Vec::new()))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// 构造搜索参数
fn search_params(
    reference: &str,
    predicates: &[Predicate],
    options: &QueryOptions,
) -> Vec<(&'static str, String)> {
    let q: String = predicates.iter().map(Predicate::to_query).collect();
    let mut params = vec![("ref", reference.to_string()), ("q", format!("[{}]", q))];

    if let Some(page_size) = options.page_size {
        params.push(("pageSize", page_size.to_string()));
    }
    // 仓库的 after 取排序中锚点之后的文档；端口约定为锚点之前，带锚点时反转方向
    if let Some(ordering) = &options.ordering {
        let ordering = if options.after.is_some() {
            ordering.reversed()
        } else {
            ordering.clone()
        };
        params.push(("orderings", ordering.to_query()));
    }
    if let Some(after) = &options.after {
        params.push(("after", after.to_string()));
    }
    if !options.fetch.is_empty() {
        params.push(("fetch", options.fetch.join(",")));
    }
    params
}

/// 游标必须指向配置的仓库
fn check_cursor_origin(api_url: &str, cursor: &str) -> Result<(), ContentError> {
    let api = Url::parse(api_url)
        .map_err(|e| ContentError::InvalidCursor(format!("invalid api url: {}", e)))?;
    let target = Url::parse(cursor)
        .map_err(|e| ContentError::InvalidCursor(format!("cursor is not a url: {}", e)))?;

    if api.origin() != target.origin() {
        return Err(ContentError::InvalidCursor(format!(
            "cursor points outside the content store: {}",
            target.origin().ascii_serialization()
        )));
    }
    Ok(())
}

fn map_send_error(e: reqwest::Error) -> ContentError {
    if e.is_timeout() {
        ContentError::Timeout
    } else if e.is_connect() {
        ContentError::NetworkError(format!("Cannot connect to content store: {}", e))
    } else {
        ContentError::NetworkError(e.to_string())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ContentError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(ContentError::ServiceError(format!(
            "HTTP {}: {}",
            status, error_text
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ContentError::InvalidResponse(format!("Failed to decode response: {}", e)))
}
