//! Fake Content Client - 内存内容仓库
//!
//! 用于测试与离线运行，不访问网络。
//! 实现与 HTTP 客户端相同的契约：谓词过滤、排序、after 锚点、字段裁剪、
//! 不透明游标与预览 ref。

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::json;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock};

use crate::application::ports::{
    ContentClientPort, ContentError, Predicate, QueryOptions, SortDirection,
    FIRST_PUBLICATION_DATE,
};
use crate::domain::article::assembler::parse_publication_date;
use crate::domain::article::{Cursor, DocumentId, PreviewRef, RawDocument, RawPage, Uid};
use crate::domain::DocumentLink;

/// 仓库默认每页数量
const DEFAULT_PAGE_SIZE: u32 = 20;

type FailureRule = Arc<dyn Fn(&QueryOptions) -> bool + Send + Sync>;

/// Fake Content Client 配置
#[derive(Debug, Clone)]
pub struct FakeContentClientConfig {
    /// 主版本 ref
    pub master_ref: String,
}

impl Default for FakeContentClientConfig {
    fn default() -> Self {
        Self {
            master_ref: "master".to_string(),
        }
    }
}

/// 游标对应的查询上下文
///
/// 游标由查询内容与页码决定，相同查询复用同一条记录
#[derive(Debug, Clone)]
struct PageState {
    predicates: Vec<Predicate>,
    options: QueryOptions,
    page: usize,
}

/// Fake Content Client
pub struct FakeContentClient {
    config: FakeContentClientConfig,
    documents: Vec<RawDocument>,
    /// 预览 ref -> 草稿文档（覆盖同 id 的已发布文档）
    previews: HashMap<String, Vec<RawDocument>>,
    cursors: DashMap<String, PageState>,
    failure_rule: RwLock<Option<FailureRule>>,
    requests: AtomicUsize,
}

impl FakeContentClient {
    pub fn new(config: FakeContentClientConfig) -> Self {
        tracing::info!(master_ref = %config.master_ref, "FakeContentClient initialized");
        Self {
            config,
            documents: Vec::new(),
            previews: HashMap::new(),
            cursors: DashMap::new(),
            failure_rule: RwLock::new(None),
            requests: AtomicUsize::new(0),
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeContentClientConfig::default())
    }

    /// 添加已发布文档
    pub fn with_document(mut self, document: RawDocument) -> Self {
        self.documents.push(document);
        self
    }

    /// 注册预览 ref 及其草稿文档
    pub fn with_preview(mut self, reference: impl Into<String>, drafts: Vec<RawDocument>) -> Self {
        self.previews.insert(reference.into(), drafts);
        self
    }

    /// 内置示例文章（离线模式）
    pub fn with_sample_posts(self) -> Self {
        sample_posts()
            .into_iter()
            .fold(self, |client, doc| client.with_document(doc))
    }

    /// 满足条件的查询返回网络错误
    pub fn fail_when(&self, rule: impl Fn(&QueryOptions) -> bool + Send + Sync + 'static) {
        if let Ok(mut slot) = self.failure_rule.write() {
            *slot = Some(Arc::new(rule));
        }
    }

    /// 已处理的请求数
    pub fn request_count(&self) -> usize {
        self.requests.load(AtomicOrdering::SeqCst)
    }

    fn begin_request(&self) {
        self.requests.fetch_add(1, AtomicOrdering::SeqCst);
    }

    fn should_fail(&self, options: &QueryOptions) -> bool {
        self.failure_rule
            .read()
            .ok()
            .and_then(|slot| slot.clone())
            .map_or(false, |rule| rule(options))
    }

    fn is_known_ref(&self, reference: &str) -> bool {
        reference == self.config.master_ref || self.previews.contains_key(reference)
    }

    /// 指定 ref 下可见的文档集合
    fn documents_for(&self, reference: Option<&PreviewRef>) -> Result<Vec<RawDocument>, ContentError> {
        let reference = match reference {
            None => return Ok(self.documents.clone()),
            Some(r) if r.as_str() == self.config.master_ref => return Ok(self.documents.clone()),
            Some(r) => r.as_str(),
        };

        let drafts = self
            .previews
            .get(reference)
            .ok_or_else(|| ContentError::ServiceError(format!("HTTP 404: Ref not found: {}", reference)))?;

        let mut merged: Vec<RawDocument> = self
            .documents
            .iter()
            .filter(|doc| !drafts.iter().any(|d| d.id == doc.id))
            .cloned()
            .collect();
        merged.extend(drafts.iter().cloned());
        Ok(merged)
    }

    fn run_query(
        &self,
        predicates: &[Predicate],
        options: &QueryOptions,
        page: usize,
    ) -> Result<RawPage, ContentError> {
        if self.should_fail(options) {
            return Err(ContentError::NetworkError("simulated failure".to_string()));
        }

        let mut matched = Vec::new();
        for doc in self.documents_for(options.reference.as_ref())? {
            if matches_all(&doc, predicates)? {
                matched.push(doc);
            }
        }

        if let Some(ordering) = &options.ordering {
            if ordering.field != FIRST_PUBLICATION_DATE {
                return Err(ContentError::ServiceError(format!(
                    "unsupported ordering: {}",
                    ordering.field
                )));
            }
            // 未发布文档不参与按发布时间的排序
            let mut dated: Vec<_> = matched
                .into_iter()
                .filter_map(|doc| {
                    let date = doc
                        .first_publication_date
                        .as_deref()
                        .and_then(|d| parse_publication_date(d).ok())?;
                    Some((date, doc))
                })
                .collect();
            dated.sort_by(|(a_date, a), (b_date, b)| {
                let ord = a_date.cmp(b_date).then_with(|| a.id.cmp(&b.id));
                match ordering.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
            matched = dated.into_iter().map(|(_, doc)| doc).collect();
        }

        if let Some(anchor) = &options.after {
            matched = match matched.iter().position(|doc| doc.id == anchor.as_str()) {
                Some(index) => matched[..index].iter().rev().cloned().collect(),
                None => Vec::new(),
            };
        }

        if !options.fetch.is_empty() {
            for doc in &mut matched {
                project_fields(doc, &options.fetch);
            }
        }

        let page_size = options.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1) as usize;
        let start = (page - 1).saturating_mul(page_size);
        let results: Vec<RawDocument> = matched.iter().skip(start).take(page_size).cloned().collect();

        let next_page = if start + page_size < matched.len() {
            let cursor = cursor_key(predicates, options, page + 1);
            self.cursors
                .entry(cursor.clone())
                .or_insert_with(|| PageState {
                    predicates: predicates.to_vec(),
                    options: options.clone(),
                    page: page + 1,
                });
            Some(cursor)
        } else {
            None
        };

        Ok(RawPage { results, next_page })
    }
}

#[async_trait]
impl ContentClientPort for FakeContentClient {
    async fn query(
        &self,
        predicates: &[Predicate],
        options: &QueryOptions,
    ) -> Result<RawPage, ContentError> {
        self.begin_request();
        tracing::debug!(predicates = predicates.len(), "FakeContentClient: query");
        self.run_query(predicates, options, 1)
    }

    async fn next_page(&self, cursor: &Cursor) -> Result<RawPage, ContentError> {
        self.begin_request();
        let state = self
            .cursors
            .get(cursor.as_str())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ContentError::InvalidCursor(format!("unknown cursor: {}", cursor.as_str())))?;
        self.run_query(&state.predicates, &state.options, state.page)
    }

    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &Uid,
        options: &QueryOptions,
    ) -> Result<Option<RawDocument>, ContentError> {
        self.begin_request();
        let predicates = [Predicate::at(format!("my.{}.uid", doc_type), uid.as_str())];
        let page = self.run_query(&predicates, &options.clone().with_page_size(1), 1)?;
        Ok(page.results.into_iter().next())
    }

    async fn resolve_preview(
        &self,
        reference: &PreviewRef,
        document_id: &DocumentId,
    ) -> Result<Option<DocumentLink>, ContentError> {
        self.begin_request();
        if !self.is_known_ref(reference.as_str()) {
            tracing::debug!("FakeContentClient: unknown preview ref");
            return Ok(None);
        }

        let documents = self.documents_for(Some(reference))?;
        let link = documents
            .iter()
            .find(|doc| doc.id == document_id.as_str())
            .map(RawDocument::link)
            .unwrap_or_else(|| DocumentLink {
                id: document_id.to_string(),
                uid: None,
                doc_type: None,
            });
        Ok(Some(link))
    }
}

fn cursor_key(predicates: &[Predicate], options: &QueryOptions, page: usize) -> String {
    let mut hasher = DefaultHasher::new();
    predicates.hash(&mut hasher);
    options.hash(&mut hasher);
    format!("fake-cursor-{:016x}-{}", hasher.finish(), page)
}

fn matches_all(doc: &RawDocument, predicates: &[Predicate]) -> Result<bool, ContentError> {
    for predicate in predicates {
        let Predicate::At { path, value } = predicate;
        let matched = match path.as_str() {
            "document.type" => doc.doc_type == *value,
            "document.id" => doc.id == *value,
            other => match other
                .strip_prefix("my.")
                .and_then(|rest| rest.strip_suffix(".uid"))
            {
                Some(doc_type) => doc.doc_type == doc_type && doc.uid.as_deref() == Some(value.as_str()),
                None => {
                    return Err(ContentError::ServiceError(format!(
                        "unsupported predicate path: {}",
                        other
                    )))
                }
            },
        };
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

/// 只保留 `type.field` 形式列出的字段
fn project_fields(doc: &mut RawDocument, fetch: &[String]) {
    let prefix = format!("{}.", doc.doc_type);
    let keep: Vec<&str> = fetch.iter().filter_map(|f| f.strip_prefix(&prefix)).collect();

    if let Some(data) = doc.data.as_object_mut() {
        data.retain(|key, _| keep.contains(&key.as_str()));
    }
}

fn sample_post(id: &str, uid: &str, date: &str, title: &str, subtitle: &str, author: &str) -> RawDocument {
    RawDocument {
        id: id.to_string(),
        uid: Some(uid.to_string()),
        doc_type: "posts".to_string(),
        first_publication_date: Some(date.to_string()),
        data: json!({
            "title": title,
            "subtitle": subtitle,
            "author": author,
            "banner": { "url": "https://images.prismic.io/spacetraveling/banner.png" },
            "content": [{
                "heading": "Proin et varius",
                "body": [{
                    "type": "paragraph",
                    "text": "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
                    "spans": [{ "start": 0, "end": 11, "type": "strong" }]
                }]
            }]
        }),
    }
}

fn sample_posts() -> Vec<RawDocument> {
    vec![
        sample_post(
            "YFzqWBIAACQAbM8y",
            "como-utilizar-hooks",
            "2021-03-15T19:25:28+0000",
            "Como utilizar Hooks",
            "Pensando em sincronização em vez de ciclos de vida",
            "Joseph Oliveira",
        ),
        sample_post(
            "YFzrABIAACUAbNFq",
            "criando-um-app-cra-do-zero",
            "2021-03-25T19:27:35+0000",
            "Criando um app CRA do zero",
            "Tudo sobre como criar a sua primeira aplicação utilizando Create React App",
            "Danilo Vieira",
        ),
        sample_post(
            "YG3k8hIAACQAcE0P",
            "mapas-com-react-usando-leaflet",
            "2021-04-07T14:02:11+0000",
            "Mapas com React usando Leaflet",
            "Como exibir mapas interativos em uma aplicação React",
            "Diego Fernandes",
        ),
    ]
}
