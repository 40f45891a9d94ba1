//! 文章组装器
//!
//! 原始文档 -> `Article` / `ArticleSummary`。
//! 纯函数，无副作用；结构不符时返回 `ArticleError::MalformedDocument`。

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    Article, ArticleError, ArticleSummary, ContentBlock, DocumentId, RawDocument, Uid,
};
use crate::domain::link_resolver::POSTS_TYPE;
use crate::domain::rich_text::{self, null_as_default, RichTextElement};

/// 阅读速度（词/分钟）
pub const WORDS_PER_MINUTE: usize = 200;

/// 仓库日期格式（偏移量不带冒号）
const STORE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    subtitle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    author: String,
    #[serde(default)]
    banner: Option<Banner>,
    content: Vec<RawContentBlock>,
}

#[derive(Debug, Deserialize)]
struct SummaryData {
    title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    subtitle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    author: String,
}

#[derive(Debug, Deserialize)]
struct Banner {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawContentBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    heading: String,
    #[serde(default, deserialize_with = "null_as_default")]
    body: Vec<RichTextElement>,
}

/// 组装完整文章
pub fn assemble(raw: &RawDocument) -> Result<Article, ArticleError> {
    let (id, uid, published_at) = identity(raw)?;

    let data: PostData = serde_json::from_value(raw.data.clone()).map_err(|e| {
        ArticleError::MalformedDocument(format!("document {}: {}", raw.id, e))
    })?;
    let title = require_title(raw, data.title)?;

    let content: Vec<ContentBlock> = data.content.into_iter().map(build_block).collect();
    warn_duplicate_headings(raw, &content);
    let estimated_read_time = estimate_read_time(&content);

    Ok(Article {
        id,
        uid,
        published_at,
        title,
        subtitle: data.subtitle,
        author: data.author,
        banner: data.banner.and_then(|b| b.url).filter(|u| !u.is_empty()),
        content,
        estimated_read_time,
    })
}

/// 组装文章摘要（列表查询只请求摘要字段，不含正文）
pub fn assemble_summary(raw: &RawDocument) -> Result<ArticleSummary, ArticleError> {
    let (id, uid, published_at) = identity(raw)?;

    let data: SummaryData = serde_json::from_value(raw.data.clone()).map_err(|e| {
        ArticleError::MalformedDocument(format!("document {}: {}", raw.id, e))
    })?;
    let title = require_title(raw, data.title)?;

    Ok(ArticleSummary {
        id,
        uid,
        published_at,
        title,
        subtitle: data.subtitle,
        author: data.author,
    })
}

/// 预计阅读时长：正文与标题的词数之和 / 200，向上取整
pub fn estimate_read_time(blocks: &[ContentBlock]) -> u32 {
    let words: usize = blocks
        .iter()
        .map(|b| count_words(&b.text) + count_words(&b.heading))
        .sum();
    u32::try_from(words.div_ceil(WORDS_PER_MINUTE)).unwrap_or(u32::MAX)
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 解析仓库返回的发布时间
pub fn parse_publication_date(value: &str) -> Result<DateTime<Utc>, ArticleError> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, STORE_DATE_FORMAT))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            ArticleError::MalformedDocument(format!("invalid publication date {:?}: {}", value, e))
        })
}

fn identity(
    raw: &RawDocument,
) -> Result<(DocumentId, Uid, Option<DateTime<Utc>>), ArticleError> {
    if raw.doc_type != POSTS_TYPE {
        return Err(ArticleError::MalformedDocument(format!(
            "document {} has type {:?}, expected {:?}",
            raw.id, raw.doc_type, POSTS_TYPE
        )));
    }

    let id = DocumentId::new(raw.id.clone())
        .map_err(|e| ArticleError::MalformedDocument(e.to_string()))?;
    let uid = raw
        .uid
        .clone()
        .ok_or_else(|| ArticleError::MalformedDocument(format!("document {} has no uid", raw.id)))
        .and_then(|uid| {
            Uid::new(uid).map_err(|e| ArticleError::MalformedDocument(e.to_string()))
        })?;
    let published_at = raw
        .first_publication_date
        .as_deref()
        .map(parse_publication_date)
        .transpose()?;

    Ok((id, uid, published_at))
}

fn require_title(raw: &RawDocument, title: Option<String>) -> Result<String, ArticleError> {
    title.ok_or_else(|| {
        ArticleError::MalformedDocument(format!("document {} has no title", raw.id))
    })
}

fn build_block(raw: RawContentBlock) -> ContentBlock {
    // 两个投影相互独立
    let text = rich_text::as_text(&raw.body);
    let html = rich_text::as_html(&raw.body);

    ContentBlock {
        heading: raw.heading,
        body: raw.body,
        text,
        html,
    }
}

fn warn_duplicate_headings(raw: &RawDocument, content: &[ContentBlock]) {
    let mut seen = HashSet::new();
    for block in content {
        if !seen.insert(block.heading.as_str()) {
            tracing::warn!(
                document_id = %raw.id,
                heading = %block.heading,
                "Duplicate content heading"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_post(content: serde_json::Value) -> RawDocument {
        RawDocument {
            id: "YV9bXhEAACMAq2Hk".to_string(),
            uid: Some("como-utilizar-hooks".to_string()),
            doc_type: "posts".to_string(),
            first_publication_date: Some("2021-03-15T19:25:28+0000".to_string()),
            data: json!({
                "title": "Como utilizar Hooks",
                "subtitle": "Pensando em sincronização em vez de ciclos de vida",
                "author": "Joseph Oliveira",
                "banner": { "url": "https://images.prismic.io/banner.png" },
                "content": content,
            }),
        }
    }

    fn words(n: usize) -> String {
        vec!["palavra"; n].join(" ")
    }

    fn block(heading: &str, text: &str) -> serde_json::Value {
        json!({
            "heading": heading,
            "body": [{ "type": "paragraph", "text": text, "spans": [] }]
        })
    }

    #[test]
    fn test_assemble_full_article() {
        let raw = raw_post(json!([block("Proin et varius", "Lorem ipsum dolor")]));
        let article = assemble(&raw).unwrap();

        assert_eq!(article.uid.as_str(), "como-utilizar-hooks");
        assert_eq!(article.title, "Como utilizar Hooks");
        assert_eq!(article.author, "Joseph Oliveira");
        assert_eq!(article.banner.as_deref(), Some("https://images.prismic.io/banner.png"));
        assert_eq!(article.content.len(), 1);
        assert_eq!(article.content[0].text, "Lorem ipsum dolor");
        assert_eq!(article.content[0].html, "<p>Lorem ipsum dolor</p>");
        assert_eq!(article.estimated_read_time, 1);
        assert_eq!(
            article.published_at.unwrap().to_rfc3339(),
            "2021-03-15T19:25:28+00:00"
        );
    }

    #[test]
    fn test_zero_content_yields_zero_read_time() {
        let article = assemble(&raw_post(json!([]))).unwrap();
        assert!(article.content.is_empty());
        assert_eq!(article.estimated_read_time, 0);
    }

    #[test]
    fn test_missing_content_is_malformed() {
        let mut raw = raw_post(json!([]));
        raw.data.as_object_mut().unwrap().remove("content");
        assert!(matches!(assemble(&raw), Err(ArticleError::MalformedDocument(_))));
    }

    #[test]
    fn test_non_array_content_is_malformed() {
        let raw = raw_post(json!({ "heading": "x" }));
        assert!(matches!(assemble(&raw), Err(ArticleError::MalformedDocument(_))));

        let raw = raw_post(json!([{ "heading": "x", "body": "not a list" }]));
        assert!(matches!(assemble(&raw), Err(ArticleError::MalformedDocument(_))));
    }

    #[test]
    fn test_missing_uid_or_wrong_type_is_malformed() {
        let mut raw = raw_post(json!([]));
        raw.uid = None;
        assert!(assemble(&raw).is_err());

        let mut raw = raw_post(json!([]));
        raw.doc_type = "homepage".to_string();
        assert!(assemble(&raw).is_err());
    }

    #[test]
    fn test_unpublished_document() {
        let mut raw = raw_post(json!([]));
        raw.first_publication_date = None;
        assert!(assemble(&raw).unwrap().published_at.is_none());

        raw.first_publication_date = Some("yesterday".to_string());
        assert!(assemble(&raw).is_err());
    }

    #[test]
    fn test_read_time_counts_headings_and_rounds_up() {
        // 199 + 1 = 200 词 -> 1 分钟
        let raw = raw_post(json!([block("Heading", &words(199))]));
        assert_eq!(assemble(&raw).unwrap().estimated_read_time, 1);

        // 200 + 2 = 202 词 -> 2 分钟
        let raw = raw_post(json!([block("Two words", &words(200))]));
        assert_eq!(assemble(&raw).unwrap().estimated_read_time, 2);
    }

    #[test]
    fn test_read_time_monotonic_when_blocks_appended() {
        let mut blocks = vec![block("Intro", &words(150))];
        let mut previous = assemble(&raw_post(json!(blocks.clone())))
            .unwrap()
            .estimated_read_time;

        for i in 0..6 {
            blocks.push(block(&format!("Part {}", i), &words(37 * (i + 1))));
            let current = assemble(&raw_post(json!(blocks.clone())))
                .unwrap()
                .estimated_read_time;
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_null_fields_default() {
        let raw = raw_post(json!([{ "heading": null, "body": null }]));
        let article = assemble(&raw).unwrap();
        assert_eq!(article.content[0].heading, "");
        assert_eq!(article.estimated_read_time, 0);
    }

    #[test]
    fn test_duplicate_headings_allowed() {
        let raw = raw_post(json!([block("Same", "a"), block("Same", "b")]));
        assert_eq!(assemble(&raw).unwrap().content.len(), 2);
    }

    #[test]
    fn test_summary_without_content() {
        let raw = RawDocument {
            id: "YV9bXhEAACMAq2Hk".to_string(),
            uid: Some("criando-um-app-cra-do-zero".to_string()),
            doc_type: "posts".to_string(),
            first_publication_date: Some("2021-03-25T19:27:35+0000".to_string()),
            data: json!({
                "title": "Criando um app CRA do zero",
                "subtitle": "Tudo sobre como criar a sua primeira aplicação utilizando Create React App",
                "author": "Danilo Vieira"
            }),
        };
        let summary = assemble_summary(&raw).unwrap();
        assert_eq!(summary.uid.as_str(), "criando-um-app-cra-do-zero");
        assert_eq!(summary.author, "Danilo Vieira");
        assert!(assemble(&raw).is_err());
    }

    #[test]
    fn test_parse_publication_date_formats() {
        assert!(parse_publication_date("2021-03-25T19:27:35+0000").is_ok());
        assert!(parse_publication_date("2021-03-25T19:27:35+00:00").is_ok());
        assert!(parse_publication_date("25/03/2021").is_err());
    }
}
