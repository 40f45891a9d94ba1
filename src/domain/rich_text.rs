//! 富文本投影
//!
//! 内容仓库的富文本是一组块级元素，每个元素带有行内 span。
//! 本模块提供两个相互独立的投影：
//! - `as_text`: 纯文本（用于阅读时长估算）
//! - `as_html`: 可渲染的 HTML（用于正文展示，经 maud 转义）
//!
//! span 偏移量以 UTF-16 码元计数，与仓库返回的 JSON 保持一致。

use maud::{html, Markup, PreEscaped};
use serde::{Deserialize, Deserializer, Serialize};

/// 富文本块级元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextElement {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub spans: Vec<Span>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oembed: Option<Oembed>,
}

/// 嵌入内容元数据（只保留渲染所需字段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oembed {
    #[serde(default)]
    pub embed_url: Option<String>,
}

/// 行内 span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// 块级元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Paragraph,
    Heading(u8),
    Preformatted,
    ListItem,
    OrderedListItem,
    Image,
    Embed,
    Other,
}

impl ElementKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "paragraph" => Self::Paragraph,
            "heading1" => Self::Heading(1),
            "heading2" => Self::Heading(2),
            "heading3" => Self::Heading(3),
            "heading4" => Self::Heading(4),
            "heading5" => Self::Heading(5),
            "heading6" => Self::Heading(6),
            "preformatted" => Self::Preformatted,
            "list-item" => Self::ListItem,
            "o-list-item" => Self::OrderedListItem,
            "image" => Self::Image,
            "embed" => Self::Embed,
            _ => Self::Other,
        }
    }
}

impl RichTextElement {
    pub fn element_kind(&self) -> ElementKind {
        ElementKind::parse(&self.kind)
    }
}

/// 已校验的 span
#[derive(Debug, Clone, PartialEq)]
enum SpanKind {
    Strong,
    Em,
    Hyperlink(String),
    Label(String),
}

#[derive(Debug, Clone)]
struct ResolvedSpan {
    start: usize,
    end: usize,
    kind: SpanKind,
}

/// 纯文本投影：以单个空格连接各元素文本
pub fn as_text(elements: &[RichTextElement]) -> String {
    elements
        .iter()
        .map(|e| e.text.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// HTML 投影
///
/// 连续的列表项会合并到同一个 `<ul>` / `<ol>` 中。
/// 无效 span 会被丢弃（记录警告），因此本函数不会失败。
pub fn as_html(elements: &[RichTextElement]) -> String {
    let mut out = String::new();
    let mut index = 0;

    while index < elements.len() {
        let kind = elements[index].element_kind();

        if matches!(kind, ElementKind::ListItem | ElementKind::OrderedListItem) {
            let end = elements[index..]
                .iter()
                .position(|e| e.element_kind() != kind)
                .map_or(elements.len(), |p| index + p);
            let items = &elements[index..end];

            let markup = if kind == ElementKind::ListItem {
                html! { ul { @for item in items { li { (render_inline(item)) } } } }
            } else {
                html! { ol { @for item in items { li { (render_inline(item)) } } } }
            };
            out.push_str(&markup.into_string());
            index = end;
        } else {
            out.push_str(&render_element(&elements[index], kind).into_string());
            index += 1;
        }
    }

    out
}

fn render_element(element: &RichTextElement, kind: ElementKind) -> Markup {
    match kind {
        ElementKind::Paragraph | ElementKind::Other => html! { p { (render_inline(element)) } },
        ElementKind::Heading(1) => html! { h1 { (render_inline(element)) } },
        ElementKind::Heading(2) => html! { h2 { (render_inline(element)) } },
        ElementKind::Heading(3) => html! { h3 { (render_inline(element)) } },
        ElementKind::Heading(4) => html! { h4 { (render_inline(element)) } },
        ElementKind::Heading(5) => html! { h5 { (render_inline(element)) } },
        ElementKind::Heading(_) => html! { h6 { (render_inline(element)) } },
        ElementKind::Preformatted => html! { pre { (render_inline(element)) } },
        ElementKind::Image => match element.url.as_deref().filter(|u| is_safe_url(u)) {
            Some(url) => html! {
                p class="block-img" { img src=(url) alt=(element.alt.as_deref().unwrap_or_default()); }
            },
            None => html! {},
        },
        ElementKind::Embed => {
            let embed_url = element
                .oembed
                .as_ref()
                .and_then(|o| o.embed_url.as_deref())
                .filter(|u| is_safe_url(u));
            match embed_url {
                Some(url) => html! { div data-oembed=(url) { a href=(url) { (url) } } },
                None => html! {},
            }
        }
        // 列表项在 as_html 中分组处理
        ElementKind::ListItem | ElementKind::OrderedListItem => {
            html! { li { (render_inline(element)) } }
        }
    }
}

/// 渲染元素内的行内文本与 span
fn render_inline(element: &RichTextElement) -> Markup {
    let text = element.text.as_str();
    let spans = resolve_spans(text, &element.spans);

    let mut boundaries: Vec<usize> = vec![0, text.len()];
    for span in &spans {
        boundaries.push(span.start);
        boundaries.push(span.end);
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut out = String::new();
    for window in boundaries.windows(2) {
        let (from, to) = (window[0], window[1]);
        let mut markup = render_text(&text[from..to]);

        // 外层 span 先开始；从最内层向外包裹
        let mut covering: Vec<&ResolvedSpan> = spans
            .iter()
            .filter(|s| s.start <= from && s.end >= to)
            .collect();
        covering.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        for span in covering.iter().rev() {
            markup = wrap(&span.kind, markup);
        }

        out.push_str(&markup.into_string());
    }

    PreEscaped(out)
}

fn render_text(text: &str) -> Markup {
    html! {
        @for (i, line) in text.split('\n').enumerate() {
            @if i > 0 { br; }
            (line)
        }
    }
}

fn wrap(kind: &SpanKind, inner: Markup) -> Markup {
    match kind {
        SpanKind::Strong => html! { strong { (inner) } },
        SpanKind::Em => html! { em { (inner) } },
        SpanKind::Hyperlink(url) => html! { a href=(url) { (inner) } },
        SpanKind::Label(label) => html! { span class=(label) { (inner) } },
    }
}

/// 把原始 span 转换为字节区间；不合法的 span 被丢弃
fn resolve_spans(text: &str, spans: &[Span]) -> Vec<ResolvedSpan> {
    spans
        .iter()
        .filter_map(|span| {
            let resolved = resolve_span(text, span);
            if resolved.is_none() {
                tracing::warn!(
                    kind = %span.kind,
                    start = span.start,
                    end = span.end,
                    "Dropping invalid rich text span"
                );
            }
            resolved
        })
        .collect()
}

fn resolve_span(text: &str, span: &Span) -> Option<ResolvedSpan> {
    if span.start >= span.end {
        return None;
    }
    let start = utf16_to_byte(text, span.start)?;
    let end = utf16_to_byte(text, span.end)?;

    let data_str = |key: &str| {
        span.data
            .as_ref()
            .and_then(|d| d.get(key))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    };

    let kind = match span.kind.as_str() {
        "strong" => SpanKind::Strong,
        "em" => SpanKind::Em,
        "hyperlink" => SpanKind::Hyperlink(data_str("url").filter(|u| is_safe_url(u))?),
        "label" => SpanKind::Label(data_str("label")?),
        _ => return None,
    };

    Some(ResolvedSpan { start, end, kind })
}

/// UTF-16 偏移量转换为字节偏移量；落在代理对中间或越界时返回 None
fn utf16_to_byte(text: &str, position: usize) -> Option<usize> {
    let mut units = 0;
    for (byte_index, ch) in text.char_indices() {
        if units == position {
            return Some(byte_index);
        }
        if units > position {
            return None;
        }
        units += ch.len_utf16();
    }
    (units == position).then_some(text.len())
}

/// 只允许 http(s) 与站内相对路径
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://")
        || url.starts_with("http://")
        || (url.starts_with('/') && !url.starts_with("//"))
}

/// 反序列化时把 `null` 视为默认值
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
