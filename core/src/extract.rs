use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::docid::DocId;
use crate::posting::{FieldType, Posting};
use crate::tokenizer::stem_tokens;

/// Floor of the term-frequency score: a single occurrence scores this much,
/// the most frequent term in a document scores 1.0.
const TF_FLOOR: f32 = 0.4;

lazy_static! {
    static ref SEL_BODY: Selector = Selector::parse("body").expect("valid selector");
    static ref SEL_A: Selector = Selector::parse("a").expect("valid selector");
    static ref SEL_META: Selector = Selector::parse("meta").expect("valid selector");
    static ref SEL_TITLE: Selector = Selector::parse("title").expect("valid selector");
    static ref NUMERIC: Regex = Regex::new(r"^\d+$").expect("valid regex");
}

/// Extraction settings, fixed at construction time.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Tokens never emitted from the URL field (common TLDs and file
    /// extensions that carry no signal).
    pub url_stopwords: HashSet<String>,
    /// URL-field tokens longer than this are dropped.
    pub max_url_token_len: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        let words = [
            "edu", "com", "html", "htm", "xml", "php", "org", "gov", "net", "int", "jpg",
            "png", "bmp", "jpeg", "pdf", "asp", "aspx",
        ];
        ExtractorConfig {
            url_stopwords: words.iter().map(|w| w.to_string()).collect(),
            max_url_token_len: 20,
        }
    }
}

/// Per-term scratch state while scanning one document's body text.
#[derive(Default)]
struct TermStats {
    count: u32,
    positions: Vec<u32>,
}

/// Turns one (URL, raw HTML) document into posting records.
///
/// Extraction is stateless across documents: `extract` takes `&self`, its
/// accumulator is a local, and a single `Extractor` can serve any number of
/// worker threads at once.
#[derive(Debug, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Extractor { config }
    }

    /// Run every field extraction over one document. Postings come out in
    /// field order RAW, URL, ANCHOR, META, TITLE; within RAW, terms are
    /// sorted so runs are reproducible.
    pub fn extract(&self, url: &str, html: &str) -> Vec<Posting> {
        let doc_id = DocId::from_url(url);
        let dom = Html::parse_document(html);
        let mut out = Vec::new();

        self.extract_body(&dom, &doc_id, &mut out);
        self.extract_url(url, &doc_id, &mut out);
        self.extract_anchors(&dom, url, &mut out);
        self.extract_meta(&dom, &doc_id, &mut out);
        self.extract_titles(&dom, &doc_id, &mut out);
        out
    }

    /// Body text: one RAW posting per distinct stemmed term, weighted by
    /// floor-normalized term frequency and carrying every token offset.
    fn extract_body(&self, dom: &Html, doc_id: &DocId, out: &mut Vec<Posting>) {
        let text = plain_text(dom).to_lowercase();
        let mut terms: HashMap<String, TermStats> = HashMap::new();
        let mut max_count = 0u32;
        for (position, term) in stem_tokens(&text).into_iter().enumerate() {
            let stats = terms.entry(term).or_default();
            stats.count += 1;
            stats.positions.push(position as u32);
            max_count = max_count.max(stats.count);
        }
        if max_count == 0 {
            // no valid terms at all; not an error
            return;
        }

        let mut sorted: Vec<(String, TermStats)> = terms.into_iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        for (term, stats) in sorted {
            let tf = TF_FLOOR + (1.0 - TF_FLOOR) * stats.count as f32 / max_count as f32;
            out.push(Posting::raw(term, doc_id.clone(), tf, stats.positions));
        }
    }

    /// URL tokens: scheme and leading `www.` stripped, then stemmed like any
    /// other text. Overlong, purely numeric, and stop-listed tokens carry no
    /// signal and are dropped.
    fn extract_url(&self, url: &str, doc_id: &DocId, out: &mut Vec<Posting>) {
        let mut rest = url;
        for scheme in ["http://", "https://"] {
            if let Some(stripped) = rest.strip_prefix(scheme) {
                rest = stripped;
                break;
            }
        }
        if let Some(stripped) = rest.strip_prefix("www.") {
            rest = stripped;
        }
        for token in stem_tokens(rest) {
            if token.len() > self.config.max_url_token_len || NUMERIC.is_match(&token) {
                continue;
            }
            if self.config.url_stopwords.contains(&token) {
                continue;
            }
            out.push(Posting::presence(token, doc_id.clone(), FieldType::Url));
        }
    }

    /// Anchor text, credited to the link target. Same-page fragment links
    /// carry no cross-document signal; unresolvable references are skipped
    /// one element at a time.
    fn extract_anchors(&self, dom: &Html, base_url: &str, out: &mut Vec<Posting>) {
        let base = Url::parse(base_url).ok();
        for a in dom.select(&SEL_A) {
            let Some(href) = a.value().attr("href") else {
                continue;
            };
            if href.starts_with('#') {
                continue;
            }
            let resolved = Url::parse(href)
                .ok()
                .or_else(|| base.as_ref().and_then(|b| b.join(href).ok()));
            let Some(mut target) = resolved else {
                tracing::debug!(href, "skipping unresolvable link");
                continue;
            };
            target.set_fragment(None);
            let target_id = DocId::from_url(target.as_str());

            let text = a.text().collect::<String>();
            let title = a.value().attr("title").unwrap_or("");
            let anchor_text = format!("{text} {title}").to_lowercase();
            for token in stem_tokens(&anchor_text) {
                out.push(Posting::attributed(token, target_id.clone()));
            }
        }
    }

    /// Meta tags: the `content` attribute of each tag, independently.
    /// Repeated tags are not deduplicated.
    fn extract_meta(&self, dom: &Html, doc_id: &DocId, out: &mut Vec<Posting>) {
        for meta in dom.select(&SEL_META) {
            let Some(content) = meta.value().attr("content") else {
                continue;
            };
            for token in stem_tokens(&content.to_lowercase()) {
                out.push(Posting::presence(token, doc_id.clone(), FieldType::Meta));
            }
        }
    }

    fn extract_titles(&self, dom: &Html, doc_id: &DocId, out: &mut Vec<Posting>) {
        for title in dom.select(&SEL_TITLE) {
            let text = title.text().collect::<String>();
            if text.is_empty() {
                continue;
            }
            for token in stem_tokens(&text.to_lowercase()) {
                out.push(Posting::presence(token, doc_id.clone(), FieldType::Title));
            }
        }
    }
}

/// Markup-stripping primitive: the text of the `<body>` when the parse
/// produced one, the whole tree's text otherwise. Script and style contents
/// are not document text. The parser error-recovers, so malformed markup
/// degrades to plain text instead of failing the document.
fn plain_text(dom: &Html) -> String {
    let root = match dom.select(&SEL_BODY).next() {
        Some(body) => body,
        None => dom.root_element(),
    };
    let mut text = String::new();
    for node in root.descendants() {
        if let Some(t) = node.value().as_text() {
            let in_markup = node
                .parent()
                .and_then(|p| p.value().as_element())
                .is_some_and(|e| e.name() == "script" || e.name() == "style");
            if !in_markup {
                text.push_str(&t.text);
            }
        }
    }
    text
}
