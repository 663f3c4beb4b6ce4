use crate::models::{ImageRecord, LinkRecord, OpenGraphTags, PageSignals, TwitterTags};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

// Precompiled patterns to avoid repeated parsing and eliminate unwrap() calls.
// The extractor treats HTML as flat text on purpose: real-world markup is
// frequently malformed and a strict parser would reject pages we still want
// to analyze.
static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<title[^>]*>([^<]*)</title>").expect("title pattern should be valid")
});
static META_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("meta tag pattern should be valid"));
static LINK_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<link\b[^>]*>").expect("link tag pattern should be valid"));
static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a>").expect("anchor pattern should be valid")
});
static IMG_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("img tag pattern should be valid"));
static HEADING_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    (1..=6)
        .map(|level| {
            Regex::new(&format!(r"(?is)<h{level}[^>]*>(.*?)</h{level}>"))
                .expect("heading pattern should be valid")
        })
        .collect()
});

static NAME_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\sname\s*=\s*["']([^"']*)["']"#).expect("name attr pattern should be valid")
});
static PROPERTY_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\sproperty\s*=\s*["']([^"']*)["']"#)
        .expect("property attr pattern should be valid")
});
static CONTENT_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\scontent\s*=\s*["']([^"']*)["']"#)
        .expect("content attr pattern should be valid")
});
static HREF_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\shref\s*=\s*["']([^"']*)["']"#).expect("href attr pattern should be valid")
});
static REL_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\srel\s*=\s*["']([^"']*)["']"#).expect("rel attr pattern should be valid")
});
static SRC_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\ssrc\s*=\s*["']([^"']*)["']"#).expect("src attr pattern should be valid")
});
static ALT_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\salt\s*=\s*["']([^"']*)["']"#).expect("alt attr pattern should be valid")
});
static WIDTH_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\swidth\s*=\s*["']([^"']*)["']"#)
        .expect("width attr pattern should be valid")
});
static HEIGHT_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\sheight\s*=\s*["']([^"']*)["']"#)
        .expect("height attr pattern should be valid")
});
static LOADING_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\sloading\s*=\s*["']([^"']*)["']"#)
        .expect("loading attr pattern should be valid")
});

static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("script pattern should be valid")
});
static STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style>").expect("style pattern should be valid")
});
static NOSCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<noscript\b[^>]*>.*?</noscript>").expect("noscript pattern should be valid")
});
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag strip pattern should be valid"));
static NUMERIC_ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#\d+;").expect("numeric entity pattern should be valid"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern should be valid"));

static JSON_LD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("json-ld pattern should be valid")
});
static VIEWPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*name\s*=\s*["']viewport["']"#)
        .expect("viewport pattern should be valid")
});
static CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<meta[^>]*charset\s*=").expect("charset pattern should be valid"));
static HTTP_EQUIV_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*http-equiv\s*=\s*["']content-type["']"#)
        .expect("http-equiv pattern should be valid")
});
static HTML_LANG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<html[^>]*\slang\s*=\s*["']([^"']*)["']"#)
        .expect("html lang pattern should be valid")
});

/// Extract SEO signals from raw HTML.
///
/// Tolerant by design: missing tags produce empty fields, malformed
/// embedded data is skipped, and no input can make this fail.
pub fn extract(html: &str, base_url: &str) -> PageSignals {
    let (internal_links, external_links) = extract_links(html, base_url);
    let (images, images_without_alt) = extract_images(html);
    let (text_content, word_count) = extract_text_content(html);

    PageSignals {
        title: extract_title(html),
        meta_description: meta_content(html, "description"),
        meta_keywords: meta_content(html, "keywords"),
        canonical_url: extract_canonical(html),
        robots: meta_content(html, "robots"),

        open_graph: OpenGraphTags {
            title: meta_content(html, "og:title"),
            description: meta_content(html, "og:description"),
            image: meta_content(html, "og:image"),
            og_type: meta_content(html, "og:type"),
            url: meta_content(html, "og:url"),
        },
        twitter: TwitterTags {
            card: meta_content(html, "twitter:card"),
            title: meta_content(html, "twitter:title"),
            description: meta_content(html, "twitter:description"),
            image: meta_content(html, "twitter:image"),
        },

        h1: extract_headings(html, 1),
        h2: extract_headings(html, 2),
        h3: extract_headings(html, 3),
        h4: extract_headings(html, 4),
        h5: extract_headings(html, 5),
        h6: extract_headings(html, 6),

        internal_links,
        external_links,

        images,
        images_without_alt,

        text_content,
        word_count,

        has_viewport: VIEWPORT_RE.is_match(html),
        has_charset: CHARSET_RE.is_match(html) || HTTP_EQUIV_RE.is_match(html),
        language: HTML_LANG_RE
            .captures(html)
            .map(|c| c[1].to_string())
            .unwrap_or_default(),

        schema_markup: extract_schema_markup(html),
    }
}

fn extract_title(html: &str) -> String {
    TITLE_RE
        .captures(html)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default()
}

/// Look up a `<meta>` value by `name` or `property` key, tolerating either
/// attribute order within the tag.
fn meta_content(html: &str, key: &str) -> String {
    for tag in META_TAG_RE.find_iter(html) {
        let tag = tag.as_str();
        let tag_key = NAME_ATTR_RE
            .captures(tag)
            .or_else(|| PROPERTY_ATTR_RE.captures(tag));

        if let Some(k) = tag_key
            && k[1].eq_ignore_ascii_case(key)
        {
            return CONTENT_ATTR_RE
                .captures(tag)
                .map(|c| c[1].to_string())
                .unwrap_or_default();
        }
    }
    String::new()
}

fn extract_canonical(html: &str) -> String {
    for tag in LINK_TAG_RE.find_iter(html) {
        let tag = tag.as_str();
        if let Some(rel) = REL_ATTR_RE.captures(tag)
            && rel[1].eq_ignore_ascii_case("canonical")
        {
            return HREF_ATTR_RE
                .captures(tag)
                .map(|c| c[1].to_string())
                .unwrap_or_default();
        }
    }
    String::new()
}

/// Headings of one level in document order; nested markup is stripped and
/// headings that strip down to nothing are dropped.
fn extract_headings(html: &str, level: usize) -> Vec<String> {
    HEADING_RES[level - 1]
        .captures_iter(html)
        .filter_map(|c| {
            let text = strip_tags(&c[1]);
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .collect()
}

fn strip_tags(fragment: &str) -> String {
    TAG_RE.replace_all(fragment, "").into_owned()
}

/// Split anchors into internal and external by exact hostname match against
/// the base URL. Relative or unparseable hrefs are conservatively internal;
/// empty, fragment, `javascript:`, `mailto:` and `tel:` hrefs are excluded
/// from both sets.
fn extract_links(html: &str, base_url: &str) -> (Vec<LinkRecord>, Vec<LinkRecord>) {
    let base = Url::parse(base_url).ok();
    let base_host = base
        .as_ref()
        .and_then(|u| u.host_str())
        .map(|h| h.to_string());

    let mut internal = Vec::new();
    let mut external = Vec::new();

    for caps in ANCHOR_RE.captures_iter(html) {
        let attrs = &caps[1];
        let href = HREF_ATTR_RE
            .captures(attrs)
            .map(|c| c[1].to_string())
            .unwrap_or_default();

        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
        {
            continue;
        }

        let rel = REL_ATTR_RE
            .captures(attrs)
            .map(|c| c[1].to_string())
            .unwrap_or_default();
        let is_nofollow = rel.to_lowercase().contains("nofollow");
        let text = strip_tags(&caps[2]).trim().to_string();

        let resolved = match &base {
            Some(b) => b.join(&href).ok(),
            None => Url::parse(&href).ok(),
        };
        let is_internal = match &resolved {
            Some(u) => u.host_str() == base_host.as_deref(),
            None => true,
        };

        let record = LinkRecord {
            href,
            text,
            rel,
            is_nofollow,
        };
        if is_internal {
            internal.push(record);
        } else {
            external.push(record);
        }
    }

    (internal, external)
}

fn extract_images(html: &str) -> (Vec<ImageRecord>, Vec<ImageRecord>) {
    let mut all = Vec::new();
    let mut without_alt = Vec::new();

    for tag in IMG_TAG_RE.find_iter(html) {
        let tag = tag.as_str();
        let src = SRC_ATTR_RE
            .captures(tag)
            .map(|c| c[1].to_string())
            .unwrap_or_default();
        if src.is_empty() {
            continue;
        }

        let attr = |re: &Regex| re.captures(tag).map(|c| c[1].to_string());
        let image = ImageRecord {
            src,
            alt: attr(&ALT_ATTR_RE).unwrap_or_default(),
            width: attr(&WIDTH_ATTR_RE),
            height: attr(&HEIGHT_ATTR_RE),
            loading: attr(&LOADING_ATTR_RE),
        };

        if image.alt.is_empty() {
            without_alt.push(image.clone());
        }
        all.push(image);
    }

    (all, without_alt)
}

/// Plain-text content and its whitespace-delimited word count.
fn extract_text_content(html: &str) -> (String, usize) {
    let text = SCRIPT_RE.replace_all(html, "");
    let text = STYLE_RE.replace_all(&text, "");
    let text = NOSCRIPT_RE.replace_all(&text, "");
    let text = TAG_RE.replace_all(&text, " ");
    let text = decode_entities(&text);
    let text = WHITESPACE_RE.replace_all(&text, " ").trim().to_string();

    let word_count = text.split_whitespace().count();
    (text, word_count)
}

// Minimal fixed entity set; numeric entities are dropped rather than decoded.
fn decode_entities(text: &str) -> String {
    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"");
    NUMERIC_ENTITY_RE.replace_all(&text, "").into_owned()
}

fn extract_schema_markup(html: &str) -> Vec<serde_json::Value> {
    JSON_LD_RE
        .captures_iter(html)
        .filter_map(|c| match serde_json::from_str(c[1].trim()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping invalid JSON-LD block");
                None
            }
        })
        .collect()
}
