use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured SEO signals extracted from a single page.
///
/// Every field defaults to empty/false when the page doesn't carry the
/// corresponding markup, so an empty HTML input produces a fully default
/// record rather than an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSignals {
    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub canonical_url: String,
    pub robots: String,

    pub open_graph: OpenGraphTags,
    pub twitter: TwitterTags,

    /// Heading text per level, in document order, nested markup stripped.
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,

    pub internal_links: Vec<LinkRecord>,
    pub external_links: Vec<LinkRecord>,

    pub images: Vec<ImageRecord>,
    pub images_without_alt: Vec<ImageRecord>,

    pub text_content: String,
    pub word_count: usize,

    pub has_viewport: bool,
    pub has_charset: bool,
    pub language: String,

    /// Parsed JSON-LD blocks; invalid blocks are skipped during extraction.
    pub schema_markup: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenGraphTags {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(rename = "type")]
    pub og_type: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitterTags {
    pub card: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub href: String,
    pub text: String,
    pub rel: String,
    pub is_nofollow: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub src: String,
    pub alt: String,
    pub width: Option<String>,
    pub height: Option<String>,
    pub loading: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadabilityMetrics {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub avg_sentence_length: f64,
    pub avg_word_length: f64,
    pub readability_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub keyword: String,
    pub in_title: bool,
    pub in_meta_description: bool,
    pub in_h1: bool,
    pub in_h2: bool,
    pub in_url: bool,
    /// Keyword density as a percentage, rounded to two decimals.
    pub density: f64,
    pub count: usize,
    pub prominence_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueCategory {
    MetaTags,
    Headings,
    Images,
    Content,
    Technical,
    Social,
    Links,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IssueCategory::MetaTags => "Meta Tags",
            IssueCategory::Headings => "Headings",
            IssueCategory::Images => "Images",
            IssueCategory::Content => "Content",
            IssueCategory::Technical => "Technical",
            IssueCategory::Social => "Social",
            IssueCategory::Links => "Links",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoIssue {
    pub severity: IssueSeverity,
    pub category: IssueCategory,
    pub message: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoScore {
    pub overall: u32,
    pub content: u32,
    pub technical: u32,
    pub on_page: u32,
    pub links: u32,
}

/// A keyword with its frequency score normalized to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredKeyword {
    pub keyword: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opportunity {
    High,
    Medium,
    Low,
}

impl Opportunity {
    /// Tier a normalized keyword score into an opportunity bucket.
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            Opportunity::High
        } else if score > 0.4 {
            Opportunity::Medium
        } else {
            Opportunity::Low
        }
    }
}

impl fmt::Display for Opportunity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Opportunity::High => "High",
            Opportunity::Medium => "Medium",
            Opportunity::Low => "Low",
        };
        write!(f, "{}", label)
    }
}

/// A keyword the competitor ranks content for that our side lacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingKeyword {
    pub keyword: String,
    pub score: f64,
    pub opportunity: Opportunity,
}

/// A keyword both domains share, with each side's score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonKeyword {
    pub keyword: String,
    pub our_score: f64,
    pub competitor_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapSummary {
    pub total_our_keywords: usize,
    pub total_competitor_keywords: usize,
    pub missing_count: usize,
    pub common_count: usize,
    pub unique_count: usize,
    pub gap_percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapReport {
    pub our_domain: String,
    pub competitor_domain: String,
    pub summary: GapSummary,
    pub missing: Vec<MissingKeyword>,
    pub common: Vec<CommonKeyword>,
    pub unique: Vec<MissingKeyword>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub url: String,
    pub status_code: u16,
    pub load_time_ms: u64,
    pub ssl_enabled: bool,
    pub signals: PageSignals,
    pub readability: ReadabilityMetrics,
    pub top_keywords: Vec<ScoredKeyword>,
    pub score: SeoScore,
    pub issues: Vec<SeoIssue>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnPageReport {
    pub url: String,
    pub keyword: String,
    pub analysis: KeywordAnalysis,
    pub readability: ReadabilityMetrics,
    pub on_page_score: u32,
    pub suggestions: Vec<String>,
    pub related_keywords: Vec<ScoredKeyword>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordReport {
    pub url: String,
    pub keywords: Vec<ScoredKeyword>,
    pub timestamp: String,
}

/// One organic result position parsed from a SERP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpResult {
    pub position: u32,
    pub url: String,
    pub domain: String,
}

/// Outcome of a single rank lookup. `position` is `None` whenever the
/// lookup failed or the domain was not found in the results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankCheck {
    pub keyword: String,
    pub target_domain: String,
    pub position: Option<u32>,
    pub url: Option<String>,
    pub top_results: Vec<SerpResult>,
    pub checked_at: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordMetrics {
    pub estimated_cpc: String,
    pub competition: String,
    pub trend: String,
}

/// Keyword research output. Difficulty and volume are heuristic estimates,
/// not sourced from real search data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordIdeas {
    pub keyword: String,
    pub suggestions: Vec<String>,
    pub long_tail_keywords: Vec<String>,
    pub related_terms: Vec<String>,
    pub questions: Vec<String>,
    pub difficulty: u32,
    pub volume: u64,
    pub opportunity: Opportunity,
    pub metrics: KeywordMetrics,
    pub timestamp: String,
}
