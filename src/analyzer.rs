use crate::models::{
    IssueCategory, IssueSeverity, KeywordAnalysis, PageSignals, ReadabilityMetrics, ScoredKeyword,
    SeoIssue, SeoScore,
};
use crate::text_metrics::round2;
use regex::Regex;

/// Analyze how a target keyword is used across a page.
///
/// Occurrences are counted with whole-word, case-insensitive matching of
/// the literal phrase; density is zero when the page has no words.
pub fn analyze_keyword(keyword: &str, signals: &PageSignals, url: &str) -> KeywordAnalysis {
    let keyword_lower = keyword.to_lowercase();
    let text_lower = signals.text_content.to_lowercase();

    let pattern = format!(r"\b{}\b", regex::escape(&keyword_lower));
    let count = Regex::new(&pattern)
        .map(|re| re.find_iter(&text_lower).count())
        .unwrap_or(0);

    let total_words = signals.text_content.split_whitespace().count();
    let keyword_words = keyword.split_whitespace().count();
    let density = if total_words > 0 {
        round2((count * keyword_words) as f64 / total_words as f64 * 100.0)
    } else {
        0.0
    };

    let in_title = signals.title.to_lowercase().contains(&keyword_lower);
    let in_meta_description = signals
        .meta_description
        .to_lowercase()
        .contains(&keyword_lower);
    let in_h1 = signals
        .h1
        .iter()
        .any(|h| h.to_lowercase().contains(&keyword_lower));
    let in_h2 = signals
        .h2
        .iter()
        .any(|h| h.to_lowercase().contains(&keyword_lower));
    let slug = keyword_lower.split_whitespace().collect::<Vec<_>>().join("-");
    let in_url = url.to_lowercase().contains(&slug);

    let mut prominence_score = 0;
    if in_title {
        prominence_score += 25;
    }
    if in_meta_description {
        prominence_score += 20;
    }
    if in_h1 {
        prominence_score += 25;
    }
    if in_h2 {
        prominence_score += 15;
    }
    if in_url {
        prominence_score += 15;
    }

    KeywordAnalysis {
        keyword: keyword.to_string(),
        in_title,
        in_meta_description,
        in_h1,
        in_h2,
        in_url,
        density,
        count,
        prominence_score,
    }
}

/// Run the fixed sequence of SEO checks against a page's signals.
///
/// Rules are independent and evaluated in a fixed order, so the output
/// order is deterministic.
pub fn analyze_issues(signals: &PageSignals) -> Vec<SeoIssue> {
    let mut issues = Vec::new();
    let mut push = |severity, category, message: String, recommendation: &str| {
        issues.push(SeoIssue {
            severity,
            category,
            message,
            recommendation: recommendation.to_string(),
        });
    };

    // Title checks
    let title_len = signals.title.chars().count();
    if signals.title.is_empty() {
        push(
            IssueSeverity::Error,
            IssueCategory::MetaTags,
            "Missing title tag".to_string(),
            "Add a unique, descriptive title tag between 50-60 characters.",
        );
    } else if title_len < 30 {
        push(
            IssueSeverity::Warning,
            IssueCategory::MetaTags,
            format!("Title tag too short ({} characters)", title_len),
            "Expand your title to 50-60 characters for better SEO impact.",
        );
    } else if title_len > 60 {
        push(
            IssueSeverity::Warning,
            IssueCategory::MetaTags,
            format!("Title tag too long ({} characters)", title_len),
            "Shorten your title to 60 characters or less to avoid truncation in search results.",
        );
    }

    // Meta description checks
    let desc_len = signals.meta_description.chars().count();
    if signals.meta_description.is_empty() {
        push(
            IssueSeverity::Error,
            IssueCategory::MetaTags,
            "Missing meta description".to_string(),
            "Add a compelling meta description between 150-160 characters.",
        );
    } else if desc_len < 120 {
        push(
            IssueSeverity::Warning,
            IssueCategory::MetaTags,
            format!("Meta description too short ({} characters)", desc_len),
            "Expand your meta description to 150-160 characters.",
        );
    } else if desc_len > 160 {
        push(
            IssueSeverity::Warning,
            IssueCategory::MetaTags,
            format!("Meta description too long ({} characters)", desc_len),
            "Shorten your meta description to avoid truncation in search results.",
        );
    }

    // H1 checks
    if signals.h1.is_empty() {
        push(
            IssueSeverity::Error,
            IssueCategory::Headings,
            "Missing H1 tag".to_string(),
            "Add exactly one H1 tag that describes the main topic of the page.",
        );
    } else if signals.h1.len() > 1 {
        push(
            IssueSeverity::Warning,
            IssueCategory::Headings,
            format!("Multiple H1 tags found ({})", signals.h1.len()),
            "Use only one H1 tag per page for better SEO structure.",
        );
    }

    // Image alt text check
    if !signals.images_without_alt.is_empty() {
        push(
            IssueSeverity::Warning,
            IssueCategory::Images,
            format!(
                "{} image(s) missing alt text",
                signals.images_without_alt.len()
            ),
            "Add descriptive alt text to all images for accessibility and SEO.",
        );
    }

    // Content length check
    if signals.word_count < 300 {
        push(
            IssueSeverity::Warning,
            IssueCategory::Content,
            format!("Thin content ({} words)", signals.word_count),
            "Aim for at least 300-500 words of quality content. Consider expanding with relevant information.",
        );
    }

    // Viewport check
    if !signals.has_viewport {
        push(
            IssueSeverity::Error,
            IssueCategory::Technical,
            "Missing viewport meta tag".to_string(),
            "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"> for mobile responsiveness.",
        );
    }

    // Language check
    if signals.language.is_empty() {
        push(
            IssueSeverity::Warning,
            IssueCategory::Technical,
            "Missing language attribute".to_string(),
            "Add lang attribute to the HTML tag (e.g., <html lang=\"en\">).",
        );
    }

    // Canonical URL check
    if signals.canonical_url.is_empty() {
        push(
            IssueSeverity::Info,
            IssueCategory::Technical,
            "No canonical URL specified".to_string(),
            "Add a canonical URL to prevent duplicate content issues.",
        );
    }

    // Open Graph checks
    if signals.open_graph.title.is_empty()
        || signals.open_graph.description.is_empty()
        || signals.open_graph.image.is_empty()
    {
        push(
            IssueSeverity::Info,
            IssueCategory::Social,
            "Incomplete Open Graph tags".to_string(),
            "Add og:title, og:description, and og:image for better social media sharing.",
        );
    }

    // Schema markup check
    if signals.schema_markup.is_empty() {
        push(
            IssueSeverity::Info,
            IssueCategory::Technical,
            "No structured data (Schema.org) found".to_string(),
            "Add JSON-LD structured data to help search engines understand your content.",
        );
    }

    // Internal links check
    if signals.internal_links.len() < 3 {
        push(
            IssueSeverity::Warning,
            IssueCategory::Links,
            format!("Few internal links ({})", signals.internal_links.len()),
            "Add more internal links to improve site navigation and distribute page authority.",
        );
    }

    issues
}

/// Composite SEO score from detected issues plus bonuses for good signals.
///
/// Category sub-scores start at 100, lose points per issue severity (Social
/// issues hit on-page at half weight), then gain fixed bonuses, each
/// clamped to [0, 100]. Overall is the weighted sum of the four.
pub fn calculate_seo_score(signals: &PageSignals, issues: &[SeoIssue]) -> SeoScore {
    let mut content: f64 = 100.0;
    let mut technical: f64 = 100.0;
    let mut on_page: f64 = 100.0;
    let mut links: f64 = 100.0;

    for issue in issues {
        let deduction = match issue.severity {
            IssueSeverity::Error => 15.0,
            IssueSeverity::Warning => 8.0,
            IssueSeverity::Info => 3.0,
        };

        match issue.category {
            IssueCategory::Content => content = (content - deduction).max(0.0),
            IssueCategory::Technical => technical = (technical - deduction).max(0.0),
            IssueCategory::MetaTags | IssueCategory::Headings | IssueCategory::Images => {
                on_page = (on_page - deduction).max(0.0)
            }
            IssueCategory::Links => links = (links - deduction).max(0.0),
            // Social sharing problems matter less than core on-page signals
            IssueCategory::Social => on_page = (on_page - deduction / 2.0).max(0.0),
        }
    }

    // Bonus points for good practices
    if signals.word_count >= 1000 {
        content = (content + 5.0).min(100.0);
    }
    if !signals.schema_markup.is_empty() {
        technical = (technical + 5.0).min(100.0);
    }
    if signals.h2.len() >= 3 {
        on_page = (on_page + 5.0).min(100.0);
    }
    if signals.internal_links.len() >= 10 {
        links = (links + 5.0).min(100.0);
    }

    let overall = (content * 0.30 + technical * 0.25 + on_page * 0.30 + links * 0.15).round();

    SeoScore {
        overall: overall as u32,
        content: content.round() as u32,
        technical: technical.round() as u32,
        on_page: on_page.round() as u32,
        links: links.round() as u32,
    }
}

/// Quick 0-100 score for a keyword-targeted page, weighting placement and
/// content depth.
pub fn on_page_score(analysis: &KeywordAnalysis, word_count: usize) -> u32 {
    let mut score = 0;
    if analysis.in_title {
        score += 20;
    }
    if analysis.in_meta_description {
        score += 15;
    }
    if analysis.in_h1 {
        score += 20;
    }
    if analysis.in_h2 {
        score += 10;
    }
    if analysis.in_url {
        score += 10;
    }
    score += if analysis.density >= 0.5 && analysis.density <= 3.0 {
        15
    } else {
        5
    };
    score += if word_count >= 800 {
        10
    } else if word_count >= 300 {
        5
    } else {
        0
    };
    score
}

/// Actionable optimization suggestions for a keyword-targeted page.
pub fn optimization_suggestions(
    analysis: &KeywordAnalysis,
    signals: &PageSignals,
    readability: &ReadabilityMetrics,
    related: &[ScoredKeyword],
) -> Vec<String> {
    let keyword = &analysis.keyword;
    let mut suggestions = Vec::new();

    if !analysis.in_title {
        suggestions.push(format!(
            "Add \"{}\" to your title tag for better relevance signals.",
            keyword
        ));
    }
    if !analysis.in_meta_description {
        suggestions.push(format!(
            "Include \"{}\" in your meta description to improve click-through rates.",
            keyword
        ));
    }
    if !analysis.in_h1 {
        suggestions.push(format!(
            "Add \"{}\" to your H1 heading to establish topic relevance.",
            keyword
        ));
    }
    if !analysis.in_h2 {
        suggestions.push(format!(
            "Consider using \"{}\" in at least one H2 subheading.",
            keyword
        ));
    }
    if !analysis.in_url {
        let slug = keyword
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        suggestions.push(format!(
            "If possible, include \"{}\" in the URL slug.",
            slug
        ));
    }

    if analysis.density < 0.5 {
        suggestions.push(format!(
            "Keyword density is low ({}%). Consider adding more mentions naturally.",
            analysis.density
        ));
    } else if analysis.density > 3.0 {
        suggestions.push(format!(
            "Keyword density might be too high ({}%). Avoid over-optimization.",
            analysis.density
        ));
    }

    if signals.word_count < 500 {
        suggestions.push(format!(
            "Content is thin ({} words). Consider expanding to at least 800-1000 words.",
            signals.word_count
        ));
    }
    if readability.flesch_reading_ease < 50.0 {
        suggestions.push(format!(
            "Content may be difficult to read (score: {}). Simplify sentences.",
            readability.flesch_reading_ease
        ));
    }
    if signals.h2.len() < 2 {
        suggestions
            .push("Add more H2 subheadings to improve content structure and scanability.".to_string());
    }
    if !signals.images_without_alt.is_empty() {
        suggestions.push(format!(
            "{} images are missing alt text. Add keyword-relevant alt descriptions.",
            signals.images_without_alt.len()
        ));
    }
    if signals.internal_links.len() < 3 {
        suggestions.push("Add more internal links to related content on your site.".to_string());
    }

    let keyword_lower = keyword.to_lowercase();
    let related_terms: Vec<&str> = related
        .iter()
        .filter(|k| !keyword_lower.contains(&k.keyword))
        .take(5)
        .map(|k| k.keyword.as_str())
        .collect();
    if !related_terms.is_empty() {
        suggestions.push(format!(
            "Consider incorporating related terms: {}.",
            related_terms.join(", ")
        ));
    }

    suggestions
}
