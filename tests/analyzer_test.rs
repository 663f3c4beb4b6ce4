use seoscope::analyzer::{
    analyze_issues, analyze_keyword, calculate_seo_score, on_page_score, optimization_suggestions,
};
use seoscope::extractor::extract;
use seoscope::models::{
    IssueCategory, IssueSeverity, PageSignals, ScoredKeyword, SeoIssue,
};
use seoscope::text_metrics::calculate_readability;

fn signals_with_text(text: &str) -> PageSignals {
    PageSignals {
        word_count: text.split_whitespace().count(),
        text_content: text.to_string(),
        ..Default::default()
    }
}

/// A page with every box ticked: no issue rule fires.
fn clean_signals() -> PageSignals {
    let mut signals = PageSignals::default();
    signals.title = "A descriptive page title of the right length".to_string(); // 44 chars
    signals.meta_description = "A".repeat(150);
    signals.h1 = vec!["Main heading".to_string()];
    signals.has_viewport = true;
    signals.language = "en".to_string();
    signals.canonical_url = "https://example.com/".to_string();
    signals.open_graph.title = "t".to_string();
    signals.open_graph.description = "d".to_string();
    signals.open_graph.image = "i".to_string();
    signals.schema_markup = vec![serde_json::json!({"@type": "WebPage"})];
    signals.internal_links = (0..3)
        .map(|i| seoscope::models::LinkRecord {
            href: format!("/page-{}", i),
            text: "link".to_string(),
            rel: String::new(),
            is_nofollow: false,
        })
        .collect();
    signals.text_content = "word ".repeat(300).trim().to_string();
    signals.word_count = 300;
    signals
}

#[test]
fn test_keyword_placement_flags() {
    let mut signals = signals_with_text("seo is a discipline and seo takes practice");
    signals.title = "Learn SEO the right way".to_string();
    signals.meta_description = "All about search".to_string();
    signals.h1 = vec!["An SEO Primer".to_string()];
    signals.h2 = vec!["Getting started".to_string()];

    let analysis = analyze_keyword("SEO", &signals, "https://example.com/seo-guide");
    assert!(analysis.in_title);
    assert!(!analysis.in_meta_description);
    assert!(analysis.in_h1);
    assert!(!analysis.in_h2);
    assert!(analysis.in_url);
    assert_eq!(analysis.count, 2);
}

#[test]
fn test_keyword_density_two_in_one_hundred_words() {
    let text = format!("{} seo seo", "word ".repeat(98).trim());
    let signals = signals_with_text(&text);
    assert_eq!(signals.word_count, 100);

    let analysis = analyze_keyword("seo", &signals, "https://example.com");
    assert_eq!(analysis.count, 2);
    assert_eq!(analysis.density, 2.0);
}

#[test]
fn test_keyword_density_empty_content_is_zero() {
    let signals = PageSignals::default();
    let analysis = analyze_keyword("seo", &signals, "https://example.com");
    assert_eq!(analysis.count, 0);
    assert_eq!(analysis.density, 0.0);
}

#[test]
fn test_keyword_phrase_matches_whole_words() {
    let signals = signals_with_text("seo tools help but seotools is one word");
    let analysis = analyze_keyword("seo tools", &signals, "https://example.com");
    assert_eq!(analysis.count, 1);
    // two-word phrase appearing once in eight words
    assert_eq!(analysis.density, 25.0);
}

#[test]
fn test_keyword_with_regex_metacharacters_does_not_panic() {
    let signals = signals_with_text("c++ is fun");
    let analysis = analyze_keyword("c++", &signals, "https://example.com");
    assert_eq!(analysis.density, 0.0);
}

#[test]
fn test_keyword_in_url_uses_hyphenated_slug() {
    let signals = PageSignals::default();
    let analysis = analyze_keyword("seo tools", &signals, "https://example.com/best-seo-tools");
    assert!(analysis.in_url);
}

#[test]
fn test_prominence_score_weights() {
    let mut signals = signals_with_text("keyword");
    signals.title = "keyword".to_string();
    signals.meta_description = "keyword".to_string();
    signals.h1 = vec!["keyword".to_string()];
    signals.h2 = vec!["keyword".to_string()];

    let analysis = analyze_keyword("keyword", &signals, "https://example.com/keyword");
    assert_eq!(analysis.prominence_score, 100);

    let partial = analyze_keyword("keyword", &signals, "https://example.com/other");
    assert_eq!(partial.prominence_score, 85);
}

#[test]
fn test_issues_on_empty_page() {
    let issues = analyze_issues(&PageSignals::default());

    let expect = [
        (IssueSeverity::Error, IssueCategory::MetaTags),   // missing title
        (IssueSeverity::Error, IssueCategory::MetaTags),   // missing meta description
        (IssueSeverity::Error, IssueCategory::Headings),   // missing h1
        (IssueSeverity::Warning, IssueCategory::Content),  // thin content
        (IssueSeverity::Error, IssueCategory::Technical),  // missing viewport
        (IssueSeverity::Warning, IssueCategory::Technical), // missing language
        (IssueSeverity::Info, IssueCategory::Technical),   // missing canonical
        (IssueSeverity::Info, IssueCategory::Social),      // incomplete OG
        (IssueSeverity::Info, IssueCategory::Technical),   // no structured data
        (IssueSeverity::Warning, IssueCategory::Links),    // few internal links
    ];

    assert_eq!(issues.len(), expect.len());
    for (issue, (severity, category)) in issues.iter().zip(expect) {
        assert_eq!(issue.severity, severity, "{}", issue.message);
        assert_eq!(issue.category, category, "{}", issue.message);
    }
}

#[test]
fn test_clean_page_has_no_issues() {
    let issues = analyze_issues(&clean_signals());
    assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
}

#[test]
fn test_title_length_thresholds() {
    let mut signals = clean_signals();
    signals.title = "Too short".to_string();
    let issues = analyze_issues(&signals);
    assert!(issues.iter().any(|i| i.message.contains("Title tag too short")
        && i.severity == IssueSeverity::Warning));

    signals.title = "x".repeat(61);
    let issues = analyze_issues(&signals);
    assert!(issues.iter().any(|i| i.message.contains("Title tag too long")));
}

#[test]
fn test_multiple_h1_warning() {
    let mut signals = clean_signals();
    signals.h1 = vec!["One".to_string(), "Two".to_string()];
    let issues = analyze_issues(&signals);
    assert!(issues.iter().any(|i| i.message.contains("Multiple H1 tags")
        && i.severity == IssueSeverity::Warning));
}

#[test]
fn test_images_missing_alt_warning_counts() {
    let mut signals = clean_signals();
    signals.images_without_alt = vec![
        seoscope::models::ImageRecord {
            src: "/a.png".to_string(),
            alt: String::new(),
            width: None,
            height: None,
            loading: None,
        };
        2
    ];
    let issues = analyze_issues(&signals);
    assert!(issues.iter().any(|i| i.message == "2 image(s) missing alt text"));
}

#[test]
fn test_score_is_100_with_no_issues() {
    let signals = clean_signals();
    let score = calculate_seo_score(&signals, &[]);
    assert_eq!(score.overall, 100);
    assert_eq!(score.content, 100);
    assert_eq!(score.technical, 100);
    assert_eq!(score.on_page, 100);
    assert_eq!(score.links, 100);
}

#[test]
fn test_score_deductions_by_severity_and_category() {
    let signals = PageSignals::default();
    let issues = vec![
        SeoIssue {
            severity: IssueSeverity::Error,
            category: IssueCategory::Content,
            message: String::new(),
            recommendation: String::new(),
        },
        SeoIssue {
            severity: IssueSeverity::Warning,
            category: IssueCategory::Links,
            message: String::new(),
            recommendation: String::new(),
        },
        SeoIssue {
            severity: IssueSeverity::Info,
            category: IssueCategory::Technical,
            message: String::new(),
            recommendation: String::new(),
        },
    ];

    let score = calculate_seo_score(&signals, &issues);
    assert_eq!(score.content, 85);
    assert_eq!(score.links, 92);
    assert_eq!(score.technical, 97);
    assert_eq!(score.on_page, 100);
}

#[test]
fn test_social_issues_hit_on_page_at_half_weight() {
    let signals = PageSignals::default();
    let issues = vec![SeoIssue {
        severity: IssueSeverity::Warning,
        category: IssueCategory::Social,
        message: String::new(),
        recommendation: String::new(),
    }];

    let score = calculate_seo_score(&signals, &issues);
    assert_eq!(score.on_page, 96);
}

#[test]
fn test_score_floor_clamps_at_zero() {
    let signals = PageSignals::default();
    let issues: Vec<SeoIssue> = (0..10)
        .map(|_| SeoIssue {
            severity: IssueSeverity::Error,
            category: IssueCategory::MetaTags,
            message: String::new(),
            recommendation: String::new(),
        })
        .collect();

    let score = calculate_seo_score(&signals, &issues);
    assert_eq!(score.on_page, 0);
}

#[test]
fn test_score_bonuses_are_ceiling_clamped() {
    let mut signals = clean_signals();
    signals.word_count = 1200;
    signals.h2 = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    signals.internal_links = (0..10)
        .map(|i| seoscope::models::LinkRecord {
            href: format!("/p{}", i),
            text: String::new(),
            rel: String::new(),
            is_nofollow: false,
        })
        .collect();

    let score = calculate_seo_score(&signals, &[]);
    // every bonus fires but nothing exceeds 100
    assert_eq!(score.overall, 100);
}

#[test]
fn test_bonus_offsets_a_deduction() {
    let mut signals = PageSignals::default();
    signals.word_count = 1000;
    let issues = vec![SeoIssue {
        severity: IssueSeverity::Warning,
        category: IssueCategory::Content,
        message: String::new(),
        recommendation: String::new(),
    }];

    let score = calculate_seo_score(&signals, &issues);
    assert_eq!(score.content, 97); // 100 - 8 + 5
}

#[test]
fn test_end_to_end_short_title_page() {
    let html = "<html><head><title>Short</title></head><body><h1>Hi</h1></body></html>";
    let signals = extract(html, "http://example.com");

    let issues = analyze_issues(&signals);
    assert!(issues.iter().any(|i| i.message.contains("Title tag too short")));
    assert!(issues.iter().any(|i| i.message == "Missing meta description"
        && i.severity == IssueSeverity::Error));
    assert!(!issues.iter().any(|i| i.message.contains("H1")));

    let score = calculate_seo_score(&signals, &issues);
    assert!(score.on_page < 100);
}

#[test]
fn test_on_page_score_components() {
    let signals = signals_with_text(&"word ".repeat(800));
    let analysis = analyze_keyword("missing", &signals, "https://example.com");
    // no placements, density out of window (0), long content
    assert_eq!(on_page_score(&analysis, signals.word_count), 15);
}

#[test]
fn test_optimization_suggestions_for_unoptimized_page() {
    let signals = signals_with_text("plain words only here");
    let analysis = analyze_keyword("seo", &signals, "https://example.com");
    let readability = calculate_readability(&signals.text_content);
    let related = vec![ScoredKeyword {
        keyword: "words".to_string(),
        score: 1.0,
    }];

    let suggestions = optimization_suggestions(&analysis, &signals, &readability, &related);
    assert!(suggestions.iter().any(|s| s.contains("title tag")));
    assert!(suggestions.iter().any(|s| s.contains("meta description")));
    assert!(suggestions.iter().any(|s| s.contains("H1 heading")));
    assert!(suggestions.iter().any(|s| s.contains("related terms: words")));
}
