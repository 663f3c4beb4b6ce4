use crate::models::{CommonKeyword, GapSummary, MissingKeyword, Opportunity, PageSignals, ScoredKeyword};
use crate::text_metrics::extract_keywords;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Keywords the competitor covers that our side is missing entirely.
/// Matching is case-insensitive; each entry carries an opportunity tier
/// derived from the competitor's score.
pub fn find_missing(ours: &[ScoredKeyword], competitor: &[ScoredKeyword]) -> Vec<MissingKeyword> {
    let our_set: HashSet<String> = ours.iter().map(|k| k.keyword.to_lowercase()).collect();

    competitor
        .iter()
        .filter(|k| !our_set.contains(&k.keyword.to_lowercase()))
        .map(|k| MissingKeyword {
            keyword: k.keyword.clone(),
            score: k.score,
            opportunity: Opportunity::from_score(k.score),
        })
        .collect()
}

/// Keywords both sides cover, sorted by the competitor's score descending.
pub fn find_common(ours: &[ScoredKeyword], competitor: &[ScoredKeyword]) -> Vec<CommonKeyword> {
    let competitor_scores: HashMap<String, f64> = competitor
        .iter()
        .map(|k| (k.keyword.to_lowercase(), k.score))
        .collect();

    let mut common: Vec<CommonKeyword> = ours
        .iter()
        .filter_map(|k| {
            competitor_scores
                .get(&k.keyword.to_lowercase())
                .map(|&competitor_score| CommonKeyword {
                    keyword: k.keyword.clone(),
                    our_score: k.score,
                    competitor_score,
                })
        })
        .collect();

    common.sort_by(|a, b| {
        b.competitor_score
            .partial_cmp(&a.competitor_score)
            .unwrap_or(Ordering::Equal)
    });
    common
}

/// Build a domain's keyword profile from extracted page signals: top content
/// keywords merged with title/meta/heading keywords boosted at half weight.
pub fn domain_keyword_profile(signals: &PageSignals) -> Vec<ScoredKeyword> {
    let content_keywords = extract_keywords(&signals.text_content, 50);

    let mut meta_text = vec![signals.title.clone(), signals.meta_description.clone()];
    meta_text.extend(signals.h1.iter().cloned());
    meta_text.extend(signals.h2.iter().cloned());
    let meta_keywords = extract_keywords(&meta_text.join(" "), 20);

    let mut scores: HashMap<String, f64> = HashMap::new();
    let mut seen_order: Vec<String> = Vec::new();

    for kw in content_keywords {
        if !scores.contains_key(&kw.keyword) {
            seen_order.push(kw.keyword.clone());
        }
        scores.insert(kw.keyword, kw.score);
    }
    for kw in meta_keywords {
        let entry = scores.entry(kw.keyword.clone()).or_insert_with(|| {
            seen_order.push(kw.keyword.clone());
            0.0
        });
        *entry = (*entry + kw.score * 0.5).min(1.0);
    }

    let mut profile: Vec<ScoredKeyword> = seen_order
        .into_iter()
        .map(|keyword| {
            let score = scores[&keyword];
            ScoredKeyword { keyword, score }
        })
        .collect();

    profile.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    profile.truncate(50);
    profile
}

pub fn summarize(
    ours: &[ScoredKeyword],
    competitor: &[ScoredKeyword],
    missing: &[MissingKeyword],
    common: &[CommonKeyword],
    unique: &[MissingKeyword],
) -> GapSummary {
    let gap_percentage = if ours.is_empty() {
        100
    } else if competitor.is_empty() {
        0
    } else {
        (missing.len() as f64 / competitor.len() as f64 * 100.0).round() as u32
    };

    GapSummary {
        total_our_keywords: ours.len(),
        total_competitor_keywords: competitor.len(),
        missing_count: missing.len(),
        common_count: common.len(),
        unique_count: unique.len(),
        gap_percentage,
    }
}
