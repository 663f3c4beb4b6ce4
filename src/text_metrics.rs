use crate::models::{ReadabilityMetrics, ScoredKeyword};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence split pattern should be valid"));
static NON_ALPHANUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("token cleanup pattern should be valid"));

// Common English stop words filtered out of keyword extraction.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
        "it", "its", "of", "on", "that", "the", "to", "was", "were", "will", "with", "this", "but",
        "they", "have", "had", "what", "when", "where", "who", "which", "why", "how", "all",
        "each", "every", "both", "few", "more", "most", "other", "some", "such", "no", "nor",
        "not", "only", "own", "same", "so", "than", "too", "very", "just", "can", "should", "now",
        "also", "been", "being", "do", "does", "did", "done", "get", "got", "your", "you", "our",
        "we", "us", "my", "me", "i", "if", "or", "any", "about", "into", "through", "during",
        "before", "after", "above", "below", "up", "down", "out", "off", "over", "under", "again",
        "further", "then", "once", "here", "there", "these", "those", "am", "would", "could",
        "may", "might", "must", "shall", "need", "let", "like", "new", "one", "two", "first",
        "last", "many",
    ]
    .into_iter()
    .collect()
});

/// Flesch readability metrics over arbitrary text.
///
/// Text with no words or no sentences yields all-zero metrics and the
/// level label "N/A".
pub fn calculate_readability(text: &str) -> ReadabilityMetrics {
    let sentence_count = SENTENCE_SPLIT_RE
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.is_empty() || sentence_count == 0 {
        return ReadabilityMetrics {
            flesch_reading_ease: 0.0,
            flesch_kincaid_grade: 0.0,
            avg_sentence_length: 0.0,
            avg_word_length: 0.0,
            readability_level: "N/A".to_string(),
        };
    }

    let total_syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let word_count = words.len() as f64;
    let avg_sentence_length = word_count / sentence_count as f64;
    let avg_syllables_per_word = total_syllables as f64 / word_count;
    let avg_word_length =
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count;

    let flesch_reading_ease = (206.835 - 1.015 * avg_sentence_length
        - 84.6 * avg_syllables_per_word)
        .clamp(0.0, 100.0);
    let flesch_kincaid_grade =
        (0.39 * avg_sentence_length + 11.8 * avg_syllables_per_word - 15.59).max(0.0);

    ReadabilityMetrics {
        flesch_reading_ease: round1(flesch_reading_ease),
        flesch_kincaid_grade: round1(flesch_kincaid_grade),
        avg_sentence_length: round1(avg_sentence_length),
        avg_word_length: round1(avg_word_length),
        readability_level: readability_level(flesch_reading_ease).to_string(),
    }
}

fn readability_level(flesch_reading_ease: f64) -> &'static str {
    if flesch_reading_ease >= 90.0 {
        "Very Easy (5th grade)"
    } else if flesch_reading_ease >= 80.0 {
        "Easy (6th grade)"
    } else if flesch_reading_ease >= 70.0 {
        "Fairly Easy (7th grade)"
    } else if flesch_reading_ease >= 60.0 {
        "Standard (8th-9th grade)"
    } else if flesch_reading_ease >= 50.0 {
        "Fairly Difficult (10th-12th grade)"
    } else if flesch_reading_ease >= 30.0 {
        "Difficult (College)"
    } else {
        "Very Difficult (Graduate)"
    }
}

/// Approximate syllable count for an English word.
///
/// Vowel-group counting with two common adjustments: a trailing silent `e`
/// drops a syllable, and a consonant + `le` ending adds one back. Words of
/// three letters or fewer count as one syllable, and the floor is always 1.
fn count_syllables(word: &str) -> usize {
    let word: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    if word.len() <= 3 {
        return 1;
    }

    let is_vowel = |c: u8| matches!(c, b'a' | b'e' | b'i' | b'o' | b'u' | b'y');
    let bytes = word.as_bytes();

    let mut groups = 0i32;
    let mut in_group = false;
    for &b in bytes {
        if is_vowel(b) {
            if !in_group {
                groups += 1;
            }
            in_group = true;
        } else {
            in_group = false;
        }
    }

    let mut syllables = if groups == 0 { 1 } else { groups };
    if word.ends_with('e') {
        syllables -= 1;
    }
    if word.ends_with("le") && !is_vowel(bytes[bytes.len() - 3]) {
        syllables += 1;
    }

    syllables.max(1) as usize
}

/// Top-N keywords scored by frequency, normalized by the most frequent
/// token. Tokens are lowercased, stripped of punctuation, and filtered
/// against the stop-word list; anything of two characters or fewer is
/// dropped. Equal scores keep first-seen order.
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<ScoredKeyword> {
    let lowered = text.to_lowercase();
    let cleaned = NON_ALPHANUMERIC_RE.replace_all(&lowered, " ");

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut seen_order: Vec<&str> = Vec::new();
    for token in cleaned.split_whitespace() {
        if token.len() <= 2 || STOP_WORDS.contains(token) {
            continue;
        }
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            seen_order.push(token);
        }
        *count += 1;
    }

    let Some(max_frequency) = counts.values().max().copied() else {
        return Vec::new();
    };

    let mut scored: Vec<ScoredKeyword> = seen_order
        .into_iter()
        .map(|token| ScoredKeyword {
            keyword: token.to_string(),
            score: round2(counts[token] as f64 / max_frequency as f64),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(top_n);
    scored
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
