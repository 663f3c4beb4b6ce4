use crate::fetcher::build_http_client;
use crate::models::{KeywordIdeas, KeywordMetrics, Opportunity};
use anyhow::Result;
use futures::future::join_all;
use reqwest::Client;
use url::Url;

/// Injectable randomness source for the estimation helpers, so tests can
/// pin deterministic output.
pub trait Jitter {
    /// A uniform sample in [0, 1).
    fn unit(&mut self) -> f64;
}

/// Default jitter backed by the thread-local RNG.
pub struct ThreadRngJitter;

impl Jitter for ThreadRngJitter {
    fn unit(&mut self) -> f64 {
        rand::random()
    }
}

/// Fixed jitter for deterministic tests.
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn unit(&mut self) -> f64 {
        self.0
    }
}

/// "People also ask" style question templates for a keyword.
pub fn questions(keyword: &str) -> Vec<String> {
    [
        format!("What is {}?", keyword),
        format!("How does {} work?", keyword),
        format!("Why is {} important?", keyword),
        format!("How to use {}?", keyword),
        format!("What are the benefits of {}?", keyword),
        format!("Is {} worth it?", keyword),
        format!("How much does {} cost?", keyword),
        format!("What is the best {}?", keyword),
        format!("{} vs alternatives?", keyword),
        format!("How to get started with {}?", keyword),
    ]
    .into()
}

/// Heuristic keyword difficulty in [1, 100]. Not backed by real ranking
/// data: long-tail phrases, questions and modifier keywords score easier,
/// short generic terms harder.
pub fn estimate_difficulty(keyword: &str, suggestions: &[String]) -> u32 {
    let mut difficulty: i32 = 50;

    let word_count = keyword.split_whitespace().count();
    match word_count {
        1 => difficulty += 20,
        2 => difficulty += 10,
        n if n >= 4 => difficulty -= 15,
        _ => {}
    }

    // Brand-like single words are usually harder
    if word_count == 1 && keyword.chars().count() <= 6 {
        difficulty += 15;
    }

    let lower = keyword.to_lowercase();
    let question_starters = [
        "what", "how", "why", "when", "where", "who", "is", "can", "does",
    ];
    if question_starters.iter().any(|s| lower.starts_with(s)) {
        difficulty -= 10;
    }

    let modifiers = [
        "best",
        "top",
        "cheap",
        "free",
        "review",
        "vs",
        "alternative",
        "tutorial",
        "guide",
    ];
    if modifiers.iter().any(|m| lower.contains(m)) {
        difficulty -= 10;
    }

    if suggestions.len() > 20 {
        difficulty += 5;
    }

    difficulty.clamp(1, 100) as u32
}

/// Heuristic monthly search volume estimate, with jittered variance.
pub fn estimate_volume(keyword: &str, suggestions: &[String], jitter: &mut dyn Jitter) -> u64 {
    let mut base_volume = 5000.0;

    match keyword.split_whitespace().count() {
        1 => base_volume *= 10.0,
        2 => base_volume *= 3.0,
        n if n >= 4 => base_volume *= 0.3,
        _ => {}
    }

    base_volume *= 1.0 + suggestions.len() as f64 * 0.05;

    let variance = 0.5 + jitter.unit();
    (base_volume * variance).round() as u64
}

pub struct KeywordResearcher {
    client: Client,
}

impl KeywordResearcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
        })
    }

    /// Autocomplete suggestions for a single query. Failures degrade to an
    /// empty list; suggestion data is a nicety, not a requirement.
    async fn suggestions_for(&self, query: &str) -> Vec<String> {
        let endpoint = match Url::parse_with_params(
            "https://suggestqueries.google.com/complete/search",
            &[("client", "firefox"), ("q", query)],
        ) {
            Ok(url) => url,
            Err(_) => return Vec::new(),
        };

        let response = match self.client.get(endpoint).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::debug!(query = %query, status = %response.status(), "Suggestion lookup rejected");
                return Vec::new();
            }
            Err(e) => {
                tracing::debug!(query = %query, error = %e, "Suggestion lookup failed");
                return Vec::new();
            }
        };

        // Response format: [query, [suggestions]]
        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(_) => return Vec::new(),
        };
        body.get(1)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|s| s.as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Expanded keyword variations gathered from several suggestion queries.
    pub async fn variations(&self, keyword: &str) -> Vec<String> {
        let queries = [
            keyword.to_string(),
            format!("{} a", keyword),
            format!("{} b", keyword),
            format!("{} for", keyword),
            format!("{} vs", keyword),
        ];

        let results = join_all(queries.iter().map(|q| self.suggestions_for(q))).await;

        let keyword_lower = keyword.to_lowercase();
        let mut variations: Vec<String> = Vec::new();
        for suggestion in results.into_iter().flatten() {
            if suggestion.to_lowercase() != keyword_lower && !variations.contains(&suggestion) {
                variations.push(suggestion);
            }
        }
        variations.truncate(30);
        variations
    }

    /// Full keyword research: suggestions, questions, and heuristic
    /// difficulty / volume / CPC / trend estimates.
    pub async fn research(&self, keyword: &str, jitter: &mut dyn Jitter) -> KeywordIdeas {
        let suggestions = self.variations(keyword).await;
        let questions = questions(keyword);

        let difficulty = estimate_difficulty(keyword, &suggestions);
        let volume = estimate_volume(keyword, &suggestions, jitter);

        let opportunity = if difficulty < 30 && volume > 5000 {
            Opportunity::High
        } else if difficulty < 50 && volume > 2000 {
            Opportunity::Medium
        } else if difficulty >= 70 {
            Opportunity::Low
        } else {
            Opportunity::Medium
        };

        let (long_tail_keywords, related_terms): (Vec<String>, Vec<String>) = suggestions
            .iter()
            .cloned()
            .partition(|s| s.split_whitespace().count() >= 3);

        let competition = if difficulty > 60 {
            "High"
        } else if difficulty > 30 {
            "Medium"
        } else {
            "Low"
        };
        let metrics = KeywordMetrics {
            estimated_cpc: format!("${:.2}", jitter.unit() * 5.0 + 0.5),
            competition: competition.to_string(),
            trend: if jitter.unit() > 0.5 { "Rising" } else { "Stable" }.to_string(),
        };

        KeywordIdeas {
            keyword: keyword.to_string(),
            suggestions,
            long_tail_keywords,
            related_terms,
            questions,
            difficulty,
            volume,
            opportunity,
            metrics,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
