use crate::fetcher::build_http_client;
use crate::models::{RankCheck, SerpResult};
use anyhow::Result;
use governor::{
    Quota, RateLimiter, clock::DefaultClock, state::InMemoryState, state::direct::NotKeyed,
};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

// Google blocks obvious bots quickly; rotate through a small pool of real
// browser user agents. Rotation is a round-robin so behavior is pinnable.
const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

static RESULT_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"href="(https?://[^"]+)""#).expect("result url pattern should be valid")
});

fn google_domain(country: &str) -> &'static str {
    match country.to_uppercase().as_str() {
        "IN" => "google.co.in",
        "UK" => "google.co.uk",
        "CA" => "google.ca",
        "AU" => "google.com.au",
        "DE" => "google.de",
        "FR" => "google.fr",
        "AE" => "google.ae",
        "SG" => "google.com.sg",
        _ => "google.com",
    }
}

fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| url.to_string())
}

/// Parse organic result URLs out of a raw SERP page.
///
/// Screen-scraping an unversioned page layout is inherently fragile; this
/// only relies on href attributes and filters out Google's own properties.
pub fn parse_results(html: &str) -> Vec<SerpResult> {
    let mut urls: Vec<String> = Vec::new();

    for caps in RESULT_URL_RE.captures_iter(html) {
        let url = caps[1].to_string();
        if url.contains("google.com")
            || url.contains("youtube.com/results")
            || url.contains("webcache")
            || urls.contains(&url)
        {
            continue;
        }
        urls.push(url);
    }

    urls.into_iter()
        .take(100)
        .enumerate()
        .map(|(index, url)| SerpResult {
            position: index as u32 + 1,
            domain: extract_domain(&url),
            url,
        })
        .collect()
}

/// Best-effort Google rank lookup. Any transport or parse failure degrades
/// to `position: None`; a rank check never fails the surrounding command.
pub struct RankChecker {
    client: Client,
    rate_limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    ua_cursor: AtomicUsize,
}

impl RankChecker {
    pub fn new(timeout_secs: u64, requests_per_second: Option<f64>) -> Result<Self> {
        let rate_limiter = requests_per_second
            .and_then(|rps| NonZeroU32::new(rps.ceil() as u32))
            .map(|quota| RateLimiter::direct(Quota::per_second(quota)));

        Ok(Self {
            client: build_http_client(timeout_secs)?,
            rate_limiter,
            ua_cursor: AtomicUsize::new(0),
        })
    }

    fn next_user_agent(&self) -> &'static str {
        let index = self.ua_cursor.fetch_add(1, Ordering::Relaxed);
        USER_AGENTS[index % USER_AGENTS.len()]
    }

    pub async fn check(
        &self,
        keyword: &str,
        target_domain: &str,
        country: &str,
        city: Option<&str>,
    ) -> RankCheck {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let location = match city {
            Some(city) => format!("{}, {}", city, country),
            None => country.to_string(),
        };

        let results = match self.fetch_serp(keyword, country, city).await {
            Ok(html) => parse_results(&html),
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "SERP lookup failed");
                Vec::new()
            }
        };

        let target = target_domain.trim_start_matches("www.").to_lowercase();
        let hit = results
            .iter()
            .find(|r| r.domain.to_lowercase().contains(&target));
        let (position, url) = match hit {
            Some(r) => (Some(r.position), Some(r.url.clone())),
            None => (None, None),
        };

        let mut top_results = results;
        top_results.truncate(10);

        RankCheck {
            keyword: keyword.to_string(),
            target_domain: target_domain.to_string(),
            position,
            url,
            top_results,
            checked_at: chrono::Utc::now().to_rfc3339(),
            location,
        }
    }

    /// Check several keywords sequentially, honoring the rate limit between
    /// SERP requests.
    pub async fn check_batch(
        &self,
        keywords: &[String],
        target_domain: &str,
        country: &str,
        city: Option<&str>,
    ) -> Vec<RankCheck> {
        let mut checks = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            checks.push(self.check(keyword, target_domain, country, city).await);
        }
        checks
    }

    async fn fetch_serp(
        &self,
        keyword: &str,
        country: &str,
        city: Option<&str>,
    ) -> Result<String> {
        let mut search_url = Url::parse(&format!("https://www.{}/search", google_domain(country)))?;
        {
            let mut pairs = search_url.query_pairs_mut();
            pairs.append_pair("q", keyword);
            pairs.append_pair("num", "100");
            pairs.append_pair("hl", "en");
            if let Some(city) = city {
                pairs.append_pair("near", city);
            }
            pairs.append_pair("gl", &country.to_lowercase());
        }

        let response = self
            .client
            .get(search_url)
            .header(reqwest::header::USER_AGENT, self.next_user_agent())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}
