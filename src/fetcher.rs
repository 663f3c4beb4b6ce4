use anyhow::Result;
use futures::future::join_all;
use reqwest::{Client, ClientBuilder, header};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Common HTTP headers used for all requests
const USER_AGENT: &str = "Mozilla/5.0 (compatible; seoscope/0.1; +https://github.com/seoscope/seoscope)";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// A fetched page. Transport failures never surface as errors; they land in
/// the `error` field with an empty body and status 0 so callers can decide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: String,
    pub html: String,
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub load_time_ms: u64,
    pub error: Option<String>,
}

/// Creates a reqwest client with standard headers and configuration
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, ACCEPT.parse()?);
    headers.insert(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE.parse()?);

    let client = ClientBuilder::new()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;

    Ok(client)
}

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
        })
    }

    /// Fetch a single page, following redirects and timing the request.
    pub async fn fetch(&self, url: &str) -> FetchedPage {
        // Ensure URL has a protocol
        let normalized_url = if url.starts_with("http") {
            url.to_string()
        } else {
            format!("https://{}", url)
        };

        let start = Instant::now();
        let response = match self.client.get(&normalized_url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %normalized_url, error = %e, "Failed to fetch page");
                return FetchedPage {
                    url: normalized_url,
                    html: String::new(),
                    status_code: 0,
                    headers: HashMap::new(),
                    load_time_ms: start.elapsed().as_millis() as u64,
                    error: Some(e.to_string()),
                };
            }
        };

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();

        match response.text().await {
            Ok(html) => FetchedPage {
                url: final_url,
                html,
                status_code,
                headers,
                load_time_ms: start.elapsed().as_millis() as u64,
                error: None,
            },
            Err(e) => {
                tracing::warn!(url = %final_url, error = %e, "Failed to read response body");
                FetchedPage {
                    url: final_url,
                    html: String::new(),
                    status_code,
                    headers,
                    load_time_ms: start.elapsed().as_millis() as u64,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Fetch several pages concurrently, preserving input order.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<FetchedPage> {
        join_all(urls.iter().map(|url| self.fetch(url))).await
    }
}
