pub mod analyzer;
pub mod audit_log;
pub mod cli;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod gap;
pub mod models;
pub mod rank;
pub mod reporter;
pub mod research;
pub mod text_metrics;

use anyhow::Result;
use audit_log::AuditLog;
use cli::{Cli, Command};
use colored::*;
use config::Config;
use fetcher::{FetchedPage, PageFetcher};
use models::{AuditReport, GapReport, KeywordReport, OnPageReport};
use rank::RankChecker;
use reporter::Reporter;
use research::{KeywordResearcher, ThreadRngJitter};
use serde::Serialize;
use std::path::Path;

pub async fn run(args: Cli) -> Result<()> {
    // Config file values fill in whatever the CLI left at its default
    let config = match &args.config {
        Some(path) => Config::from_file(Path::new(path))?,
        None => Config::from_default_paths()?.unwrap_or_default(),
    };
    let args = config.merge_with_cli(&args);

    if args.output != "json" {
        println!(
            "{}",
            "Seoscope - SEO Analysis Toolkit".bright_cyan().bold()
        );
        println!("{}", "=".repeat(50).bright_blue());
    }

    let log = args.log.as_ref().map(AuditLog::new);

    match args.command.clone() {
        Command::Audit { url } => audit(&url, &args, log.as_ref()).await,
        Command::Check { url, keyword } => check(&url, &keyword, &args, log.as_ref()).await,
        Command::Keywords { url, top } => keywords(&url, top, &args, log.as_ref()).await,
        Command::Gap { domain, competitor } => {
            keyword_gap(&domain, &competitor, &args, log.as_ref()).await
        }
        Command::Rank {
            domain,
            keyword,
            country,
            city,
        } => rank_check(&domain, &keyword, &country, city.as_deref(), &args, log.as_ref()).await,
        Command::Research { keyword } => research_keyword(&keyword, &args, log.as_ref()).await,
    }
}

/// Fetch a page and fail the command on transport errors or 4xx/5xx, the
/// way a handler would reject an unreachable audit target.
async fn fetch_page(url: &str, args: &Cli) -> Result<FetchedPage> {
    if args.verbose {
        println!("{} {}", "Fetching:".bright_yellow(), url);
    }

    let fetcher = PageFetcher::new(args.timeout)?;
    let page = fetcher.fetch(url).await;

    if let Some(error) = &page.error {
        anyhow::bail!("Failed to fetch page: {}", error);
    }
    if page.status_code >= 400 {
        anyhow::bail!("Page returned status code {}", page.status_code);
    }

    Ok(page)
}

fn emit<T: Serialize>(report: &T, args: &Cli, print_text: impl FnOnce()) -> Result<()> {
    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(report)?),
        _ => print_text(),
    }

    if let Some(filename) = &args.save {
        Reporter::save_json_report(report, filename)?;
    }

    Ok(())
}

fn record(log: Option<&AuditLog>, kind: &str, payload: &impl Serialize) {
    if let Some(log) = log
        && let Err(e) = log.record(kind, payload)
    {
        tracing::warn!(error = %e, "Failed to write audit log entry");
    }
}

async fn audit(url: &str, args: &Cli, log: Option<&AuditLog>) -> Result<()> {
    let page = fetch_page(url, args).await?;
    let signals = extractor::extract(&page.html, &page.url);

    let issues = analyzer::analyze_issues(&signals);
    let score = analyzer::calculate_seo_score(&signals, &issues);
    let readability = text_metrics::calculate_readability(&signals.text_content);
    let top_keywords = text_metrics::extract_keywords(&signals.text_content, 10);

    let report = AuditReport {
        url: page.url.clone(),
        status_code: page.status_code,
        load_time_ms: page.load_time_ms,
        ssl_enabled: page.url.starts_with("https://"),
        signals,
        readability,
        top_keywords,
        score,
        issues,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    emit(&report, args, || Reporter::print_audit_report(&report))?;
    record(log, "audit", &report);
    Ok(())
}

async fn check(url: &str, keyword: &str, args: &Cli, log: Option<&AuditLog>) -> Result<()> {
    let page = fetch_page(url, args).await?;
    let signals = extractor::extract(&page.html, &page.url);

    let analysis = analyzer::analyze_keyword(keyword, &signals, &page.url);
    let readability = text_metrics::calculate_readability(&signals.text_content);
    let related = text_metrics::extract_keywords(&signals.text_content, 20);
    let suggestions =
        analyzer::optimization_suggestions(&analysis, &signals, &readability, &related);
    let on_page_score = analyzer::on_page_score(&analysis, signals.word_count);

    let mut related_keywords = related;
    related_keywords.truncate(15);

    let report = OnPageReport {
        url: page.url,
        keyword: keyword.to_string(),
        analysis,
        readability,
        on_page_score,
        suggestions,
        related_keywords,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    emit(&report, args, || Reporter::print_on_page_report(&report))?;
    record(log, "check", &report);
    Ok(())
}

async fn keywords(url: &str, top: usize, args: &Cli, log: Option<&AuditLog>) -> Result<()> {
    let page = fetch_page(url, args).await?;
    let signals = extractor::extract(&page.html, &page.url);

    let report = KeywordReport {
        url: page.url,
        keywords: text_metrics::extract_keywords(&signals.text_content, top),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    emit(&report, args, || Reporter::print_keyword_report(&report))?;
    record(log, "keywords", &report);
    Ok(())
}

/// Strip scheme, leading www. and trailing slashes from a user-supplied
/// domain so both gap inputs compare the same way.
fn normalize_domain(domain: &str) -> String {
    let domain = domain.trim();
    let domain = domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(domain);
    let domain = domain.strip_prefix("www.").unwrap_or(domain);
    domain.trim_end_matches('/').to_string()
}

async fn keyword_gap(
    domain: &str,
    competitor: &str,
    args: &Cli,
    log: Option<&AuditLog>,
) -> Result<()> {
    let our_domain = normalize_domain(domain);
    let competitor_domain = normalize_domain(competitor);

    let fetcher = PageFetcher::new(args.timeout)?;
    let urls = vec![
        format!("https://{}", our_domain),
        format!("https://{}", competitor_domain),
    ];

    if args.verbose {
        println!(
            "{} {} and {}",
            "Fetching:".bright_yellow(),
            urls[0],
            urls[1]
        );
    }

    let pages = fetcher.fetch_all(&urls).await;
    let profile = |page: &FetchedPage, url: &str| {
        if page.error.is_some() || page.status_code >= 400 {
            tracing::warn!(url = %url, "Domain could not be fetched for gap analysis");
            return Vec::new();
        }
        gap::domain_keyword_profile(&extractor::extract(&page.html, url))
    };

    let our_keywords = profile(&pages[0], &urls[0]);
    let competitor_keywords = profile(&pages[1], &urls[1]);

    if competitor_keywords.is_empty() {
        anyhow::bail!(
            "Could not analyze competitor domain: {}. Make sure the URL is accessible.",
            competitor_domain
        );
    }

    let missing = gap::find_missing(&our_keywords, &competitor_keywords);
    let common = gap::find_common(&our_keywords, &competitor_keywords);
    let unique = gap::find_missing(&competitor_keywords, &our_keywords);
    let summary = gap::summarize(&our_keywords, &competitor_keywords, &missing, &common, &unique);

    let report = GapReport {
        our_domain,
        competitor_domain,
        summary,
        missing,
        common,
        unique,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    emit(&report, args, || Reporter::print_gap_report(&report))?;
    record(log, "gap", &report);
    Ok(())
}

async fn rank_check(
    domain: &str,
    keywords: &[String],
    country: &str,
    city: Option<&str>,
    args: &Cli,
    log: Option<&AuditLog>,
) -> Result<()> {
    let checker = RankChecker::new(args.timeout, args.rate_limit)?;
    let target = normalize_domain(domain);

    if args.verbose {
        println!(
            "{} {} keyword(s) for {}",
            "Checking:".bright_yellow(),
            keywords.len(),
            target
        );
    }

    let checks = checker.check_batch(keywords, &target, country, city).await;

    emit(&checks, args, || Reporter::print_rank_report(&checks))?;
    record(log, "rank", &checks);
    Ok(())
}

async fn research_keyword(keyword: &str, args: &Cli, log: Option<&AuditLog>) -> Result<()> {
    let researcher = KeywordResearcher::new(args.timeout)?;
    let mut jitter = ThreadRngJitter;
    let report = researcher.research(keyword, &mut jitter).await;

    emit(&report, args, || Reporter::print_research_report(&report))?;
    record(log, "research", &report);
    Ok(())
}
