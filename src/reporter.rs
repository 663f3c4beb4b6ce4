use crate::models::{
    AuditReport, GapReport, IssueSeverity, KeywordIdeas, KeywordReport, OnPageReport, RankCheck,
    SeoIssue,
};
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::fs::File;
use std::io::Write;

pub struct Reporter;

impl Reporter {
    fn header(title: &str) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", title.bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();
    }

    fn score_value(score: u32) -> ColoredString {
        if score >= 80 {
            score.to_string().bright_green()
        } else if score >= 50 {
            score.to_string().yellow()
        } else {
            score.to_string().bright_red()
        }
    }

    fn print_issues(issues: &[SeoIssue]) {
        if issues.is_empty() {
            println!("  {}", "No issues detected".bright_green());
            return;
        }

        for issue in issues {
            let severity_str = match issue.severity {
                IssueSeverity::Error => "ERROR".bright_red(),
                IssueSeverity::Warning => "WARN ".yellow(),
                IssueSeverity::Info => "INFO ".bright_cyan(),
            };
            println!(
                "  [{}] {} {}",
                severity_str,
                format!("({})", issue.category).dimmed(),
                issue.message
            );
            println!("          {}", issue.recommendation.dimmed());
        }
    }

    pub fn print_audit_report(report: &AuditReport) {
        Self::header("Seoscope - SEO Audit");

        println!("{}: {}", "URL".bright_white().bold(), report.url);
        println!("{}: {}", "Timestamp".bright_white().bold(), report.timestamp);
        println!(
            "{}: {} ({} ms)",
            "Status".bright_white().bold(),
            report.status_code,
            report.load_time_ms
        );
        println!();

        println!("{}", "Score".bright_yellow().bold().underline());
        println!("  Overall:   {}", Self::score_value(report.score.overall));
        println!("  Content:   {}", Self::score_value(report.score.content));
        println!("  Technical: {}", Self::score_value(report.score.technical));
        println!("  On-Page:   {}", Self::score_value(report.score.on_page));
        println!("  Links:     {}", Self::score_value(report.score.links));
        println!();

        let signals = &report.signals;
        println!("{}", "Page".bright_yellow().bold().underline());
        println!(
            "  Title:            {} ({} chars)",
            signals.title.bright_white(),
            signals.title.chars().count()
        );
        println!(
            "  Meta Description: {} chars",
            signals.meta_description.chars().count()
        );
        println!(
            "  Headings:         h1 x{}, h2 x{}, h3 x{}",
            signals.h1.len(),
            signals.h2.len(),
            signals.h3.len()
        );
        println!(
            "  Links:            {} internal, {} external",
            signals.internal_links.len(),
            signals.external_links.len()
        );
        println!(
            "  Images:           {} total, {} missing alt",
            signals.images.len(),
            signals.images_without_alt.len()
        );
        println!("  Word Count:       {}", signals.word_count);
        println!(
            "  Readability:      {} ({})",
            report.readability.flesch_reading_ease, report.readability.readability_level
        );
        println!(
            "  SSL:              {}",
            if report.ssl_enabled {
                "yes".bright_green()
            } else {
                "no".bright_red()
            }
        );
        println!(
            "  Structured Data:  {}",
            if signals.schema_markup.is_empty() {
                "none".yellow()
            } else {
                format!("{} block(s)", signals.schema_markup.len()).bright_green()
            }
        );
        println!();

        if !report.top_keywords.is_empty() {
            println!("{}", "Top Keywords".bright_yellow().bold().underline());
            for kw in &report.top_keywords {
                println!("  {:<24} {:.2}", kw.keyword, kw.score);
            }
            println!();
        }

        println!("{}", "Issues".bright_yellow().bold().underline());
        Self::print_issues(&report.issues);

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn print_on_page_report(report: &OnPageReport) {
        Self::header("Seoscope - On-Page Keyword Check");

        println!("{}: {}", "URL".bright_white().bold(), report.url);
        println!(
            "{}: {}",
            "Keyword".bright_white().bold(),
            report.keyword.bright_cyan()
        );
        println!();

        let analysis = &report.analysis;
        let flag = |present: bool| {
            if present {
                "yes".bright_green()
            } else {
                "no".bright_red()
            }
        };

        println!("{}", "Placement".bright_yellow().bold().underline());
        println!("  Title:            {}", flag(analysis.in_title));
        println!("  Meta Description: {}", flag(analysis.in_meta_description));
        println!("  H1:               {}", flag(analysis.in_h1));
        println!("  H2:               {}", flag(analysis.in_h2));
        println!("  URL:              {}", flag(analysis.in_url));
        println!();

        println!("{}", "Metrics".bright_yellow().bold().underline());
        println!("  Occurrences:      {}", analysis.count);
        println!("  Density:          {}%", analysis.density);
        println!(
            "  Prominence:       {}",
            Self::score_value(analysis.prominence_score)
        );
        println!(
            "  On-Page Score:    {}",
            Self::score_value(report.on_page_score)
        );
        println!(
            "  Readability:      {} ({})",
            report.readability.flesch_reading_ease, report.readability.readability_level
        );
        println!();

        if !report.suggestions.is_empty() {
            println!("{}", "Suggestions".bright_yellow().bold().underline());
            for suggestion in &report.suggestions {
                println!("  - {}", suggestion);
            }
            println!();
        }

        if !report.related_keywords.is_empty() {
            println!("{}", "Related Keywords".bright_yellow().bold().underline());
            for kw in report.related_keywords.iter().take(10) {
                println!("  {:<24} {:.2}", kw.keyword, kw.score);
            }
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn print_keyword_report(report: &KeywordReport) {
        Self::header("Seoscope - Keyword Extraction");

        println!("{}: {}", "URL".bright_white().bold(), report.url);
        println!();

        if report.keywords.is_empty() {
            println!("  {}", "No keywords found".yellow());
        } else {
            for kw in &report.keywords {
                println!("  {:<28} {:.2}", kw.keyword, kw.score);
            }
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn print_gap_report(report: &GapReport) {
        Self::header("Seoscope - Keyword Gap Analysis");

        println!("{}: {}", "Your Domain".bright_white().bold(), report.our_domain);
        println!(
            "{}: {}",
            "Competitor".bright_white().bold(),
            report.competitor_domain
        );
        println!();

        let summary = &report.summary;
        println!("{}", "Summary".bright_yellow().bold().underline());
        println!("  Your Keywords:        {}", summary.total_our_keywords);
        println!("  Competitor Keywords:  {}", summary.total_competitor_keywords);
        println!(
            "  Missing:              {}",
            summary.missing_count.to_string().bright_red()
        );
        println!(
            "  Common:               {}",
            summary.common_count.to_string().bright_green()
        );
        println!("  Unique to You:        {}", summary.unique_count);
        println!("  Gap:                  {}%", summary.gap_percentage);
        println!();

        if !report.missing.is_empty() {
            println!(
                "{}",
                "Missing Keywords (competitor has, you don't)"
                    .bright_yellow()
                    .bold()
                    .underline()
            );
            for kw in report.missing.iter().take(20) {
                let opportunity = match kw.opportunity {
                    crate::models::Opportunity::High => "High".bright_green(),
                    crate::models::Opportunity::Medium => "Medium".yellow(),
                    crate::models::Opportunity::Low => "Low".dimmed(),
                };
                println!("  {:<28} {:.2}  [{}]", kw.keyword, kw.score, opportunity);
            }
            println!();
        }

        if !report.common.is_empty() {
            println!("{}", "Common Keywords".bright_yellow().bold().underline());
            for kw in report.common.iter().take(20) {
                println!(
                    "  {:<28} you {:.2} / them {:.2}",
                    kw.keyword, kw.our_score, kw.competitor_score
                );
            }
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn print_rank_report(checks: &[RankCheck]) {
        Self::header("Seoscope - Rank Check");

        for check in checks {
            println!(
                "{}: {} ({})",
                "Keyword".bright_white().bold(),
                check.keyword.bright_cyan(),
                check.location
            );
            match check.position {
                Some(position) => {
                    println!(
                        "  Position: {} {}",
                        format!("#{}", position).bright_green().bold(),
                        check.url.as_deref().unwrap_or("").dimmed()
                    );
                }
                None => {
                    println!("  Position: {}", "not found in top 100".yellow());
                }
            }
            println!();
        }

        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn print_research_report(report: &KeywordIdeas) {
        Self::header("Seoscope - Keyword Research");

        println!(
            "{}: {}",
            "Keyword".bright_white().bold(),
            report.keyword.bright_cyan()
        );
        println!();

        println!("{}", "Estimates (heuristic)".bright_yellow().bold().underline());
        println!("  Difficulty:   {}/100", report.difficulty);
        println!("  Volume:       ~{}/mo", report.volume);
        println!("  Opportunity:  {}", report.opportunity);
        println!("  CPC:          {}", report.metrics.estimated_cpc);
        println!("  Competition:  {}", report.metrics.competition);
        println!("  Trend:        {}", report.metrics.trend);
        println!();

        if !report.suggestions.is_empty() {
            println!("{}", "Suggestions".bright_yellow().bold().underline());
            for suggestion in &report.suggestions {
                println!("  - {}", suggestion);
            }
            println!();
        }

        println!("{}", "Questions".bright_yellow().bold().underline());
        for question in &report.questions {
            println!("  - {}", question);
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn save_json_report<T: Serialize>(report: &T, filename: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(filename)?;
        file.write_all(json.as_bytes())?;
        println!("Report saved to: {}", filename.bright_green());
        Ok(())
    }
}
