use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "seoscope")]
#[command(about = "A CLI SEO analysis toolkit", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format: text or json
    #[arg(short, long, global = true, default_value = "text")]
    pub output: String,

    /// Save report as JSON to file
    #[arg(short, long, global = true)]
    pub save: Option<String>,

    /// Append each analysis as a JSON line to an audit log file
    #[arg(long, global = true)]
    pub log: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Request timeout in seconds (default: 30)
    #[arg(short, long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Rate limit for SERP requests per second (optional, e.g., 0.2)
    #[arg(short = 'r', long, global = true)]
    pub rate_limit: Option<f64>,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a full SEO audit of a page
    Audit {
        /// The URL to audit
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Check on-page optimization of a page for a target keyword
    Check {
        /// The URL to check
        #[arg(value_name = "URL")]
        url: String,

        /// The target keyword to check placement and density for
        #[arg(short, long)]
        keyword: String,
    },

    /// Extract the top keywords from a page
    Keywords {
        /// The URL to extract keywords from
        #[arg(value_name = "URL")]
        url: String,

        /// Number of keywords to return (default: 20)
        #[arg(short = 'n', long, default_value_t = 20)]
        top: usize,
    },

    /// Compare keyword profiles of two domains
    Gap {
        /// Your domain
        #[arg(value_name = "DOMAIN")]
        domain: String,

        /// The competitor domain to compare against
        #[arg(value_name = "COMPETITOR")]
        competitor: String,
    },

    /// Look up Google ranking positions for a domain (best effort)
    Rank {
        /// The domain whose position to look for
        #[arg(value_name = "DOMAIN")]
        domain: String,

        /// Keywords to check (repeatable)
        #[arg(short, long, required = true)]
        keyword: Vec<String>,

        /// Country code for the Google domain (default: US)
        #[arg(long, default_value = "US")]
        country: String,

        /// City for local searches
        #[arg(long)]
        city: Option<String>,
    },

    /// Research keyword ideas with heuristic difficulty and volume estimates
    Research {
        /// The seed keyword
        #[arg(value_name = "KEYWORD")]
        keyword: String,
    },
}
