//! Command-line interface definitions.
//!
//! Every option is env-backed, so the binary can run with no arguments at all
//! and be configured purely through the environment, the way the pipeline is
//! normally driven from a scheduler.

use clap::Parser;

/// Command-line arguments for the auto poster.
///
/// # Examples
///
/// ```sh
/// # Pure-env invocation (GEMINI_API_KEY etc. exported by the scheduler)
/// auto_fb_poster
///
/// # Override the store locations and scrape a single source
/// auto_fb_poster --history-file /var/lib/poster/history.json \
///     --dashboard-file /var/lib/poster/dashboard.json \
///     --source https://example.com/tech
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Facebook Page access token
    #[arg(long, env = "FACEBOOK_ACCESS_TOKEN", hide_env_values = true)]
    pub facebook_access_token: String,

    /// Facebook Page identifier to publish to
    #[arg(long, env = "FACEBOOK_PAGE_ID")]
    pub facebook_page_id: String,

    /// Gemini model used for post generation
    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-1.5-flash")]
    pub gemini_model: String,

    /// Listing page URL to scrape (repeatable); defaults to the built-in source list
    #[arg(long = "source", env = "SOURCE_URLS", value_delimiter = ',')]
    pub sources: Vec<String>,

    /// Path of the posted-history JSON file
    #[arg(long, env = "HISTORY_FILE", default_value = "posted_history.json")]
    pub history_file: String,

    /// Path of the dashboard JSON file
    #[arg(long, env = "DASHBOARD_FILE", default_value = "dashboard.json")]
    pub dashboard_file: String,

    /// Override the Gemini API base URL (proxies, testing)
    #[arg(long, env = "GEMINI_BASE_URL")]
    pub gemini_base_url: Option<String>,

    /// Override the Graph API base URL (proxies, testing)
    #[arg(long, env = "GRAPH_BASE_URL")]
    pub graph_base_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Vec<&'static str> {
        vec![
            "auto_fb_poster",
            "--gemini-api-key",
            "g-key",
            "--facebook-access-token",
            "fb-token",
            "--facebook-page-id",
            "1234567890",
        ]
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(base_args());
        assert_eq!(cli.gemini_model, "gemini-1.5-flash");
        assert_eq!(cli.history_file, "posted_history.json");
        assert_eq!(cli.dashboard_file, "dashboard.json");
        assert!(cli.sources.is_empty());
        assert!(cli.graph_base_url.is_none());
    }

    #[test]
    fn test_cli_repeated_sources() {
        let mut args = base_args();
        args.extend([
            "--source",
            "https://a.example/tech",
            "--source",
            "https://b.example/news",
        ]);
        let cli = Cli::parse_from(args);
        assert_eq!(
            cli.sources,
            vec!["https://a.example/tech", "https://b.example/news"]
        );
    }

    #[test]
    fn test_cli_store_overrides() {
        let mut args = base_args();
        args.extend(["--history-file", "/tmp/h.json", "--dashboard-file", "/tmp/d.json"]);
        let cli = Cli::parse_from(args);
        assert_eq!(cli.history_file, "/tmp/h.json");
        assert_eq!(cli.dashboard_file, "/tmp/d.json");
    }
}
