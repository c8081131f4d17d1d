//! Runtime configuration.
//!
//! All credentials and tunables live in one [`AppConfig`] built once at
//! startup and passed by reference into each component. Nothing in the crate
//! reads the environment or global state after this point.

use std::path::PathBuf;

use crate::cli::Cli;

/// Listing pages scraped when no `--source` is given.
pub const DEFAULT_SOURCE_URLS: &[&str] = &[
    "https://dantri.com.vn/cong-nghe/ai-internet.htm",
    "https://m.genk.vn/ai.chn",
    "https://thanhnien.vn/cong-nghe/tin-tuc-cong-nghe.htm",
];

/// Immutable per-run configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub facebook_access_token: String,
    pub facebook_page_id: String,
    /// Listing pages to scrape, processed in order.
    pub sources: Vec<String>,
    pub history_file: PathBuf,
    pub dashboard_file: PathBuf,
    /// Gemini endpoint override; `None` uses the public API host.
    pub gemini_base_url: Option<String>,
    /// Graph API endpoint override; `None` uses the public API hosts.
    pub graph_base_url: Option<String>,
}

impl AppConfig {
    /// Build the configuration from parsed CLI/env arguments.
    pub fn from_cli(cli: Cli) -> Self {
        let sources = if cli.sources.is_empty() {
            DEFAULT_SOURCE_URLS.iter().map(|s| s.to_string()).collect()
        } else {
            cli.sources
        };

        Self {
            gemini_api_key: cli.gemini_api_key,
            gemini_model: cli.gemini_model,
            facebook_access_token: cli.facebook_access_token,
            facebook_page_id: cli.facebook_page_id,
            sources,
            history_file: PathBuf::from(cli.history_file),
            dashboard_file: PathBuf::from(cli.dashboard_file),
            gemini_base_url: cli.gemini_base_url,
            graph_base_url: cli.graph_base_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_sources_applied() {
        let cli = Cli::parse_from([
            "auto_fb_poster",
            "--gemini-api-key",
            "k",
            "--facebook-access-token",
            "t",
            "--facebook-page-id",
            "p",
        ]);
        let config = AppConfig::from_cli(cli);
        assert_eq!(config.sources.len(), DEFAULT_SOURCE_URLS.len());
        assert_eq!(config.sources[0], DEFAULT_SOURCE_URLS[0]);
    }

    #[test]
    fn test_explicit_sources_win() {
        let cli = Cli::parse_from([
            "auto_fb_poster",
            "--gemini-api-key",
            "k",
            "--facebook-access-token",
            "t",
            "--facebook-page-id",
            "p",
            "--source",
            "https://only.example/feed",
        ]);
        let config = AppConfig::from_cli(cli);
        assert_eq!(config.sources, vec!["https://only.example/feed"]);
    }
}
