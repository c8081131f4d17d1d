//! Pipeline driver:
//! fetch → select media → generate → publish → record, one article at a time.
//!
//! Everything runs sequentially: one source, one article, one API call at a
//! time. Any single-article failure is logged and the loop moves on; the
//! article is not recorded as done, so it stays eligible on the next run.
//! The history ledger is persisted immediately after each successful publish
//! to keep the window for duplicates as small as a full-file rewrite allows.

use chrono::Local;
use tracing::{debug, error, info, instrument, warn};

use crate::api::GeminiClient;
use crate::config::AppConfig;
use crate::media;
use crate::models::{PostCandidate, PublishedRecord};
use crate::publish::FacebookClient;
use crate::scrape;
use crate::store::{Dashboard, HistoryStore};
use crate::utils::{truncate_chars, truncate_for_log};

/// Characters of raw article text used when both generated variants failed.
const FALLBACK_EXCERPT_CHARS: usize = 500;
/// Character cap on the dashboard snippet.
const SNIPPET_CHARS: usize = 100;

/// Per-run outcome counters, logged by the binary on exit.
#[derive(Debug, Default)]
pub struct RunStats {
    /// Articles published and recorded.
    pub published: usize,
    /// Articles that failed to publish (retryable next run).
    pub failed: usize,
    /// Articles skipped (already posted, or no usable text).
    pub skipped: usize,
    /// Sources whose listing fetch failed.
    pub sources_failed: usize,
}

/// Execute one full run over every configured source.
#[instrument(level = "info", skip_all, fields(sources = config.sources.len()))]
pub async fn run(config: &AppConfig) -> RunStats {
    let http = reqwest::Client::new();

    let mut gemini = GeminiClient::new(
        http.clone(),
        &config.gemini_api_key,
        &config.gemini_model,
    );
    if let Some(base) = &config.gemini_base_url {
        gemini = gemini.with_base_url(base);
    }

    let mut facebook = FacebookClient::new(
        http.clone(),
        &config.facebook_access_token,
        &config.facebook_page_id,
    );
    if let Some(base) = &config.graph_base_url {
        facebook = facebook.with_base_url(base);
    }

    let mut history = HistoryStore::load(&config.history_file);
    let dashboard = Dashboard::new(&config.dashboard_file);
    let mut stats = RunStats::default();

    for source in &config.sources {
        info!(%source, "Scraping listing");
        let articles = match scrape::fetch_listing(&http, source, history.excluded()).await {
            Ok(articles) => articles,
            Err(e) => {
                error!(%source, error = %e, "Listing fetch failed; source yields nothing this run");
                stats.sources_failed += 1;
                continue;
            }
        };
        if articles.is_empty() {
            info!(%source, "No new articles");
            continue;
        }

        for article in articles {
            // A URL can show up twice in one run (nested containers, shared
            // syndication across sources); the ledger check here keeps it
            // from reaching the generator or publisher again.
            if history.contains(&article.url) {
                debug!(url = %article.url, "Published earlier in this run; skipping");
                stats.skipped += 1;
                continue;
            }

            let (image, video) = media::select(&http, &article.images, &article.videos).await;
            let candidate = gemini.generate_variants(&article.text).await;
            let message = choose_final_text(&candidate, &article.text);
            if message.is_empty() {
                warn!(url = %article.url, "No usable text for this article; skipping");
                stats.skipped += 1;
                continue;
            }

            debug!(
                url = %article.url,
                message = %truncate_for_log(&message, 120),
                "Publishing article"
            );
            match facebook
                .publish(&message, image.as_deref(), video.as_deref())
                .await
            {
                Ok(post_id) => {
                    if let Err(e) = history.record(&article.url) {
                        error!(url = %article.url, error = %e, "Failed to persist history; next run may repost this URL");
                    }
                    let record = PublishedRecord {
                        id: post_id.to_string(),
                        url: article.url.clone(),
                        time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                        snippet: truncate_chars(&message, SNIPPET_CHARS),
                    };
                    if let Err(e) = dashboard.append(record) {
                        error!(url = %article.url, error = %e, "Failed to append dashboard record");
                    }
                    info!(url = %article.url, %post_id, "Article published");
                    stats.published += 1;
                }
                Err(e) => {
                    error!(url = %article.url, error = %e, "Publish failed; article stays retryable");
                    stats.failed += 1;
                }
            }
        }
    }

    stats
}

/// Final message text, by preference: long variant, short variant, then a
/// truncated excerpt of the raw text. Blank variants count as absent.
pub fn choose_final_text(candidate: &PostCandidate, raw_text: &str) -> String {
    if let Some(long) = candidate.long.as_deref().filter(|t| !t.trim().is_empty()) {
        return long.to_string();
    }
    if let Some(short) = candidate.short.as_deref().filter(|t| !t.trim().is_empty()) {
        return short.to_string();
    }
    truncate_chars(raw_text, FALLBACK_EXCERPT_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_variant_preferred() {
        let candidate = PostCandidate {
            short: Some("S".to_string()),
            long: Some("L".to_string()),
        };
        assert_eq!(choose_final_text(&candidate, "raw"), "L");
    }

    #[test]
    fn test_short_variant_when_long_missing() {
        let candidate = PostCandidate {
            short: Some("S".to_string()),
            long: None,
        };
        let raw = "r".repeat(2000);
        assert_eq!(choose_final_text(&candidate, &raw), "S");
    }

    #[test]
    fn test_fallback_excerpt_when_both_fail() {
        let raw = "r".repeat(2000);
        let text = choose_final_text(&PostCandidate::default(), &raw);
        assert_eq!(text.chars().count(), FALLBACK_EXCERPT_CHARS);
        assert_eq!(text, "r".repeat(FALLBACK_EXCERPT_CHARS));
    }

    #[test]
    fn test_blank_variants_count_as_absent() {
        let candidate = PostCandidate {
            short: Some("S".to_string()),
            long: Some("   ".to_string()),
        };
        assert_eq!(choose_final_text(&candidate, "raw"), "S");
    }

    #[test]
    fn test_short_raw_text_kept_whole() {
        let text = choose_final_text(&PostCandidate::default(), "Brief update.");
        assert_eq!(text, "Brief update.");
    }

    #[test]
    fn test_empty_raw_text_yields_empty() {
        assert_eq!(choose_final_text(&PostCandidate::default(), ""), "");
    }
}
