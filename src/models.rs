//! Data models shared across the pipeline.
//!
//! - [`Article`]: one scraped listing entry, immutable once built
//! - [`PostCandidate`]: the generated short/long rewrites of one article
//! - [`PublishedRecord`]: one line of the dashboard audit log

use serde::{Deserialize, Serialize};

/// A candidate article scraped from a listing page.
///
/// Created by the fetcher, consumed within a single pipeline iteration and
/// then discarded; only its `url` outlives the run (in the history file).
#[derive(Debug, Clone)]
pub struct Article {
    /// Absolute URL of the full article, used as the dedup key.
    pub url: String,
    /// Visible text extracted from the listing container.
    pub text: String,
    /// Image URLs found in the container, document order, deduplicated.
    pub images: Vec<String>,
    /// Video URLs found in the container, document order.
    pub videos: Vec<String>,
}

/// Short and long rewrites of one article, either of which may have failed.
#[derive(Debug, Default)]
pub struct PostCandidate {
    pub short: Option<String>,
    pub long: Option<String>,
}

/// One successful publish, as appended to the dashboard file.
#[derive(Debug, Deserialize, Serialize)]
pub struct PublishedRecord {
    /// Post identifier assigned by the Graph API.
    pub id: String,
    /// Source article URL.
    pub url: String,
    /// Local wall-clock time of the publish, `%Y-%m-%d %H:%M:%S`.
    pub time: String,
    /// First 100 characters of the published message.
    pub snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_creation() {
        let article = Article {
            url: "https://example.com/a".to_string(),
            text: "Body".to_string(),
            images: vec!["https://example.com/i.jpg".to_string()],
            videos: vec![],
        };
        assert_eq!(article.url, "https://example.com/a");
        assert_eq!(article.images.len(), 1);
        assert!(article.videos.is_empty());
    }

    #[test]
    fn test_published_record_roundtrip() {
        let record = PublishedRecord {
            id: "123_456".to_string(),
            url: "https://example.com/a".to_string(),
            time: "2026-08-30 12:00:00".to_string(),
            snippet: "snippet".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"id\":\"123_456\""));
        assert!(json.contains("\"time\":\"2026-08-30 12:00:00\""));

        let back: PublishedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.url, "https://example.com/a");
    }

    #[test]
    fn test_post_candidate_default_is_empty() {
        let candidate = PostCandidate::default();
        assert!(candidate.short.is_none());
        assert!(candidate.long.is_none());
    }
}
