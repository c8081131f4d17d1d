//! Listing-page scraper.
//!
//! Fetches a configured listing page and extracts candidate articles from it.
//! The container heuristic is deliberately loose: anything that is an
//! `<article>` element, or an `<article>`/`<div>` whose class name mentions
//! "post", counts as a candidate. No attempt is made to handle arbitrary site
//! layouts beyond that.
//!
//! URLs already present in the posted history are filtered out here, before
//! any generation or publishing work is spent on them.

use std::collections::HashSet;
use std::time::Duration;

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::FetchError;
use crate::models::Article;

/// Timeout on the listing GET. Listing pages are small; anything slower than
/// this is treated as a dead source for the run.
const LISTING_TIMEOUT: Duration = Duration::from_secs(10);

static CONTAINER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article, div[class]").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static VIDEO_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("video[src]").unwrap());

/// Fetch a listing page and extract its new articles.
///
/// Articles whose URL appears in `excluded` are skipped. A network failure or
/// non-success status fails the whole listing with [`FetchError`]; the caller
/// logs it and treats this source as yielding nothing for the run.
#[instrument(level = "info", skip(client, excluded), fields(%listing_url))]
pub async fn fetch_listing(
    client: &reqwest::Client,
    listing_url: &str,
    excluded: &HashSet<String>,
) -> Result<Vec<Article>, FetchError> {
    let response = client
        .get(listing_url)
        .timeout(LISTING_TIMEOUT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let body = response.text().await?;
    let articles = parse_listing(&body, listing_url, excluded);
    info!(count = articles.len(), "Extracted new articles from listing");
    Ok(articles)
}

/// Parse a listing page body into articles, in document order.
pub fn parse_listing(html: &str, listing_url: &str, excluded: &HashSet<String>) -> Vec<Article> {
    let document = Html::parse_document(html);
    let base = Url::parse(listing_url).ok();
    if base.is_none() {
        warn!(%listing_url, "Listing URL does not parse; relative links will be kept verbatim");
    }

    let mut articles = Vec::new();
    for container in document.select(&CONTAINER_SELECTOR) {
        if !is_candidate(&container) {
            continue;
        }

        let Some(href) = container
            .select(&LINK_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            debug!("Skipping container without a link");
            continue;
        };

        let article_url = match &base {
            Some(base) => match base.join(href) {
                Ok(resolved) => resolved.to_string(),
                Err(e) => {
                    debug!(%href, error = %e, "Skipping unresolvable link");
                    continue;
                }
            },
            None => href.to_string(),
        };

        if excluded.contains(&article_url) {
            debug!(url = %article_url, "Already posted; skipping");
            continue;
        }

        articles.push(Article {
            url: article_url,
            text: extract_text(&container),
            images: extract_images(&container),
            videos: extract_videos(&container),
        });
    }

    articles
}

/// An `<article>` element, or an element whose class mentions "post".
fn is_candidate(container: &ElementRef) -> bool {
    if container.value().name() == "article" {
        return true;
    }
    container
        .value()
        .attr("class")
        .is_some_and(|class| class.to_ascii_lowercase().contains("post"))
}

/// Space-joined paragraph text, falling back to the whole container's text
/// (newline-joined) when it has no paragraphs.
fn extract_text(container: &ElementRef) -> String {
    let from_paragraphs = container
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| p.text().collect::<Vec<_>>().join("").trim().to_string())
        .filter(|t| !t.is_empty())
        .join(" ");

    if !from_paragraphs.is_empty() {
        return from_paragraphs;
    }

    container
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .join("\n")
}

/// Every image URL from `src` or the `data-src` lazy-load attribute,
/// deduplicated while preserving document order.
fn extract_images(container: &ElementRef) -> Vec<String> {
    container
        .select(&IMAGE_SELECTOR)
        .filter_map(|img| {
            img.value()
                .attr("src")
                .or_else(|| img.value().attr("data-src"))
        })
        .map(str::to_string)
        .unique()
        .collect()
}

fn extract_videos(container: &ElementRef) -> Vec<String> {
    container
        .select(&VIDEO_SELECTOR)
        .filter_map(|video| video.value().attr("src"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_URL: &str = "https://news.example/tech";

    fn no_exclusions() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn test_parse_article_containers_in_document_order() {
        let html = r#"
            <html><body>
              <article><a href="/a1">First</a><p>Alpha body.</p></article>
              <div class="card"><a href="/ignored">Not a post</a></div>
              <div class="post-item"><a href="/a2">Second</a><p>Beta body.</p></div>
            </body></html>
        "#;
        let articles = parse_listing(html, LISTING_URL, &no_exclusions());
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].url, "https://news.example/a1");
        assert_eq!(articles[1].url, "https://news.example/a2");
    }

    #[test]
    fn test_post_class_match_is_case_insensitive() {
        let html = r#"<div class="Featured-POST"><a href="/x"></a></div>"#;
        let articles = parse_listing(html, LISTING_URL, &no_exclusions());
        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn test_container_without_link_is_skipped() {
        let html = r#"<article><p>Teaser without a link.</p></article>"#;
        let articles = parse_listing(html, LISTING_URL, &no_exclusions());
        assert!(articles.is_empty());
    }

    #[test]
    fn test_excluded_urls_are_filtered() {
        let html = r#"
            <article><a href="/seen">Old</a></article>
            <article><a href="/new">New</a></article>
        "#;
        let excluded: HashSet<String> =
            std::iter::once("https://news.example/seen".to_string()).collect();
        let articles = parse_listing(html, LISTING_URL, &excluded);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "https://news.example/new");
    }

    #[test]
    fn test_paragraphs_joined_with_single_spaces() {
        let html = r#"
            <article>
              <a href="/a">Title</a>
              <p>  One.  </p>
              <p>Two.</p>
              <p></p>
            </article>
        "#;
        let articles = parse_listing(html, LISTING_URL, &no_exclusions());
        assert_eq!(articles[0].text, "One. Two.");
    }

    #[test]
    fn test_text_falls_back_to_container_when_no_paragraphs() {
        let html = r#"<article><a href="/a">Headline</a><span>Lead-in</span></article>"#;
        let articles = parse_listing(html, LISTING_URL, &no_exclusions());
        assert_eq!(articles[0].text, "Headline\nLead-in");
    }

    #[test]
    fn test_images_from_src_and_data_src_deduplicated() {
        let html = r#"
            <article>
              <a href="/a">Title</a>
              <img src="https://cdn.example/one.jpg">
              <img data-src="https://cdn.example/lazy.jpg">
              <img src="https://cdn.example/one.jpg">
              <img alt="no source">
            </article>
        "#;
        let articles = parse_listing(html, LISTING_URL, &no_exclusions());
        assert_eq!(
            articles[0].images,
            vec!["https://cdn.example/one.jpg", "https://cdn.example/lazy.jpg"]
        );
    }

    #[test]
    fn test_videos_require_src() {
        let html = r#"
            <article>
              <a href="/a">Title</a>
              <video src="https://cdn.example/clip.mp4"></video>
              <video></video>
            </article>
        "#;
        let articles = parse_listing(html, LISTING_URL, &no_exclusions());
        assert_eq!(articles[0].videos, vec!["https://cdn.example/clip.mp4"]);
    }

    #[test]
    fn test_absolute_links_kept_as_is() {
        let html = r#"<article><a href="https://other.example/full">Title</a></article>"#;
        let articles = parse_listing(html, LISTING_URL, &no_exclusions());
        assert_eq!(articles[0].url, "https://other.example/full");
    }
}
