//! Best-effort selection of one image and one video per article.
//!
//! Image ranking probes each URL with a streaming GET and compares the
//! declared `Content-Length` headers; the body is never read. A missing
//! header or a failed probe counts as size zero, so an image only wins if at
//! least one probe reports a positive size. This is a heuristic, not a
//! quality guarantee.

use std::time::Duration;

use tracing::{debug, instrument};

/// Timeout on each image probe. Probes that fail or time out are swallowed
/// and score zero.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pick the largest image (by declared byte size) and the first video.
///
/// Returns `(None, None)` when no media survives: an empty video list, and
/// image probes that all fail or report no size.
#[instrument(level = "debug", skip_all, fields(images = images.len(), videos = videos.len()))]
pub async fn select(
    client: &reqwest::Client,
    images: &[String],
    videos: &[String],
) -> (Option<String>, Option<String>) {
    let mut best_image: Option<String> = None;
    let mut max_size: u64 = 0;

    for url in images {
        let size = probe_size(client, url).await;
        debug!(%url, size, "Probed image");
        if size > max_size {
            max_size = size;
            best_image = Some(url.clone());
        }
    }

    let best_video = videos.first().cloned();
    debug!(image = ?best_image, video = ?best_video, "Selected media");
    (best_image, best_video)
}

/// Declared content length of `url`, or 0 when absent or the probe fails.
async fn probe_size(client: &reqwest::Client, url: &str) -> u64 {
    match client.get(url).timeout(PROBE_TIMEOUT).send().await {
        Ok(response) => response.content_length().unwrap_or(0),
        Err(e) => {
            debug!(%url, error = %e, "Image probe failed; scoring zero");
            0
        }
    }
}
