//! Facebook Graph API publisher.
//!
//! One post per call, routed by media precedence: a video wins over an
//! image, an image wins over plain text. Video uploads stage the remote
//! bytes in a [`tempfile::NamedTempFile`] first, which is deleted on drop
//! whether or not the upload succeeds.
//!
//! Publishing is the pipeline's only externally visible effect; once the
//! Graph API accepts a post there is no undo here. Failures are returned as
//! [`PublishError`] and the caller does not retry within the run.

use std::fmt;
use std::io::Write;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::error::PublishError;
use crate::utils::truncate_chars;

const DEFAULT_GRAPH_BASE: &str = "https://graph.facebook.com/v19.0";
const DEFAULT_VIDEO_BASE: &str = "https://graph-video.facebook.com/v19.0";

/// Character budget for the title of a video post.
const VIDEO_TITLE_CHARS: usize = 50;

/// Platform-assigned identifier of a published post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
struct PostResponse {
    id: String,
}

/// Graph API client bound to one Page.
#[derive(Debug, Clone)]
pub struct FacebookClient {
    http: reqwest::Client,
    access_token: String,
    page_id: String,
    graph_base: String,
    video_base: String,
}

impl FacebookClient {
    pub fn new(
        http: reqwest::Client,
        access_token: impl Into<String>,
        page_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            access_token: access_token.into(),
            page_id: page_id.into(),
            graph_base: DEFAULT_GRAPH_BASE.to_string(),
            video_base: DEFAULT_VIDEO_BASE.to_string(),
        }
    }

    /// Point both Graph hosts at a different endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        self.graph_base = base.clone();
        self.video_base = base;
        self
    }

    /// Publish one post, picking the path by media precedence.
    #[instrument(level = "info", skip_all, fields(page_id = %self.page_id, has_image = image.is_some(), has_video = video.is_some()))]
    pub async fn publish(
        &self,
        message: &str,
        image: Option<&str>,
        video: Option<&str>,
    ) -> Result<PostId, PublishError> {
        if let Some(video_url) = video {
            self.publish_video(message, video_url).await
        } else if let Some(image_url) = image {
            self.publish_photo(message, image_url).await
        } else {
            self.publish_feed(message).await
        }
    }

    /// Plain text post to the Page feed.
    async fn publish_feed(&self, message: &str) -> Result<PostId, PublishError> {
        let url = format!("{}/{}/feed", self.graph_base, self.page_id);
        let response = self
            .http
            .post(&url)
            .form(&[("message", message), ("access_token", &self.access_token)])
            .send()
            .await?;

        let id = Self::parse_post_id(response).await?;
        info!(%id, "Published feed post");
        Ok(id)
    }

    /// Download the image bytes and upload them as a captioned photo.
    async fn publish_photo(&self, message: &str, image_url: &str) -> Result<PostId, PublishError> {
        debug!(%image_url, "Downloading image");
        let bytes = self
            .http
            .get(image_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!(bytes = bytes.len(), "Image downloaded");

        let form = Form::new()
            .text("caption", message.to_string())
            .text("access_token", self.access_token.clone())
            .part("source", Part::bytes(bytes.to_vec()).file_name("photo.jpg"));

        let url = format!("{}/{}/photos", self.graph_base, self.page_id);
        let response = self.http.post(&url).multipart(form).send().await?;

        let id = Self::parse_post_id(response).await?;
        info!(%id, %image_url, "Published photo post");
        Ok(id)
    }

    /// Stage the remote video in a temp file, then upload it.
    ///
    /// The temp file lives for the duration of this call only; drop removes
    /// it even when the upload fails.
    async fn publish_video(&self, message: &str, video_url: &str) -> Result<PostId, PublishError> {
        debug!(%video_url, "Downloading video to temp file");
        let mut staged = NamedTempFile::new()?;
        let mut response = self.http.get(video_url).send().await?.error_for_status()?;
        let mut total: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            staged.write_all(&chunk)?;
            total += chunk.len() as u64;
        }
        staged.flush()?;
        debug!(bytes = total, path = %staged.path().display(), "Video staged");

        // Upload straight from the staged file; the video never has to fit
        // in memory.
        let file = tokio::fs::File::open(staged.path()).await?;
        let form = Form::new()
            .text("description", message.to_string())
            .text("title", truncate_chars(message, VIDEO_TITLE_CHARS))
            .text("access_token", self.access_token.clone())
            .part(
                "source",
                Part::stream_with_length(reqwest::Body::from(file), total)
                    .file_name("video.mp4"),
            );

        let url = format!("{}/{}/videos", self.video_base, self.page_id);
        let response = self.http.post(&url).multipart(form).send().await?;

        let id = Self::parse_post_id(response).await?;
        info!(%id, %video_url, "Published video post");
        Ok(id)
    }

    async fn parse_post_id(response: reqwest::Response) -> Result<PostId, PublishError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api { status, body });
        }
        let parsed: PostResponse = response.json().await?;
        Ok(PostId(parsed.id))
    }
}
