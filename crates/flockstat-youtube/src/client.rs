//! HTTP client for the `YouTube` Data API v3.
//!
//! Walks channel → uploads playlist → video snippets and hands back the
//! resulting [`CaptionedItem`] batch, capped at the configured maximum.

use std::time::Duration;

use flockstat_core::{AppConfig, CaptionedItem};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::YoutubeError;
use crate::retry::retry_with_backoff;
use crate::types::{
    ChannelListResponse, ErrorEnvelope, PlaylistItemListResponse, VideoListResponse,
};

/// Largest page / id batch the API accepts.
const PAGE_SIZE: usize = 50;

/// Guard against a playlist endpoint that keeps handing out page tokens.
const MAX_PAGES: usize = 200;

/// Everything the client needs, passed in explicitly.
#[derive(Clone)]
pub struct YoutubeConfig {
    pub api_key: String,
    pub channel_id: String,
    pub base_url: String,
    /// Upper bound on the number of uploads returned by
    /// [`YoutubeClient::fetch_captioned_items`].
    pub max_videos: usize,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl YoutubeConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.youtube_api_key.clone(),
            channel_id: config.channel_id.clone(),
            base_url: config.youtube_base_url.clone(),
            max_videos: config.max_videos,
            timeout_secs: config.youtube_timeout_secs,
            max_retries: config.youtube_max_retries,
            backoff_base_ms: config.youtube_backoff_base_ms,
        }
    }
}

impl std::fmt::Debug for YoutubeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeConfig")
            .field("api_key", &"[redacted]")
            .field("channel_id", &self.channel_id)
            .field("base_url", &self.base_url)
            .field("max_videos", &self.max_videos)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish()
    }
}

/// Client for one channel's uploads.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    channel_id: String,
    base_url: Url,
    max_videos: usize,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl YoutubeClient {
    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::InvalidBaseUrl`] if
    /// `config.base_url` is not a valid URL.
    pub fn new(config: YoutubeConfig) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("flockstat/0.1")
            .build()?;

        // Exactly one trailing slash, so `Url::join` appends the endpoint
        // instead of replacing the last path segment.
        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: config.api_key,
            channel_id: config.channel_id,
            base_url,
            max_videos: config.max_videos,
            max_retries: config.max_retries,
            backoff_base_ms: config.backoff_base_ms,
        })
    }

    /// Fetches up to `max_videos` uploads of the configured channel.
    ///
    /// All-or-nothing: any failing request aborts the whole fetch and no
    /// partial batch is returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from the three underlying API calls.
    pub async fn fetch_captioned_items(&self) -> Result<Vec<CaptionedItem>, YoutubeError> {
        let uploads = self.get_uploads_playlist_id().await?;
        let video_ids = self.get_playlist_video_ids(&uploads).await?;
        let items = self.get_video_snippets(&video_ids).await?;
        tracing::info!(
            channel_id = %self.channel_id,
            videos = items.len(),
            "fetched captioned uploads"
        );
        Ok(items)
    }

    /// Resolves the channel's uploads playlist id.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::ChannelNotFound`] if the channel id matches nothing.
    /// - [`YoutubeError::Api`] / [`YoutubeError::Http`] on request failure.
    pub async fn get_uploads_playlist_id(&self) -> Result<String, YoutubeError> {
        let url = self.build_url(
            "channels",
            &[("part", "contentDetails"), ("id", self.channel_id.as_str())],
        )?;
        let body: ChannelListResponse = self.request_json(&url, "channels.list").await?;

        body.items
            .into_iter()
            .next()
            .map(|channel| channel.content_details.related_playlists.uploads)
            .ok_or_else(|| YoutubeError::ChannelNotFound(self.channel_id.clone()))
    }

    /// Collects video ids from the playlist, following `nextPageToken`
    /// until the last page or until `max_videos` ids have been gathered.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::PaginationLimit`] if more than [`MAX_PAGES`] pages
    ///   are requested.
    /// - [`YoutubeError::Api`] / [`YoutubeError::Http`] on request failure.
    pub async fn get_playlist_video_ids(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<String>, YoutubeError> {
        let page_size = PAGE_SIZE.to_string();
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        while ids.len() < self.max_videos {
            pages += 1;
            if pages > MAX_PAGES {
                return Err(YoutubeError::PaginationLimit {
                    max_pages: MAX_PAGES,
                });
            }

            let mut params = vec![
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", page_size.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let url = self.build_url("playlistItems", &params)?;
            let page: PlaylistItemListResponse =
                self.request_json(&url, "playlistItems.list").await?;

            let remaining = self.max_videos - ids.len();
            ids.extend(
                page.items
                    .into_iter()
                    .take(remaining)
                    .map(|item| item.content_details.video_id),
            );

            tracing::debug!(page = pages, collected = ids.len(), "fetched playlist page");

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(ids)
    }

    /// Fetches snippets for `video_ids` in batches of 50, in input order.
    /// Ids the API does not return (deleted, private) are skipped.
    ///
    /// # Errors
    ///
    /// [`YoutubeError::Api`] / [`YoutubeError::Http`] on request failure.
    pub async fn get_video_snippets(
        &self,
        video_ids: &[String],
    ) -> Result<Vec<CaptionedItem>, YoutubeError> {
        let mut items = Vec::with_capacity(video_ids.len());
        for batch in video_ids.chunks(PAGE_SIZE) {
            let joined = batch.join(",");
            let url = self.build_url("videos", &[("part", "snippet"), ("id", joined.as_str())])?;
            let body: VideoListResponse = self.request_json(&url, "videos.list").await?;
            items.extend(body.items.into_iter().map(CaptionedItem::from));
        }
        Ok(items)
    }

    /// Builds `{base}/{endpoint}?key=...&<params>` with percent-encoded values.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// GETs `url` and decodes the JSON body, retrying transient failures
    /// according to the configured policy.
    ///
    /// `context` names the API method for error messages; the URL itself is
    /// never logged or surfaced because it carries the API key.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, YoutubeError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, move || async move {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(reqwest::Error::without_url)?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(reqwest::Error::without_url)?;

            if !status.is_success() {
                let message = api_error_message(&body).unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_owned()
                });
                tracing::warn!(
                    api = context,
                    status = status.as_u16(),
                    message = %message,
                    "YouTube API request failed"
                );
                return Err(YoutubeError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        })
        .await
    }
}

/// Pulls `error.message` out of a Google API error body, if it has one.
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
