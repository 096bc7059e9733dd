//! YouTube search client for related exercise videos

use std::future::Future;

use reqwest::Client;
use serde::Deserialize;

use super::{decode_json, VideoSummary};
use crate::error::ApiError;

/// Base URL for the YouTube Data API
pub const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Number of related videos requested per search
pub const MAX_RESULTS: u8 = 6;

/// Anything that can search for videos by free text
pub trait VideoSource: Send + Sync {
    fn search_videos(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<VideoSummary>, ApiError>> + Send;
}

/// Client for the YouTube search endpoint
#[derive(Debug, Clone)]
pub struct VideoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl VideoClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: YOUTUBE_BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl VideoSource for VideoClient {
    async fn search_videos(&self, query: &str) -> Result<Vec<VideoSummary>, ApiError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ApiError::MissingKey("YouTube"))?;

        let max_results = MAX_RESULTS.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", key),
            ])
            .send()
            .await?;

        let search: SearchResponse = decode_json(response).await?;
        Ok(parse_search(search))
    }
}

/// YouTube search response; `items` is absent when nothing matched
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
}

/// Keeps only actual videos (search can also return channels and playlists)
fn parse_search(search: SearchResponse) -> Vec<VideoSummary> {
    search
        .items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.video_id?;
            let snippet = item.snippet.unwrap_or_default();
            Some(VideoSummary {
                id,
                title: unescape_html(&snippet.title),
                description: unescape_html(&snippet.description),
                channel_title: unescape_html(&snippet.channel_title),
            })
        })
        .collect()
}

/// YouTube HTML-escapes snippet text
fn unescape_html(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Builds the related-video query for an exercise name
pub fn related_query(exercise_name: &str) -> String {
    format!("{} exercise", exercise_name)
}
