//! Core data models and upstream API clients
//!
//! This module contains the exercise, video, catalog and chat types used
//! throughout the application, plus one thin client per upstream service.

pub mod catalog;
pub mod category;
pub mod chat;
pub mod exercises;
pub mod videos;

pub use catalog::CatalogClient;
pub use category::{all_categories, body_parts, equipment, Category, CategoryKind};
pub use chat::{ChatClient, ChatMessage, Role};
pub use exercises::{ExerciseDbClient, ExerciseSource};
pub use videos::{VideoClient, VideoSource};

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;

/// A single exercise record as served by ExerciseDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Upstream identifier, e.g. "0001"
    pub id: String,
    pub name: String,
    pub body_part: String,
    /// Primary target muscle
    pub target: String,
    pub equipment: String,
    /// Animated demonstration
    #[serde(default)]
    pub gif_url: String,
    /// Step-by-step instructions, possibly empty
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// A related video from the video search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
}

impl VideoSummary {
    /// Link that opens the video in a browser
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

/// An entry from the muscle or equipment catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
}

/// Turns a response into `T`, mapping non-success statuses to `ApiError`
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::from_status(status, text));
    }

    Ok(serde_json::from_str(&text)?)
}

/// Appends `segments` to `base`, escaping each one as a single path segment
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
