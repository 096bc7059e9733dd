//! ExerciseDB client
//!
//! Looks up single exercises by identifier and lists exercises by body part
//! or equipment through the RapidAPI-hosted ExerciseDB service.

use std::future::Future;

use reqwest::{Client, RequestBuilder};
use url::Url;
use serde_json::Value;

use super::{decode_json, endpoint, Category, Exercise};
use crate::error::ApiError;

/// Base URL for the ExerciseDB API
pub const EXERCISEDB_BASE_URL: &str = "https://exercisedb.p.rapidapi.com";

/// Host header RapidAPI routes on
const EXERCISEDB_HOST: &str = "exercisedb.p.rapidapi.com";

/// Anything that can look up a single exercise by identifier
pub trait ExerciseSource: Send + Sync {
    fn fetch_exercise(&self, id: &str) -> impl Future<Output = Result<Exercise, ApiError>> + Send;
}

/// Client for the ExerciseDB API
#[derive(Debug, Clone)]
pub struct ExerciseDbClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ExerciseDbClient {
    /// Create a new client authenticating with `api_key`
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: EXERCISEDB_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Point the client at a different host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch the list of exercises for a body part or equipment
    pub async fn fetch_by_category(&self, category: &Category) -> Result<Vec<Exercise>, ApiError> {
        let value = category.value();
        let url = endpoint(
            &self.base_url,
            &["exercises", category.kind.path_segment(), &value],
        )?;

        let response = self.authorized(url)?.send().await?;
        let body = decode_json::<Value>(response).await?;
        parse_exercise_list(body)
    }

    /// Attaches the RapidAPI headers, failing early when no key is configured
    fn authorized(&self, url: Url) -> Result<RequestBuilder, ApiError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ApiError::MissingKey("ExerciseDB"))?;

        Ok(self
            .client
            .get(url)
            .header("X-RapidAPI-Key", key)
            .header("X-RapidAPI-Host", EXERCISEDB_HOST))
    }
}

impl ExerciseSource for ExerciseDbClient {
    async fn fetch_exercise(&self, id: &str) -> Result<Exercise, ApiError> {
        let url = endpoint(&self.base_url, &["exercises", "exercise", id])?;

        let response = self.authorized(url)?.send().await?;
        let body = decode_json::<Value>(response).await?;
        parse_exercise(body)
    }
}

/// Parses a single exercise, treating an empty body as missing data
pub fn parse_exercise(body: Value) -> Result<Exercise, ApiError> {
    let is_empty = match &body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if is_empty {
        return Err(ApiError::Malformed("No exercise data received".to_string()));
    }

    Ok(serde_json::from_value(body)?)
}

/// Parses a list of exercises; `null` counts as missing data
pub fn parse_exercise_list(body: Value) -> Result<Vec<Exercise>, ApiError> {
    if body.is_null() {
        return Err(ApiError::Malformed("No exercises received".to_string()));
    }

    Ok(serde_json::from_value(body)?)
}
