//! wger muscle and equipment catalog client
//!
//! The catalog is public and needs no credential. Muscles carry a Latin
//! `name` and, for most entries, an English `name_en`; the English one wins
//! when present.

use reqwest::Client;
use serde::Deserialize;

use super::{decode_json, CatalogItem, CategoryKind};
use crate::error::ApiError;

/// Base URL for the wger REST API
pub const WGER_BASE_URL: &str = "https://wger.de/api/v2";

/// Client for the wger catalog endpoints
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: WGER_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch the muscle list
    pub async fn fetch_muscles(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.fetch("muscle").await
    }

    /// Fetch the equipment list
    pub async fn fetch_equipment(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.fetch("equipment").await
    }

    /// Fetch the catalog that matches a search tab
    pub async fn fetch_for(&self, kind: CategoryKind) -> Result<Vec<CatalogItem>, ApiError> {
        match kind {
            CategoryKind::BodyPart => self.fetch_muscles().await,
            CategoryKind::Equipment => self.fetch_equipment().await,
        }
    }

    async fn fetch(&self, resource: &str) -> Result<Vec<CatalogItem>, ApiError> {
        let response = self
            .client
            .get(format!("{}/{}/", self.base_url, resource))
            .send()
            .await?;

        let page: CatalogPage = decode_json(response).await?;
        parse_page(page)
    }
}

/// A page of wger results
#[derive(Debug, Deserialize)]
struct CatalogPage {
    results: Option<Vec<CatalogRecord>>,
}

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    id: u32,
    name: String,
    #[serde(default)]
    name_en: Option<String>,
}

fn parse_page(page: CatalogPage) -> Result<Vec<CatalogItem>, ApiError> {
    let results = page
        .results
        .ok_or_else(|| ApiError::Malformed("catalog response has no results".to_string()))?;

    Ok(results
        .into_iter()
        .map(|record| {
            let name = match record.name_en {
                Some(english) if !english.trim().is_empty() => english,
                _ => record.name,
            };
            CatalogItem {
                id: record.id,
                name,
            }
        })
        .collect())
}
