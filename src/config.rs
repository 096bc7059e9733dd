//! Runtime configuration
//!
//! Resolves credentials, service URLs and on-disk locations from the parsed
//! command line, and builds the cache and API clients from them.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::cache::{DetailCache, FileStore};
use crate::cli::Cli;
use crate::data::catalog::WGER_BASE_URL;
use crate::data::chat::{DEFAULT_MODEL, GEMINI_BASE_URL};
use crate::data::exercises::EXERCISEDB_BASE_URL;
use crate::data::videos::YOUTUBE_BASE_URL;
use crate::data::{CatalogClient, ChatClient, ExerciseDbClient, VideoClient};

/// Name of the log file placed in the cache directory
const LOG_FILE_NAME: &str = "fitdex.log";

/// Everything needed to talk to the upstream services
#[derive(Debug, Clone)]
pub struct Config {
    pub rapidapi_key: Option<String>,
    pub youtube_key: Option<String>,
    pub gemini_key: Option<String>,
    pub gemini_model: String,
    pub exercisedb_url: String,
    pub youtube_url: String,
    pub wger_url: String,
    pub gemini_url: String,
    /// Where detail entries are stored; `None` disables the cache
    pub cache_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rapidapi_key: None,
            youtube_key: None,
            gemini_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            exercisedb_url: EXERCISEDB_BASE_URL.to_string(),
            youtube_url: YOUTUBE_BASE_URL.to_string(),
            wger_url: WGER_BASE_URL.to_string(),
            gemini_url: GEMINI_BASE_URL.to_string(),
            cache_dir: FileStore::new().map(|store| store.dir().to_path_buf()),
            log_file: None,
        }
    }
}

impl Config {
    /// Builds the configuration from CLI flags (which already fold in env vars)
    pub fn from_cli(cli: &Cli) -> Self {
        let defaults = Config::default();
        let cache_dir = cli.cache_dir.clone().or(defaults.cache_dir);
        let log_file = cli
            .log_file
            .clone()
            .or_else(|| cache_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME)));

        Self {
            rapidapi_key: non_empty(cli.rapidapi_key.clone()),
            youtube_key: non_empty(cli.youtube_key.clone()),
            gemini_key: non_empty(cli.gemini_key.clone()),
            gemini_model: cli.gemini_model.clone(),
            exercisedb_url: cli.exercisedb_url.clone().unwrap_or(defaults.exercisedb_url),
            youtube_url: cli.youtube_url.clone().unwrap_or(defaults.youtube_url),
            wger_url: cli.wger_url.clone().unwrap_or(defaults.wger_url),
            gemini_url: cli.gemini_url.clone().unwrap_or(defaults.gemini_url),
            cache_dir,
            log_file,
        }
    }

    /// Opens the detail cache, if a cache directory is known
    pub fn detail_cache(&self) -> Option<DetailCache> {
        let dir = self.cache_dir.clone()?;
        info!(cache_dir = %dir.display(), "Using detail cache");
        Some(DetailCache::new(Arc::new(FileStore::with_dir(dir))))
    }

    pub fn exercise_client(&self) -> ExerciseDbClient {
        ExerciseDbClient::new(self.rapidapi_key.clone()).with_base_url(&self.exercisedb_url)
    }

    pub fn video_client(&self) -> VideoClient {
        VideoClient::new(self.youtube_key.clone()).with_base_url(&self.youtube_url)
    }

    pub fn catalog_client(&self) -> CatalogClient {
        CatalogClient::new().with_base_url(&self.wger_url)
    }

    pub fn chat_client(&self) -> ChatClient {
        ChatClient::new(self.gemini_key.clone())
            .with_base_url(&self.gemini_url)
            .with_model(&self.gemini_model)
    }
}

/// Treats blank credentials as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
