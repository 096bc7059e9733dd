//! Command-line interface parsing for fitdex
//!
//! This module handles parsing of CLI arguments using clap, including the
//! flags that open a specific screen directly and the API credentials, which
//! fall back to environment variables.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::data::{Category, CategoryKind};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The category argument is not `<kind>:<name>`
    #[error("Invalid category: '{0}'. Expected <kind>:<name>, e.g. body-part:chest or equipment:barbell")]
    InvalidCategory(String),

    /// The category kind is not recognized
    #[error("Invalid category kind: '{0}'. Valid kinds: body-part, equipment")]
    InvalidCategoryKind(String),

    /// The exercise identifier is empty
    #[error("Exercise id must not be empty")]
    EmptyExerciseId,
}

/// fitdex - Browse exercises, watch related videos, and chat with a fitness assistant
#[derive(Parser, Debug)]
#[command(name = "fitdex")]
#[command(about = "Terminal exercise catalog with related videos and a fitness chat assistant")]
#[command(version)]
pub struct Cli {
    /// Open the detail screen for an exercise id (e.g. 0001)
    #[arg(long, value_name = "ID", conflicts_with_all = ["category", "chat"])]
    pub exercise: Option<String>,

    /// Open the exercise list for a category
    ///
    /// Examples:
    ///   fitdex --category body-part:chest
    ///   fitdex --category "equipment:bosu ball"
    #[arg(long, value_name = "KIND:NAME", conflicts_with = "chat")]
    pub category: Option<String>,

    /// Open the chat assistant
    #[arg(long)]
    pub chat: bool,

    /// RapidAPI key for ExerciseDB
    #[arg(long, env = "RAPID_API_KEY", hide_env_values = true)]
    pub rapidapi_key: Option<String>,

    /// YouTube Data API key for related videos
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub youtube_key: Option<String>,

    /// Gemini API key for the chat assistant
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = crate::data::chat::DEFAULT_MODEL)]
    pub gemini_model: String,

    /// Directory for cached exercise details (defaults to the XDG cache dir)
    #[arg(long, env = "FITDEX_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// File to write logs to (defaults to fitdex.log in the cache dir)
    #[arg(long, env = "FITDEX_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Override the ExerciseDB base URL
    #[arg(long, env = "FITDEX_EXERCISEDB_URL", hide = true)]
    pub exercisedb_url: Option<String>,

    /// Override the YouTube API base URL
    #[arg(long, env = "FITDEX_YOUTUBE_URL", hide = true)]
    pub youtube_url: Option<String>,

    /// Override the wger API base URL
    #[arg(long, env = "FITDEX_WGER_URL", hide = true)]
    pub wger_url: Option<String>,

    /// Override the Gemini API base URL
    #[arg(long, env = "FITDEX_GEMINI_URL", hide = true)]
    pub gemini_url: Option<String>,
}

/// Screen the application opens on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StartScreen {
    #[default]
    Home,
    Category(Category),
    Exercise(String),
    Chat,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub start_screen: StartScreen,
}

/// Parses a `<kind>:<name>` category argument
///
/// # Arguments
/// * `s` - The category string from CLI
///
/// # Returns
/// * `Ok(Category)` if both kind and name are valid
/// * `Err(CliError)` otherwise
pub fn parse_category_arg(s: &str) -> Result<Category, CliError> {
    let (kind, name) = s
        .split_once(':')
        .ok_or_else(|| CliError::InvalidCategory(s.to_string()))?;

    let kind =
        CategoryKind::from_str(kind).ok_or_else(|| CliError::InvalidCategoryKind(kind.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidCategory(s.to_string()));
    }

    Ok(Category::new(kind, name))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let start_screen = if let Some(ref id) = cli.exercise {
            let id = id.trim();
            if id.is_empty() {
                return Err(CliError::EmptyExerciseId);
            }
            StartScreen::Exercise(id.to_string())
        } else if let Some(ref category) = cli.category {
            StartScreen::Category(parse_category_arg(category)?)
        } else if cli.chat {
            StartScreen::Chat
        } else {
            StartScreen::Home
        };

        Ok(StartupConfig { start_screen })
    }
}
